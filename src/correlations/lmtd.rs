use super::round_to;
use crate::error::{finite, CalcResult, ValidationError};

/// 허용 최소 단말 온도차(°C)
pub const MIN_TERMINAL_DIFFERENCE_C: f64 = 2.8;
/// 두 끝단 온도차가 이 값보다 가까우면 로그 평균 대신 공통값을 쓴다.
pub const DEGENERATE_TOLERANCE_C: f64 = 0.001;

fn log_mean(delta1: f64, delta2: f64) -> f64 {
    if (delta1 - delta2).abs() < DEGENERATE_TOLERANCE_C {
        return delta1;
    }
    (delta1 - delta2) / (delta1 / delta2).ln()
}

/// 복수기 대수평균온도차(°C, 소수 4자리).
///
/// t_sat > t_out > t_in 이고 t_sat − t_out ≥ 2.8 °C 여야 한다.
/// LMTD = (t_out − t_in) / ln[(t_sat − t_in)/(t_sat − t_out)]
pub fn log_mean_temperature_difference(t_sat: f64, t_in: f64, t_out: f64) -> CalcResult<f64> {
    finite("saturation_temperature_c", t_sat)?;
    finite("cooling_water_inlet_temp_c", t_in)?;
    finite("cooling_water_outlet_temp_c", t_out)?;
    if !(t_sat > t_out && t_out > t_in) {
        return Err(ValidationError::TemperatureOrder { t_sat, t_in, t_out });
    }
    let terminal = t_sat - t_out;
    if terminal < MIN_TERMINAL_DIFFERENCE_C {
        return Err(ValidationError::TerminalDifference {
            difference: terminal,
            minimum: MIN_TERMINAL_DIFFERENCE_C,
        });
    }
    let delta1 = t_sat - t_in;
    let delta2 = terminal;
    Ok(round_to(log_mean(delta1, delta2), 4))
}
