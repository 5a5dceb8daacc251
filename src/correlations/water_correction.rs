//! 냉각수 입구 온도 보정계수.
//!
//! 표 값은 HEI 입구 수온 보정 곡선을 °C 격자로 옮긴 잠정치이다.
//! 21 °C 부근에서 1.0이 되며, 격자 밖 온도는 가장자리 값으로 클램프한다.

use serde::Serialize;

use super::round_to;
use crate::error::{finite, CalcResult, ValidationError};
use crate::interp;

/// 입구 수온 격자(°C)
pub const INLET_TEMPERATURE_GRID_C: [f64; 10] =
    [0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0];

const FACTORS: [f64; 10] = [
    0.655, 0.745, 0.830, 0.905, 0.990, 1.030, 1.065, 1.095, 1.110, 1.120,
];

/// 수온 보정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterCorrection {
    /// 보정계수(소수 4자리)
    pub factor: f64,
    /// 격자 밖이라 가장자리 값을 썼는지 여부
    pub clamped: bool,
}

/// 냉각수 입구 온도(°C)로 수온 보정계수를 구한다.
pub fn water_side_temperature_correction(inlet_temp_c: f64) -> CalcResult<WaterCorrection> {
    finite("cooling_water_inlet_temp_c", inlet_temp_c)?;
    let hit = interp::interpolate(&INLET_TEMPERATURE_GRID_C, &FACTORS, inlet_temp_c).ok_or(
        ValidationError::OutOfRange {
            name: "cooling_water_inlet_temp_c",
            value: inlet_temp_c,
            constraint: "수온 보정 표 조회 실패",
        },
    )?;
    Ok(WaterCorrection {
        factor: round_to(hit.value, 4),
        clamped: hit.clamped,
    })
}
