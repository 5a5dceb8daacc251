use super::round_to;
use crate::error::{finite, positive, CalcResult, ValidationError};
use crate::units::mm_to_m;

// 국부 손실 항의 경험 계수(수실, 입출구, 기타)
const WATERBOX_LOSS: f64 = 0.5;
const INLET_OUTLET_LOSS: f64 = 0.3;
const OTHER_LOCAL_LOSS: f64 = 0.2;

/// 온도 보정계수 Rt = 1 − 0.002(T − 20), [0.9, 1.1]로 제한.
fn temperature_factor(mean_temp_c: f64) -> f64 {
    (1.0 - 0.002 * (mean_temp_c - 20.0)).clamp(0.9, 1.1)
}

/// 관내 냉각수 마찰 저항 근사(소수 7자리).
///
/// 단위 길이 저항 dPL = 28.72·v^1.75 / Di^1.25 에 관 길이 × 패스 수 × Rt를 곱하고,
/// 패스 수 × v²에 비례하는 국부 손실 세 항을 더한다. dPL이 Pa/m 크기이므로 결과는 Pa 크기이다.
/// 표준 다항 저항 계산을 단순화한 추정치이며 인증값으로 쓰면 안 된다.
pub fn approximate_frictional_water_resistance(
    inner_diameter_mm: f64,
    velocity_m_s: f64,
    tube_length_mm: f64,
    passes: u32,
    mean_temp_c: f64,
) -> CalcResult<f64> {
    positive("tube_inner_diameter_mm", inner_diameter_mm)?;
    positive("tube_velocity_m_s", velocity_m_s)?;
    positive("tube_length_mm", tube_length_mm)?;
    finite("mean_water_temp_c", mean_temp_c)?;
    if !matches!(passes, 1 | 2 | 4) {
        return Err(ValidationError::PassCount { value: passes });
    }

    let di_m = mm_to_m(inner_diameter_mm);
    let length_m = mm_to_m(tube_length_mm);
    let passes = f64::from(passes);

    let gradient = 28.72 * velocity_m_s.powf(1.75) / di_m.powf(1.25);
    let friction = length_m * passes * gradient * temperature_factor(mean_temp_c);

    let dynamic = velocity_m_s.powi(2) * passes * 0.1;
    let local = (WATERBOX_LOSS + INLET_OUTLET_LOSS + OTHER_LOCAL_LOSS) * dynamic;

    Ok(round_to(friction + local, 7))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_factor_is_clamped() {
        assert_eq!(temperature_factor(-100.0), 1.1);
        assert_eq!(temperature_factor(200.0), 0.9);
        assert!((temperature_factor(20.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn three_passes_rejected() {
        assert_eq!(
            approximate_frictional_water_resistance(23.0, 2.0, 10000.0, 3, 30.0),
            Err(ValidationError::PassCount { value: 3 })
        );
    }
}
