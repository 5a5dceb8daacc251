use super::round_to;
use crate::error::{positive, CalcResult, ValidationError};

/// 관 외경에서 정하는 기본 관 피치(mm).
///
/// 1.25·Do를 표준 피치 25/30/32/38 mm 중 그 이상인 첫 값으로 올린다.
/// 38 mm를 넘으면 1.25·Do를 소수 1자리로 그대로 쓴다.
pub fn default_pitch_mm(outer_diameter_mm: f64) -> CalcResult<f64> {
    positive("tube_outer_diameter_mm", outer_diameter_mm)?;
    let base = 1.25 * outer_diameter_mm;
    let pitch = if base < 25.0 {
        25.0
    } else if base < 30.0 {
        30.0
    } else if base <= 32.0 {
        32.0
    } else if base <= 38.0 {
        38.0
    } else {
        round_to(base, 1)
    };
    Ok(pitch)
}

/// 관판 외경 추정식(mm). 반올림하지 않은 값을 돌려준다.
///
/// D = sqrt(n / 0.6) × (1 + 0.05 × 패스 수) × 피치
pub fn tube_sheet_diameter_estimate(
    outer_diameter_mm: f64,
    tube_count: u32,
    passes: u32,
    pitch_mm: f64,
) -> CalcResult<f64> {
    positive("tube_outer_diameter_mm", outer_diameter_mm)?;
    positive("tube_pitch_mm", pitch_mm)?;
    if tube_count < 1 {
        return Err(ValidationError::OutOfRange {
            name: "tube_count",
            value: f64::from(tube_count),
            constraint: ">= 1",
        });
    }
    if passes < 1 {
        return Err(ValidationError::PassCount { value: passes });
    }
    if pitch_mm <= outer_diameter_mm {
        return Err(ValidationError::PitchNotAboveDiameter {
            pitch_mm,
            outer_diameter_mm,
        });
    }
    let packing = (f64::from(tube_count) / 0.6).sqrt();
    let pass_allowance = 1.0 + 0.05 * f64::from(passes);
    Ok(packing * pass_allowance * pitch_mm)
}
