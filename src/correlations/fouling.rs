use crate::error::{non_negative, positive, CalcResult};

use super::tube_bundle::inner_diameter_mm;

/// 오염계수(m²·K/W)를 청결계수로 환산한다.
///
/// 청결계수 = 1 / (1 + U·Rf·AR), AR = 외주/내주 = Do/Di.
/// `corrected_u_w_m2k`는 수온·재질 보정을 마친 전열계수이다.
pub fn fouling_to_cleanliness(
    fouling_m2k_w: f64,
    outer_diameter_mm: f64,
    wall_thickness_mm: f64,
    corrected_u_w_m2k: f64,
) -> CalcResult<f64> {
    non_negative("fouling_factor_m2k_w", fouling_m2k_w)?;
    positive("corrected_u_w_m2k", corrected_u_w_m2k)?;
    let di_mm = inner_diameter_mm(outer_diameter_mm, wall_thickness_mm)?;
    let area_ratio = outer_diameter_mm / di_mm;
    Ok(1.0 / (1.0 + corrected_u_w_m2k * fouling_m2k_w * area_ratio))
}
