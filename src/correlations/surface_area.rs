use super::round_to;
use crate::error::{positive, CalcResult};

/// 필요 전열면적(m², 소수 2자리).
///
/// A = 1000·Q / (LMTD · U · f_water · f_mat · f_clean), Q는 kW, U는 W/(m²·K).
pub fn surface_area_from_duty(
    duty_kw: f64,
    lmtd_c: f64,
    uncorrected_u_w_m2k: f64,
    water_factor: f64,
    material_factor: f64,
    cleanliness: f64,
) -> CalcResult<f64> {
    positive("heat_duty_kw", duty_kw)?;
    positive("lmtd_c", lmtd_c)?;
    positive("uncorrected_u_w_m2k", uncorrected_u_w_m2k)?;
    positive("water_correction_factor", water_factor)?;
    positive("material_correction_factor", material_factor)?;
    positive("cleanliness_factor", cleanliness)?;
    let area = 1000.0 * duty_kw
        / (lmtd_c * uncorrected_u_w_m2k * water_factor * material_factor * cleanliness);
    Ok(round_to(area, 2))
}
