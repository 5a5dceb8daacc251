use std::f64::consts::PI;

use crate::error::{positive, CalcResult, ValidationError};

/// 노즐 규격 올림 단위(mm)
pub const STOCK_STEP_MM: u32 = 50;

/// 질량유량(kg/s)과 허용 유속 범위로 노즐 내경(mm)을 정한다.
///
/// 최대 허용 유속으로 단면을 잡고 50 mm 단위로 올림한다.
pub fn nozzle_inner_diameter(
    mass_flow_kg_s: f64,
    min_velocity_m_s: f64,
    max_velocity_m_s: f64,
    density_kg_m3: f64,
) -> CalcResult<u32> {
    nozzle_inner_diameter_with_step(
        mass_flow_kg_s,
        min_velocity_m_s,
        max_velocity_m_s,
        density_kg_m3,
        STOCK_STEP_MM,
    )
}

/// [`nozzle_inner_diameter`]와 같되 규격 올림 단위를 지정한다.
pub fn nozzle_inner_diameter_with_step(
    mass_flow_kg_s: f64,
    min_velocity_m_s: f64,
    max_velocity_m_s: f64,
    density_kg_m3: f64,
    step_mm: u32,
) -> CalcResult<u32> {
    positive("mass_flow_kg_s", mass_flow_kg_s)?;
    positive("fluid_density_kg_m3", density_kg_m3)?;
    if step_mm == 0 {
        return Err(ValidationError::OutOfRange {
            name: "stock_step_mm",
            value: 0.0,
            constraint: ">= 1",
        });
    }
    let valid_window = min_velocity_m_s.is_finite()
        && max_velocity_m_s.is_finite()
        && min_velocity_m_s > 0.0
        && max_velocity_m_s > min_velocity_m_s;
    if !valid_window {
        return Err(ValidationError::VelocityWindow {
            min: min_velocity_m_s,
            max: max_velocity_m_s,
        });
    }

    let volume_flow_m3_s = mass_flow_kg_s / density_kg_m3;
    let diameter_mm = (4.0 * volume_flow_m3_s / (PI * max_velocity_m_s)).sqrt() * 1000.0;
    let step = f64::from(step_mm);
    let stocked = (diameter_mm / step).ceil() * step;
    if stocked > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            name: "nozzle_diameter_mm",
            value: stocked,
            constraint: "<= u32::MAX",
        });
    }
    Ok(stocked as u32)
}
