//! 복수기 설계 상관식 모음.
//!
//! 각 함수는 부작용이 없는 순수 함수이며, 입력이 숫자가 아니거나 물리적 범위를
//! 벗어나면 [`ValidationError`](crate::error::ValidationError)를 돌려준다.
//! 설계 반올림 규칙이 정해진 곳(면적, 관 수, 노즐 규격) 외에는 값을 임의로 클램프하지 않는다.

pub mod fouling;
pub mod heat_transfer;
pub mod lmtd;
pub mod material_correction;
pub mod nozzle;
pub mod pressure_drop;
pub mod saturation;
pub mod surface_area;
pub mod tube_bundle;
pub mod tube_sheet;
pub mod water_correction;

pub use fouling::fouling_to_cleanliness;
pub use heat_transfer::{uncorrected_heat_transfer_coefficient, HeatTransferCoefficient};
pub use lmtd::log_mean_temperature_difference;
pub use material_correction::material_wall_correction;
pub use nozzle::{nozzle_inner_diameter, nozzle_inner_diameter_with_step};
pub use pressure_drop::approximate_frictional_water_resistance;
pub use saturation::{
    heat_duty_from_steam, saturation_approximation, SaturationModel, SaturationState,
};
pub use surface_area::surface_area_from_duty;
pub use tube_bundle::{
    inner_diameter_mm, tube_count_from_target_velocity, tube_length_from_area,
    velocity_from_tube_count,
};
pub use tube_sheet::{default_pitch_mm, tube_sheet_diameter_estimate};
pub use water_correction::{water_side_temperature_correction, WaterCorrection};

/// 소수점 `decimals` 자리로 반올림한다.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
