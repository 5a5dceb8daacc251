//! 관 외경 × 관내 유속에 따른 미보정 총괄 전열계수(HEI 표).

use serde::Serialize;

use super::round_to;
use crate::error::{finite, within, CalcResult, ValidationError};
use crate::interp;
use crate::units::{convert_velocity, VelocityUnit};

/// Btu/(h·ft²·°F) → W/(m²·K) 환산 배수(설계 관례값)
pub const BTU_TO_METRIC: f64 = 5.678;

/// 표의 관 외경 격자(mm)
pub const DIAMETER_GRID_MM: [f64; 12] = [
    15.875, 19.050, 22.225, 25.400, 28.575, 31.750, 34.925, 38.100, 41.275, 44.450, 47.625, 50.800,
];

/// 표의 유속 격자(ft/s): 3.0 ~ 12.0, 0.5 간격
pub const VELOCITY_GRID_FPS: [f64; 19] = [
    3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 9.5, 10.0, 10.5, 11.0, 11.5,
    12.0,
];

// 경계값이 m/s로 주어질 때의 부동소수 오차 허용치
const VELOCITY_TOLERANCE_FPS: f64 = 1e-9;

const ROW_A: [f64; 19] = [
    462.5, 499.5, 534.0, 566.4, 597.0, 626.2, 654.0, 680.7, 706.4, 731.2, 755.2, 775.5, 795.3,
    814.1, 831.9, 848.9, 865.2, 880.7, 895.6,
];
const ROW_B: [f64; 19] = [
    455.0, 492.0, 526.0, 557.9, 588.1, 616.8, 644.2, 670.5, 695.8, 720.3, 743.9, 763.9, 783.2,
    801.6, 819.0, 835.6, 851.5, 866.6, 881.1,
];
const ROW_C: [f64; 19] = [
    448.6, 484.5, 518.0, 549.4, 579.1, 607.4, 634.4, 660.3, 685.2, 709.3, 732.6, 752.0, 770.7,
    788.4, 805.3, 821.4, 836.7, 851.3, 865.3,
];
const ROW_D: [f64; 19] = [
    441.7, 477.1, 510.0, 540.9, 570.2, 598.0, 624.6, 650.1, 674.7, 698.3, 721.2, 740.4, 758.7,
    776.1, 792.6, 808.3, 823.2, 837.5, 851.2,
];
const ROW_E: [f64; 19] = [
    434.7, 469.6, 502.0, 532.5, 561.3, 588.6, 614.8, 639.9, 664.1, 687.4, 709.9, 727.8, 745.7,
    762.7, 778.8, 794.1, 808.8, 822.7, 836.0,
];
const ROW_F: [f64; 19] = [
    427.8, 462.1, 494.0, 524.0, 552.3, 579.8, 605.0, 629.7, 653.5, 676.4, 698.6, 716.8, 734.4,
    751.0, 766.8, 781.8, 796.2, 809.8, 822.9,
];

/// 외경 격자 순서의 U 표(Btu/(h·ft²·°F)). 인접한 두 외경은 같은 행을 공유한다.
const U_TABLE: [[f64; 19]; 12] = [
    ROW_A, ROW_A, ROW_B, ROW_B, ROW_C, ROW_C, ROW_D, ROW_D, ROW_E, ROW_E, ROW_F, ROW_F,
];

/// 미보정 전열계수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatTransferCoefficient {
    /// Btu/(h·ft²·°F), 소수 1자리
    pub imperial: f64,
    /// W/(m²·K)
    pub metric: f64,
}

/// 관 외경(mm)과 관내 유속(m/s)으로 미보정 전열계수를 구한다.
///
/// 먼저 유속 행마다 외경 방향으로 보간해 유속별 벡터를 만든 뒤,
/// 그 벡터를 환산 유속(ft/s)에서 다시 보간한다. 두 축 모두 표 범위를 벗어나면 거부한다.
pub fn uncorrected_heat_transfer_coefficient(
    outer_diameter_mm: f64,
    velocity_m_s: f64,
) -> CalcResult<HeatTransferCoefficient> {
    within(
        "tube_outer_diameter_mm",
        outer_diameter_mm,
        DIAMETER_GRID_MM[0],
        DIAMETER_GRID_MM[DIAMETER_GRID_MM.len() - 1],
        "15.875 ~ 50.8 mm",
    )?;
    finite("tube_velocity_m_s", velocity_m_s)?;
    let velocity_fps = convert_velocity(
        velocity_m_s,
        VelocityUnit::MeterPerSecond,
        VelocityUnit::FootPerSecond,
    );
    let v_min = VELOCITY_GRID_FPS[0] - VELOCITY_TOLERANCE_FPS;
    let v_max = VELOCITY_GRID_FPS[VELOCITY_GRID_FPS.len() - 1] + VELOCITY_TOLERANCE_FPS;
    if !(v_min..=v_max).contains(&velocity_fps) {
        return Err(ValidationError::OutOfRange {
            name: "tube_velocity_m_s",
            value: velocity_m_s,
            constraint: "0.91 ~ 3.66 m/s (3 ~ 12 ft/s)",
        });
    }

    let mut u_by_velocity = [0.0; 19];
    for (i, slot) in u_by_velocity.iter_mut().enumerate() {
        let column: [f64; 12] = std::array::from_fn(|d| U_TABLE[d][i]);
        *slot = interp::interpolate(&DIAMETER_GRID_MM, &column, outer_diameter_mm)
            .map(|hit| hit.value)
            .ok_or(ValidationError::OutOfRange {
                name: "tube_outer_diameter_mm",
                value: outer_diameter_mm,
                constraint: "15.875 ~ 50.8 mm",
            })?;
    }
    let u = interp::interpolate(&VELOCITY_GRID_FPS, &u_by_velocity, velocity_fps)
        .map(|hit| hit.value)
        .ok_or(ValidationError::OutOfRange {
            name: "tube_velocity_m_s",
            value: velocity_m_s,
            constraint: "0.91 ~ 3.66 m/s (3 ~ 12 ft/s)",
        })?;

    let imperial = round_to(u, 1);
    Ok(HeatTransferCoefficient {
        imperial,
        metric: imperial * BTU_TO_METRIC,
    })
}
