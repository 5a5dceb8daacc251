//! 관군 구조: 관 수, 관 길이, 관내 유속.

use std::f64::consts::PI;

use super::round_to;
use crate::error::{positive, CalcResult, ValidationError};
use crate::units::{convert_volume_flow, mm_to_m, VolumeFlowUnit};

/// 관 내경(mm) = 외경 − 2 × 두께. 0 이하면 오류.
pub fn inner_diameter_mm(outer_diameter_mm: f64, wall_thickness_mm: f64) -> CalcResult<f64> {
    positive("tube_outer_diameter_mm", outer_diameter_mm)?;
    positive("tube_wall_thickness_mm", wall_thickness_mm)?;
    let di = outer_diameter_mm - 2.0 * wall_thickness_mm;
    if di <= 0.0 {
        return Err(ValidationError::NonPositiveInnerDiameter {
            outer_diameter_mm,
            wall_thickness_mm,
        });
    }
    Ok(di)
}

fn check_passes(passes: u32) -> CalcResult<f64> {
    if passes < 1 {
        return Err(ValidationError::PassCount { value: passes });
    }
    Ok(f64::from(passes))
}

fn check_count(tube_count: u32) -> CalcResult<f64> {
    if tube_count < 1 {
        return Err(ValidationError::OutOfRange {
            name: "tube_count",
            value: f64::from(tube_count),
            constraint: ">= 1",
        });
    }
    Ok(f64::from(tube_count))
}

/// 관 1개의 내부 단면적(m²)
fn single_inner_area_m2(outer_diameter_mm: f64, wall_thickness_mm: f64) -> CalcResult<f64> {
    let di_m = mm_to_m(inner_diameter_mm(outer_diameter_mm, wall_thickness_mm)?);
    Ok(PI * (di_m / 2.0).powi(2))
}

/// 냉각수 유량(m³/h)과 목표 유속(m/s)으로 필요한 최소 관 수를 구한다.
///
/// 필요 유로 면적 / 관 1개 내부 면적 × 패스 수를 올림하며 최소 1개.
pub fn tube_count_from_target_velocity(
    flow_m3_h: f64,
    target_velocity_m_s: f64,
    outer_diameter_mm: f64,
    wall_thickness_mm: f64,
    passes: u32,
) -> CalcResult<u32> {
    positive("cooling_water_flow_m3_h", flow_m3_h)?;
    positive("target_velocity_m_s", target_velocity_m_s)?;
    let passes = check_passes(passes)?;
    let single = single_inner_area_m2(outer_diameter_mm, wall_thickness_mm)?;

    let flow_m3_s = convert_volume_flow(
        flow_m3_h,
        VolumeFlowUnit::CubicMeterPerHour,
        VolumeFlowUnit::CubicMeterPerSecond,
    );
    let needed = flow_m3_s / target_velocity_m_s;
    let count = (needed / single * passes).ceil();
    if count > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            name: "tube_count",
            value: count,
            constraint: "<= u32::MAX",
        });
    }
    Ok((count as u32).max(1))
}

/// 총 전열면적(m²)과 관 수로 관 1개의 길이(mm)를 구한다.
///
/// mm 단위에서 소수점 이하를 버리며 최소 1 mm.
pub fn tube_length_from_area(
    total_area_m2: f64,
    tube_count: u32,
    outer_diameter_mm: f64,
) -> CalcResult<f64> {
    positive("design_area_m2", total_area_m2)?;
    let count = check_count(tube_count)?;
    let do_m = mm_to_m(positive("tube_outer_diameter_mm", outer_diameter_mm)?);
    let length_mm = (total_area_m2 / (PI * do_m * count) * 1000.0).floor();
    Ok(length_mm.max(1.0))
}

/// 관 수와 유량으로 관내 유속(m/s, 소수 3자리)을 역산한다.
pub fn velocity_from_tube_count(
    flow_m3_h: f64,
    tube_count: u32,
    outer_diameter_mm: f64,
    wall_thickness_mm: f64,
    passes: u32,
) -> CalcResult<f64> {
    positive("cooling_water_flow_m3_h", flow_m3_h)?;
    let count = check_count(tube_count)?;
    let passes = check_passes(passes)?;
    let single = single_inner_area_m2(outer_diameter_mm, wall_thickness_mm)?;

    let flow_m3_s = convert_volume_flow(
        flow_m3_h,
        VolumeFlowUnit::CubicMeterPerHour,
        VolumeFlowUnit::CubicMeterPerSecond,
    );
    Ok(round_to(flow_m3_s * passes / (single * count), 3))
}
