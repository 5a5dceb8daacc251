//! 단계별 계산. 입력은 `required`로, 앞 단계 출력은 `Ledger::value`로만 읽는다.

use std::f64::consts::PI;

use super::ledger::{required, Blocked, Ledger};
use super::Step;
use crate::correlations::{
    approximate_frictional_water_resistance, default_pitch_mm, fouling_to_cleanliness,
    heat_duty_from_steam, inner_diameter_mm, log_mean_temperature_difference,
    material_wall_correction, nozzle_inner_diameter_with_step, round_to, surface_area_from_duty,
    tube_count_from_target_velocity, tube_length_from_area, tube_sheet_diameter_estimate,
    uncorrected_heat_transfer_coefficient, velocity_from_tube_count,
    water_side_temperature_correction, SaturationModel, SaturationState,
};
use crate::error::{finite, non_negative, positive, ValidationError};
use crate::record::{CoolingWaterSpec, Field, StructureSpec};
use crate::steam::if97;
use crate::units::{
    convert_mass_flow, convert_volume_flow, mm_to_inch, mm_to_m, MassFlowUnit, VolumeFlowUnit,
};

pub(super) fn evaluate(step: Step, l: &mut Ledger<'_>) {
    match step {
        Step::SteamDuty => steam_duty(l),
        Step::CoolingWater => cooling_water(l),
        Step::MaterialCorrection => material_correction(l),
        Step::WaterCorrection => water_correction(l),
        Step::HeatTransferCoefficient => heat_transfer_coefficient(l),
        Step::Lmtd => lmtd(l),
        Step::Cleanliness => cleanliness(l),
        Step::SurfaceArea => surface_area(l),
        Step::Structure => structure(l),
        Step::TubeSheet => tube_sheet(l),
        Step::Nozzles => nozzles(l),
        Step::PressureDrop => pressure_drop(l),
        Step::TerminalDifference => terminal_difference(l),
    }
}

fn steam_flow_kg_s(flow_kg_h: f64) -> f64 {
    convert_mass_flow(
        flow_kg_h,
        MassFlowUnit::KilogramPerHour,
        MassFlowUnit::KilogramPerSecond,
    )
}

/// (1) 포화 상태와 증기 열부하
fn steam_duty(l: &mut Ledger<'_>) {
    let input = l.input();
    let model = l.config().saturation_model;
    l.derive_all(
        [Field::SaturationTemperature, Field::SaturatedLiquidEnthalpy],
        |_| {
            let p = required(input.steam_pressure_mpa, "steam_pressure_mpa")?;
            let state = model.evaluate(p)?;
            Ok([state.temperature_c, state.liquid_enthalpy_kj_kg])
        },
    );
    if model == SaturationModel::CurveFit {
        check_curve_fit_deviation(l);
    }
    l.derive(Field::HeatDuty, |l| {
        let saturation = SaturationState {
            temperature_c: l.value(Field::SaturationTemperature)?,
            liquid_enthalpy_kj_kg: l.value(Field::SaturatedLiquidEnthalpy)?,
        };
        let h_steam = required(input.steam_enthalpy_kj_kg, "steam_enthalpy_kj_kg")?;
        let flow_kg_h = required(input.steam_mass_flow_kg_h, "steam_mass_flow_kg_h")?;
        Ok(heat_duty_from_steam(
            &saturation,
            h_steam,
            steam_flow_kg_s(flow_kg_h),
        )?)
    });
}

/// 근사식 포화 온도가 IF97과 크게 어긋나면 경고한다.
fn check_curve_fit_deviation(l: &mut Ledger<'_>) {
    let (Some(p), Ok(t_fit)) = (
        l.input().steam_pressure_mpa,
        l.value(Field::SaturationTemperature),
    ) else {
        return;
    };
    let Ok(reference) = if97::saturation_state(p) else {
        return;
    };
    let deviation = t_fit - reference.temperature_c;
    if deviation.abs() > l.config().saturation_deviation_warn_c {
        l.warn(format!(
            "포화 온도 근사식 {t_fit:.2}°C가 IF97 {:.2}°C와 {deviation:+.2}°C 차이가 납니다 (p = {p} MPa)",
            reference.temperature_c
        ));
    }
}

/// (2) 냉각수 유량/온도 상승. 모드에 따라 한쪽을 주고 다른 쪽을 푼다.
fn cooling_water(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive_all(
        [
            Field::WaterMassFlow,
            Field::WaterVolumetricFlow,
            Field::TemperatureRise,
            Field::OutletTemperature,
        ],
        |l| {
            let duty = l.value(Field::HeatDuty)?;
            let t_in = required(input.cooling_water_inlet_temp_c, "cooling_water_inlet_temp_c")?;
            let cp = required(input.water_cp_kj_kgk, "water_cp_kj_kgk")?;
            let rho = required(input.water_density_kg_m3, "water_density_kg_m3")?;
            positive("heat_duty_kw", duty)?;
            finite("cooling_water_inlet_temp_c", t_in)?;
            positive("water_cp_kj_kgk", cp)?;
            positive("water_density_kg_m3", rho)?;

            let (mass_kg_s, flow_m3_h, rise) = match input.cooling_water {
                CoolingWaterSpec::TemperatureRiseGiven { temp_rise_c } => {
                    let rise = required(temp_rise_c, "cooling_water.temp_rise_c")?;
                    positive("temp_rise_c", rise)?;
                    let mass = duty / (cp * rise);
                    let flow = convert_volume_flow(
                        mass / rho,
                        VolumeFlowUnit::CubicMeterPerSecond,
                        VolumeFlowUnit::CubicMeterPerHour,
                    );
                    (mass, flow, rise)
                }
                CoolingWaterSpec::FlowGiven { flow_m3_h } => {
                    let flow = required(flow_m3_h, "cooling_water.flow_m3_h")?;
                    positive("cooling_water_flow_m3_h", flow)?;
                    let mass = convert_volume_flow(
                        flow,
                        VolumeFlowUnit::CubicMeterPerHour,
                        VolumeFlowUnit::CubicMeterPerSecond,
                    ) * rho;
                    (mass, flow, duty / (mass * cp))
                }
            };
            Ok([mass_kg_s, flow_m3_h, rise, t_in + rise])
        },
    );
}

/// (3) 재질 보정계수. 두께는 mm 입력을 인치로 바꿔 조회한다.
fn material_correction(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive(Field::MaterialCorrection, |_| {
        let material = required(input.material.as_deref(), "material")?;
        let wall_mm = required(input.tube_wall_thickness_mm, "tube_wall_thickness_mm")?;
        Ok(material_wall_correction(material, mm_to_inch(wall_mm))?)
    });
}

/// (4) 수온 보정계수
fn water_correction(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive(Field::WaterCorrection, |l| {
        let t_in = required(input.cooling_water_inlet_temp_c, "cooling_water_inlet_temp_c")?;
        let correction = water_side_temperature_correction(t_in)?;
        if correction.clamped {
            l.warn(format!(
                "냉각수 입구 온도 {t_in}°C가 수온 보정표 범위(0~45°C) 밖이라 경계값 {}를 사용했습니다",
                correction.factor
            ));
        }
        Ok(correction.factor)
    });
}

/// (5) 미보정/보정 전열계수. 유속은 입력한 목표 유속을 쓴다.
fn heat_transfer_coefficient(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive_all([Field::UncorrectedU, Field::UncorrectedUImperial], |_| {
        let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
        let velocity = required(input.target_velocity_m_s, "target_velocity_m_s")?;
        let u = uncorrected_heat_transfer_coefficient(od, velocity)?;
        Ok([u.metric, u.imperial])
    });
    l.derive(Field::CorrectedU, |l| {
        let u = l.value(Field::UncorrectedU)?;
        let water = l.value(Field::WaterCorrection)?;
        let material = l.value(Field::MaterialCorrection)?;
        Ok(u * water * material)
    });
}

/// (6) 대수평균온도차
fn lmtd(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive(Field::Lmtd, |l| {
        let t_sat = l.value(Field::SaturationTemperature)?;
        let t_in = required(input.cooling_water_inlet_temp_c, "cooling_water_inlet_temp_c")?;
        let t_out = l.value(Field::OutletTemperature)?;
        Ok(log_mean_temperature_difference(t_sat, t_in, t_out)?)
    });
}

/// (7) 청결계수. 0보다 큰 오염계수가 있으면 그것으로 환산하고 입력 청결계수는 쓰지 않는다.
fn cleanliness(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive(Field::Cleanliness, |l| {
        if let Some(fouling) = input.fouling_factor_m2k_w {
            if positive("fouling_factor_m2k_w", fouling).is_ok() {
                let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
                let wall = required(input.tube_wall_thickness_mm, "tube_wall_thickness_mm")?;
                let u = l.value(Field::CorrectedU)?;
                return Ok(fouling_to_cleanliness(fouling, od, wall, u)?);
            }
            // 음수와 NaN은 여기서 걸러지고, 0은 청결계수 입력으로 넘어간다
            non_negative("fouling_factor_m2k_w", fouling)?;
        }
        let factor = required(input.cleanliness_factor, "cleanliness_factor")?;
        positive("cleanliness_factor", factor)?;
        if factor > 1.0 {
            return Err(ValidationError::OutOfRange {
                name: "cleanliness_factor",
                value: factor,
                constraint: "0 < 청결계수 <= 1",
            }
            .into());
        }
        Ok(factor)
    });
}

/// (8) 필요 전열면적
fn surface_area(l: &mut Ledger<'_>) {
    l.derive(Field::RequiredArea, |l| {
        Ok(surface_area_from_duty(
            l.value(Field::HeatDuty)?,
            l.value(Field::Lmtd)?,
            l.value(Field::UncorrectedU)?,
            l.value(Field::WaterCorrection)?,
            l.value(Field::MaterialCorrection)?,
            l.value(Field::Cleanliness)?,
        )?)
    });
}

/// 지정 관 수 검사(1개 이상)
fn given_tube_count(count: Option<u32>) -> Result<f64, Blocked> {
    let count = required(count, "structure.tube_count")?;
    if count < 1 {
        return Err(ValidationError::OutOfRange {
            name: "structure.tube_count",
            value: f64::from(count),
            constraint: ">= 1",
        }
        .into());
    }
    Ok(f64::from(count))
}

/// 관 수로부터 유속을 역산한다(GivenStructure, FixedArea 공통).
fn back_calculated_velocity(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive(Field::TubeVelocity, |l| {
        let flow = l.value(Field::WaterVolumetricFlow)?;
        let count = l.count(Field::TubeCount)?;
        let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
        let wall = required(input.tube_wall_thickness_mm, "tube_wall_thickness_mm")?;
        let passes = required(input.passes, "passes")?;
        Ok(velocity_from_tube_count(flow, count, od, wall, passes.get())?)
    });
}

/// (9) 관군 구조. 모드마다 설계 면적, 관 수, 관 길이, 유속을 정하는 방식이 다르다.
fn structure(l: &mut Ledger<'_>) {
    let input = l.input();
    let allowances = &l.config().allowances;
    match &input.structure {
        StructureSpec::Auto => {
            l.derive(Field::DesignArea, |l| {
                let area = l.value(Field::RequiredArea)?;
                let step = positive("allowances.area_step_m2", allowances.area_step_m2)?;
                // 오염계수를 입력하지 않았으면 오염 여유를 면적에 더한다
                let area = if input.fouling_factor_m2k_w.is_none() {
                    area * (1.0 + allowances.fouling_margin)
                } else {
                    area
                };
                Ok((area / step).ceil() * step)
            });
            l.derive(Field::TubeCount, |l| {
                let flow = l.value(Field::WaterVolumetricFlow)?;
                let velocity = required(input.target_velocity_m_s, "target_velocity_m_s")?;
                let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
                let wall = required(input.tube_wall_thickness_mm, "tube_wall_thickness_mm")?;
                let passes = required(input.passes, "passes")?;
                let count =
                    tube_count_from_target_velocity(flow, velocity, od, wall, passes.get())?;
                Ok(f64::from(count))
            });
            l.derive(Field::TubeLength, |l| {
                let area = l.value(Field::DesignArea)?;
                let count = l.count(Field::TubeCount)?;
                let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
                Ok(tube_length_from_area(area, count, od)?)
            });
            l.derive(Field::TubeVelocity, |_| {
                let velocity = required(input.target_velocity_m_s, "target_velocity_m_s")?;
                Ok(positive("target_velocity_m_s", velocity)?)
            });
        }
        StructureSpec::GivenStructure {
            tube_count,
            tube_length_mm,
        } => {
            l.derive(Field::TubeCount, |_| given_tube_count(*tube_count));
            l.derive(Field::TubeLength, |_| {
                let length = required(*tube_length_mm, "structure.tube_length_mm")?;
                Ok(positive("structure.tube_length_mm", length)?)
            });
            l.derive(Field::DesignArea, |l| {
                let count = l.value(Field::TubeCount)?;
                let length_mm = l.value(Field::TubeLength)?;
                let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
                positive("tube_outer_diameter_mm", od)?;
                Ok(PI * mm_to_m(od) * mm_to_m(length_mm) * count)
            });
            back_calculated_velocity(l);
        }
        StructureSpec::FixedArea {
            design_area_m2,
            tube_count,
        } => {
            l.derive(Field::DesignArea, |_| {
                let area = required(*design_area_m2, "structure.design_area_m2")?;
                Ok(positive("structure.design_area_m2", area)?)
            });
            l.derive(Field::TubeCount, |_| given_tube_count(*tube_count));
            l.derive(Field::TubeLength, |l| {
                let area = l.value(Field::DesignArea)?;
                let count = l.value(Field::TubeCount)?;
                let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
                positive("tube_outer_diameter_mm", od)?;
                // 면적 고정 모드는 mm 절사 없이 그대로 역산한다
                Ok(area / (PI * mm_to_m(od) * count) * 1000.0)
            });
            back_calculated_velocity(l);
        }
    }
}

/// (10) 관판 외경, 1 mm 단위로 올림
fn tube_sheet(l: &mut Ledger<'_>) {
    let input = l.input();
    l.derive(Field::TubeSheetDiameter, |l| {
        let count = l.count(Field::TubeCount)?;
        let passes = required(input.passes, "passes")?;
        let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
        let pitch = match input.tube_pitch_mm {
            Some(pitch) => pitch,
            None => default_pitch_mm(od)?,
        };
        Ok(tube_sheet_diameter_estimate(od, count, passes.get(), pitch)?.ceil())
    });
}

/// (11) 응축수/냉각수 노즐 내경과 관 길이/관판 외경 비
fn nozzles(l: &mut Ledger<'_>) {
    let input = l.input();
    let settings = &l.config().nozzles;
    l.derive(Field::CondensateNozzleDiameter, |_| {
        let flow_kg_h = required(input.steam_mass_flow_kg_h, "steam_mass_flow_kg_h")?;
        let [v_min, v_max] = settings.condensate_velocity_m_s;
        let d = nozzle_inner_diameter_with_step(
            steam_flow_kg_s(flow_kg_h),
            v_min,
            v_max,
            settings.condensate_density_kg_m3,
            settings.stock_step_mm,
        )?;
        Ok(f64::from(d))
    });
    l.derive(Field::CoolingWaterNozzleDiameter, |l| {
        let mass = l.value(Field::WaterMassFlow)?;
        let count = required(input.cooling_water_nozzle_count, "cooling_water_nozzle_count")?;
        let rho = required(input.water_density_kg_m3, "water_density_kg_m3")?;
        let [v_min, v_max] = settings.cooling_water_velocity_m_s;
        let d = nozzle_inner_diameter_with_step(
            mass / f64::from(count.get()),
            v_min,
            v_max,
            rho,
            settings.stock_step_mm,
        )?;
        Ok(f64::from(d))
    });
    let [lo, hi] = l.config().advisories.length_diameter_ratio;
    l.derive(Field::LengthDiameterRatio, |l| {
        let length = l.value(Field::TubeLength)?;
        let diameter = l.value(Field::TubeSheetDiameter)?;
        let ratio = round_to(length / positive("tube_sheet_diameter_mm", diameter)?, 2);
        if !(lo..=hi).contains(&ratio) {
            l.warn(format!(
                "관 길이/관판 외경 비 {ratio}가 권장 범위 {lo}~{hi}를 벗어났습니다"
            ));
        }
        Ok(ratio)
    });
}

/// (12) 총 압력 손실(kPa) = 여유 × 0.001 × 마찰 저항
fn pressure_drop(l: &mut Ledger<'_>) {
    let input = l.input();
    let margin = l.config().allowances.pressure_drop_margin;
    l.derive(Field::TotalPressureDrop, |l| {
        let t_in = required(input.cooling_water_inlet_temp_c, "cooling_water_inlet_temp_c")?;
        let t_out = l.value(Field::OutletTemperature)?;
        let od = required(input.tube_outer_diameter_mm, "tube_outer_diameter_mm")?;
        let wall = required(input.tube_wall_thickness_mm, "tube_wall_thickness_mm")?;
        let passes = required(input.passes, "passes")?;
        let velocity = l.value(Field::TubeVelocity)?;
        let length = l.value(Field::TubeLength)?;
        let resistance = approximate_frictional_water_resistance(
            inner_diameter_mm(od, wall)?,
            velocity,
            length,
            passes.get(),
            (t_in + t_out) / 2.0,
        )?;
        Ok(margin * 0.001 * resistance)
    });
}

/// (13) 단말 온도차 = 포화 온도 − 냉각수 출구 온도
fn terminal_difference(l: &mut Ledger<'_>) {
    l.derive(Field::TerminalTemperatureDifference, |l| {
        Ok(l.value(Field::SaturationTemperature)? - l.value(Field::OutletTemperature)?)
    });
}
