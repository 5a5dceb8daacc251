//! 파이프라인과 표 보간의 성질 테스트.
use condenser_design::config::Config;
use condenser_design::correlations::{
    log_mean_temperature_difference, nozzle_inner_diameter, uncorrected_heat_transfer_coefficient,
    water_side_temperature_correction, SaturationModel,
};
use condenser_design::interp::interpolate;
use condenser_design::pipeline::{self, DesignReport};
use condenser_design::record::{
    CoolingWaterSpec, DesignInput, Field, Outcome, SkipReason, StructureSpec,
};
use proptest::prelude::*;

const REMOVABLE_INPUTS: u32 = 15;

fn vacuum_config() -> Config {
    Config {
        saturation_model: SaturationModel::If97,
        ..Config::default()
    }
}

/// 모든 항목이 계산되는 0.01 MPa 복수기 입력
fn vacuum_input() -> DesignInput {
    DesignInput {
        steam_pressure_mpa: Some(0.01),
        steam_enthalpy_kj_kg: Some(2_500.0),
        ..DesignInput::template()
    }
}

/// 0.01 MPa 기준 입력의 자동 설계 결과(관 882개, 5774 mm, 400 m²)를 다른 구조 모드로 준다.
fn structures() -> [StructureSpec; 3] {
    [
        StructureSpec::Auto,
        StructureSpec::GivenStructure {
            tube_count: Some(882),
            tube_length_mm: Some(5_774.0),
        },
        StructureSpec::FixedArea {
            design_area_m2: Some(400.0),
            tube_count: Some(882),
        },
    ]
}

fn structure_strategy() -> impl Strategy<Value = StructureSpec> {
    let [auto, given, fixed] = structures();
    prop_oneof![Just(auto), Just(given), Just(fixed)]
}

/// `mask`의 비트마다 입력 하나를 비운다.
fn drop_inputs(mut input: DesignInput, mask: u32) -> DesignInput {
    let on = |bit: u32| mask & (1 << bit) != 0;
    if on(0) {
        input.steam_pressure_mpa = None;
    }
    if on(1) {
        input.steam_mass_flow_kg_h = None;
    }
    if on(2) {
        input.steam_enthalpy_kj_kg = None;
    }
    if on(3) {
        input.tube_outer_diameter_mm = None;
    }
    if on(4) {
        input.tube_wall_thickness_mm = None;
    }
    if on(5) {
        input.tube_pitch_mm = None;
    }
    if on(6) {
        input.material = None;
    }
    if on(7) {
        input.passes = None;
    }
    if on(8) {
        input.cooling_water_nozzle_count = None;
    }
    if on(9) {
        input.cooling_water_inlet_temp_c = None;
    }
    if on(10) {
        input.water_cp_kj_kgk = None;
    }
    if on(11) {
        input.water_density_kg_m3 = None;
    }
    if on(12) {
        input.cleanliness_factor = None;
    }
    if on(13) {
        input.cooling_water = CoolingWaterSpec::TemperatureRiseGiven { temp_rise_c: None };
    }
    if on(14) {
        input.target_velocity_m_s = None;
    }
    input
}

fn computed(report: &DesignReport) -> Vec<Field> {
    report
        .fields()
        .iter()
        .filter(|f| f.outcome.is_computed())
        .map(|f| f.field)
        .collect()
}

#[test]
fn baseline_computes_every_field() {
    for structure in structures() {
        let input = DesignInput {
            structure: structure.clone(),
            ..vacuum_input()
        };
        let report = pipeline::run(&input, &vacuum_config());
        assert!(report.failure().is_none(), "{structure:?}");
        assert_eq!(computed(&report), Field::ALL.to_vec(), "{structure:?}");
    }
}

#[test]
fn missing_pressure_leaves_independent_steps_alone() {
    let config = vacuum_config();
    let report = pipeline::run(&drop_inputs(vacuum_input(), 1), &config);
    assert!(report.failure().is_none());
    assert_eq!(
        computed(&report),
        vec![
            Field::MaterialCorrection,
            Field::WaterCorrection,
            Field::UncorrectedU,
            Field::UncorrectedUImperial,
            Field::CorrectedU,
            Field::Cleanliness,
            Field::TubeVelocity,
            Field::CondensateNozzleDiameter,
        ]
    );
}

proptest! {
    #[test]
    fn dropping_inputs_only_skips(
        mask in 0u32..(1 << REMOVABLE_INPUTS),
        structure in structure_strategy(),
    ) {
        let config = vacuum_config();
        let baseline = DesignInput { structure, ..vacuum_input() };
        let full = pipeline::run(&baseline, &config);
        let reduced = pipeline::run(&drop_inputs(baseline, mask), &config);

        prop_assert!(reduced.failure().is_none());
        for entry in reduced.fields() {
            match &entry.outcome {
                Outcome::Computed(v) => {
                    prop_assert_eq!(Some(*v), full.value(entry.field), "{:?}", entry.field);
                }
                Outcome::Skipped(SkipReason::Upstream(source)) => {
                    prop_assert!(!reduced.get(*source).is_computed());
                }
                Outcome::Skipped(SkipReason::MissingInput(_)) => {}
                other => prop_assert!(false, "{:?}: unexpected {:?}", entry.field, other),
            }
        }
    }

    #[test]
    fn runs_are_idempotent(
        t_in in 5.0f64..35.0,
        rise in 2.0f64..12.0,
        velocity in 1.0f64..3.5,
        cleanliness in 0.5f64..1.0,
    ) {
        let input = DesignInput {
            cooling_water_inlet_temp_c: Some(t_in),
            cooling_water: CoolingWaterSpec::TemperatureRiseGiven { temp_rise_c: Some(rise) },
            target_velocity_m_s: Some(velocity),
            cleanliness_factor: Some(cleanliness),
            ..vacuum_input()
        };
        let config = vacuum_config();
        prop_assert_eq!(pipeline::run(&input, &config), pipeline::run(&input, &config));
    }

    #[test]
    fn water_correction_stays_within_table(t in -20.0f64..80.0) {
        let correction = water_side_temperature_correction(t).expect("finite input");
        prop_assert!((0.655..=1.12).contains(&correction.factor));
        prop_assert_eq!(correction.clamped, !(0.0..=45.0).contains(&t));
    }

    #[test]
    fn interpolation_is_bounded_by_neighbours(x in -5.0f64..15.0) {
        let xs = [0.0, 2.0, 5.0, 10.0];
        let ys = [1.0, 4.0, 3.0, 8.0];
        let hit = interpolate(&xs, &ys, x).expect("valid grid");
        if x <= 0.0 {
            prop_assert_eq!(hit.value, 1.0);
        } else if x >= 10.0 {
            prop_assert_eq!(hit.value, 8.0);
        } else {
            let i = xs.windows(2).position(|w| x >= w[0] && x <= w[1]).expect("bracket");
            let (lo, hi) = (ys[i].min(ys[i + 1]), ys[i].max(ys[i + 1]));
            prop_assert!(hit.value >= lo - 1e-12 && hit.value <= hi + 1e-12);
        }
    }

    #[test]
    fn heat_transfer_coefficient_within_table(od in 15.875f64..=50.8, v in 0.92f64..3.65) {
        let u = uncorrected_heat_transfer_coefficient(od, v).expect("inside table");
        prop_assert!((427.8..=895.6).contains(&u.imperial));
    }

    #[test]
    fn lmtd_lies_between_terminal_differences(
        t_in in 0.0f64..40.0,
        rise in 0.5f64..20.0,
        gap in 2.9f64..30.0,
    ) {
        let t_out = t_in + rise;
        let t_sat = t_out + gap;
        let lmtd = log_mean_temperature_difference(t_sat, t_in, t_out).expect("ordered");
        prop_assert!(lmtd >= gap - 1e-4 && lmtd <= t_sat - t_in + 1e-4);
    }

    #[test]
    fn nozzle_is_stock_size_and_large_enough(mass in 0.1f64..500.0) {
        let d = nozzle_inner_diameter(mass, 0.5, 1.0, 1000.0).expect("nozzle");
        prop_assert_eq!(d % 50, 0);
        let bare_mm = (4.0 * mass / 1000.0 / std::f64::consts::PI).sqrt() * 1000.0;
        prop_assert!(f64::from(d) >= bare_mm);
    }
}
