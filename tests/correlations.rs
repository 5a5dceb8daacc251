//! 상관식 회귀 테스트. 기대값은 설계 계산표의 검증 예제에서 가져왔다.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use condenser_design::correlations::{
    approximate_frictional_water_resistance, default_pitch_mm, fouling_to_cleanliness,
    heat_duty_from_steam, log_mean_temperature_difference, material_wall_correction,
    nozzle_inner_diameter,
    saturation_approximation, surface_area_from_duty, tube_count_from_target_velocity,
    tube_length_from_area, tube_sheet_diameter_estimate, uncorrected_heat_transfer_coefficient,
    velocity_from_tube_count, water_side_temperature_correction,
};
use condenser_design::error::ValidationError;
use condenser_design::units::mm_to_inch;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

#[test]
fn lmtd_reference_case() {
    let lmtd = log_mean_temperature_difference(45.808, 32.0, 40.0).expect("lmtd");
    assert_close("lmtd", lmtd, 9.2377, 1e-9);
}

#[test]
fn lmtd_rejects_outlet_above_saturation() {
    let err = log_mean_temperature_difference(40.0, 32.0, 45.0).unwrap_err();
    assert_eq!(
        err,
        ValidationError::TemperatureOrder {
            t_sat: 40.0,
            t_in: 32.0,
            t_out: 45.0
        }
    );
}

#[test]
fn lmtd_rejects_small_terminal_difference() {
    let err = log_mean_temperature_difference(42.0, 32.0, 40.0).unwrap_err();
    assert!(matches!(err, ValidationError::TerminalDifference { .. }));
}

#[test]
fn lmtd_degenerate_deltas_use_common_value() {
    // ΔT1 − ΔT2 = 0.0005 °C < 0.001 °C
    let lmtd = log_mean_temperature_difference(50.0, 40.0, 40.0005).expect("degenerate");
    assert_eq!(lmtd, 10.0);
    assert!(lmtd.is_finite());
}

#[test]
fn material_grid_point_is_exact() {
    let factor = material_wall_correction("SS TP 304", 0.049).expect("material");
    assert_eq!(factor, 0.754);
}

#[test]
fn material_lookup_interpolates_between_grid_points() {
    let ss = material_wall_correction("ss tp 304", mm_to_inch(1.0)).expect("1 mm");
    assert_close("ss 1mm", ss, 0.8015, 1e-12);
    let admiralty = material_wall_correction("Admiralty", 0.03).expect("admiralty");
    assert_close("admiralty", admiralty, 1.0187, 1e-12);
}

#[test]
fn material_rejects_unknown_name_and_thickness_outside_table() {
    assert_eq!(
        material_wall_correction("Unobtainium", 0.049),
        Err(ValidationError::UnknownMaterial {
            material: "Unobtainium".to_string()
        })
    );
    assert!(matches!(
        material_wall_correction("SS TP 304", 0.2),
        Err(ValidationError::OutOfRange { .. })
    ));
}

#[test]
fn heat_transfer_coefficient_table_points() {
    let u = uncorrected_heat_transfer_coefficient(25.4, 2.0).expect("25.4 mm / 2 m/s");
    assert_close("u 25.4/2.0", u.imperial, 673.6, 1e-9);
    assert_relative_eq!(u.metric, 673.6 * 5.678, max_relative = 1e-12);

    let between = uncorrected_heat_transfer_coefficient(30.0, 2.2).expect("30 mm");
    assert_close("u 30/2.2", between.imperial, 695.7, 1e-9);

    let small = uncorrected_heat_transfer_coefficient(15.875, 3.6).expect("15.875 mm");
    assert_close("u 15.875/3.6", small.imperial, 890.0, 1e-9);

    // 12 ft/s는 표의 마지막 격자점
    let edge = uncorrected_heat_transfer_coefficient(19.05, 12.0 * 0.3048).expect("edge");
    assert_close("u edge", edge.imperial, 895.6, 1e-9);
}

#[test]
fn heat_transfer_coefficient_fails_outside_table() {
    for (od, v) in [(14.0, 2.0), (51.0, 2.0), (25.4, 0.5), (25.4, 3.7)] {
        assert!(
            matches!(
                uncorrected_heat_transfer_coefficient(od, v),
                Err(ValidationError::OutOfRange { .. })
            ),
            "od={od} v={v} should be rejected"
        );
    }
}

#[test]
fn fouling_to_cleanliness_reference_case() {
    let cf = fouling_to_cleanliness(0.000343, 25.0, 1.0, 3468.45).expect("fouling");
    assert_close("cleanliness", cf, 0.4361, 1e-4);
}

#[test]
fn fouling_rejects_wall_thicker_than_radius() {
    assert!(matches!(
        fouling_to_cleanliness(0.0001, 20.0, 10.0, 3000.0),
        Err(ValidationError::NonPositiveInnerDiameter { .. })
    ));
}

#[test]
fn surface_area_reference_case() {
    let area = surface_area_from_duty(1000.0, 10.0, 4000.0, 1.0, 0.9, 0.85).expect("area");
    assert_close("area", area, 32.68, 1e-9);
    assert!(surface_area_from_duty(1000.0, 10.0, 4000.0, 1.0, 0.9, 0.0).is_err());
}

#[test]
fn tube_bundle_reference_cases() {
    let n = tube_count_from_target_velocity(100.0, 2.0, 25.0, 1.0, 2).expect("count");
    assert_eq!(n, 67);

    let length = tube_length_from_area(1000.0, 1000, 25.0).expect("length");
    assert_eq!(length, 12732.0);

    let v = velocity_from_tube_count(100.0, 67, 25.0, 1.0, 2).expect("velocity");
    assert_close("velocity", v, 1.996, 1e-12);
}

#[test]
fn tube_length_floors_at_one_millimetre() {
    let length = tube_length_from_area(1e-6, 1000, 25.0).expect("tiny area");
    assert_eq!(length, 1.0);
}

#[test]
fn tube_sheet_reference_case() {
    let d = tube_sheet_diameter_estimate(25.0, 6750, 4, 32.0).expect("tube sheet");
    assert_abs_diff_eq!(d, 4072.935, epsilon = 1e-3);
}

#[test]
fn tube_sheet_requires_pitch_above_diameter() {
    assert_eq!(
        tube_sheet_diameter_estimate(25.0, 100, 2, 25.0),
        Err(ValidationError::PitchNotAboveDiameter {
            pitch_mm: 25.0,
            outer_diameter_mm: 25.0
        })
    );
}

#[test]
fn default_pitch_snaps_to_standard_sizes() {
    // (외경, 기대 피치): 1.25·Do 경계 25 / 30 / 32 / 38 mm
    let cases = [
        (19.0, 25.0),
        (20.0, 30.0),
        (22.0, 30.0),
        (24.0, 32.0),
        (25.0, 32.0),
        (25.5, 32.0),
        (26.0, 38.0),
        (30.0, 38.0),
        (30.5, 38.1),
        (40.0, 50.0),
    ];
    for (od, expected) in cases {
        assert_eq!(default_pitch_mm(od), Ok(expected), "Do = {od}");
    }
    assert!(default_pitch_mm(0.0).is_err());
    assert!(default_pitch_mm(f64::NAN).is_err());
}

#[test]
fn nozzle_rounds_up_to_stock_size() {
    // 72 kg/s 물, 최대 1 m/s → 내경 302.8 mm → 350 mm
    assert_eq!(nozzle_inner_diameter(72.0, 0.5, 1.0, 1000.0), Ok(350));
}

#[test]
fn pressure_drop_reference_case() {
    let dp = approximate_frictional_water_resistance(23.6, 2.1, 12800.0, 2, 38.5)
        .expect("pressure drop");
    assert_close("dp", dp, 280_411.497_108_4, 1e-6);
}

#[test]
fn water_correction_interpolates_and_clamps() {
    let at_grid = water_side_temperature_correction(20.0).expect("20C");
    assert_eq!((at_grid.factor, at_grid.clamped), (0.99, false));

    let between = water_side_temperature_correction(32.0).expect("32C");
    assert_close("fw 32C", between.factor, 1.077, 1e-12);

    let hot = water_side_temperature_correction(50.0).expect("50C");
    assert_eq!((hot.factor, hot.clamped), (1.12, true));
}

#[test]
fn saturation_curve_fit_branches() {
    let low = saturation_approximation(0.01).expect("0.01 MPa");
    assert_close("t 0.01", low.temperature_c, 2.858, 1e-3);

    let mid = saturation_approximation(0.2).expect("0.2 MPa");
    assert_close("t 0.2", mid.temperature_c, 58.546, 1e-9);
    assert_close("h 0.2", mid.liquid_enthalpy_kj_kg, 251.036, 1e-9);

    let high = saturation_approximation(10.0).expect("10 MPa");
    assert_close("t 10", high.temperature_c, 150.0, 1e-9);

    assert!(saturation_approximation(0.0005).is_err());
    assert!(saturation_approximation(23.0).is_err());
    assert!(saturation_approximation(f64::NAN).is_err());
}

#[test]
fn heat_duty_uses_liquid_enthalpy() {
    let state = saturation_approximation(0.2).expect("state");
    let duty = heat_duty_from_steam(&state, 2700.0, 20_000.0 / 3600.0).expect("duty");
    assert_close("duty", duty, 13_605.356, 1e-9);
    assert!(heat_duty_from_steam(&state, 2700.0, 0.0).is_err());
}

#[test]
fn heat_duty_rejects_enthalpy_below_saturated_liquid() {
    let state = saturation_approximation(0.2).expect("state");
    let err = heat_duty_from_steam(&state, 200.0, 20_000.0 / 3600.0).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::OutOfRange {
            name: "steam_enthalpy_kj_kg",
            ..
        }
    ));
    let at_liquid = state.liquid_enthalpy_kj_kg;
    assert!(heat_duty_from_steam(&state, at_liquid, 1.0).is_err());
}
