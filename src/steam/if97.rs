//! IAPWS-IF97 포화선 계산. Region 4 포화 방정식과 seuif97의 Region 1 물성을 조합한다.
//! 입력 압력은 MPa(abs), 출력 온도는 °C, 엔탈피는 kJ/kg.

use seuif97::{pt, OH};

use crate::correlations::saturation::check_pressure;
use crate::correlations::{round_to, SaturationState};
use crate::error::{CalcResult, ValidationError};

// ---------------- Region 4 (포화) ----------------
const P4_STAR_MPA: f64 = 22.064;
const T4_STAR_K: f64 = 647.096;
const R4_N: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];
const KELVIN_OFFSET: f64 = 273.15;

/// ln(p/p*)·(T/T*) 에 해당하는 포화선 다항식
fn region4_series(theta: f64) -> f64 {
    R4_N[0] * theta
        + R4_N[1] * theta.powf(1.5)
        + R4_N[2] * theta.powi(3)
        + R4_N[3] * theta.powf(3.5)
        + R4_N[4] * theta.powi(4)
        + R4_N[5] * theta.powf(7.5)
}

fn region4_series_derivative(theta: f64) -> f64 {
    R4_N[0]
        + 1.5 * R4_N[1] * theta.powf(0.5)
        + 3.0 * R4_N[2] * theta.powi(2)
        + 3.5 * R4_N[3] * theta.powf(2.5)
        + 4.0 * R4_N[4] * theta.powi(3)
        + 7.5 * R4_N[5] * theta.powf(6.5)
}

/// 포화압력(MPa) - 입력 온도는 °C.
pub fn saturation_pressure_mpa(t_c: f64) -> CalcResult<f64> {
    let t_k = t_c + KELVIN_OFFSET;
    if !t_k.is_finite() || t_k <= KELVIN_OFFSET || t_k > T4_STAR_K {
        return Err(ValidationError::OutOfRange {
            name: "saturation_temperature_c",
            value: t_c,
            constraint: "0 ~ 373.946 °C",
        });
    }
    let theta = 1.0 - t_k / T4_STAR_K;
    Ok(P4_STAR_MPA * ((T4_STAR_K / t_k) * region4_series(theta)).exp())
}

/// 포화온도(°C) - 입력 압력은 MPa abs. 100 °C에서 출발하는 뉴턴 반복.
pub fn saturation_temperature_c(p_mpa: f64) -> CalcResult<f64> {
    let p_mpa = check_pressure(p_mpa)?;
    let target = (p_mpa / P4_STAR_MPA).ln();
    let mut t_k = 373.15_f64;
    for _ in 0..30 {
        // 임계점 부근에서 반복값이 T*를 살짝 넘어도 θ^1.5 등이 NaN이 되지 않게 한다
        let theta = (1.0 - t_k / T4_STAR_K).max(0.0);
        let series = region4_series(theta);
        let f = (T4_STAR_K / t_k) * series - target;
        let dfd_t = -(T4_STAR_K / t_k.powi(2)) * series
            - (1.0 / t_k) * region4_series_derivative(theta);
        let delta = f / dfd_t;
        t_k -= delta;
        if delta.abs() < 1e-8 {
            break;
        }
    }
    if !t_k.is_finite() {
        return Err(ValidationError::NotFinite {
            name: "saturation_temperature_c",
            value: t_k,
        });
    }
    Ok(t_k - KELVIN_OFFSET)
}

/// 압력(MPa)에서의 포화 온도와 포화수 엔탈피(소수 3자리).
pub fn saturation_state(p_mpa: f64) -> CalcResult<SaturationState> {
    let t_sat = saturation_temperature_c(p_mpa)?;
    // 포화선 위의 액상은 Region 1로 강제 계산
    let h_f = pt(p_mpa, t_sat, (OH, 1));
    if !h_f.is_finite() {
        return Err(ValidationError::NotFinite {
            name: "saturated_liquid_enthalpy_kj_kg",
            value: h_f,
        });
    }
    Ok(SaturationState {
        temperature_c: round_to(t_sat, 3),
        liquid_enthalpy_kj_kg: round_to(h_f, 3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmospheric_boiling_point() {
        let t = saturation_temperature_c(0.101325).unwrap();
        assert!((t - 100.0).abs() < 0.05, "t_sat = {t}");
    }

    #[test]
    fn pressure_and_temperature_are_inverse() {
        for p in [0.005, 0.01, 0.1, 1.0, 10.0] {
            let t = saturation_temperature_c(p).unwrap();
            let back = saturation_pressure_mpa(t).unwrap();
            assert!((back - p).abs() / p < 1e-6, "p = {p}, back = {back}");
        }
    }

    #[test]
    fn condenser_vacuum_state() {
        // 10 kPa: t_sat ≈ 45.81 °C, h_f ≈ 191.8 kJ/kg
        let s = saturation_state(0.01).unwrap();
        assert!((s.temperature_c - 45.81).abs() < 0.05);
        assert!((s.liquid_enthalpy_kj_kg - 191.8).abs() < 0.5);
    }
}
