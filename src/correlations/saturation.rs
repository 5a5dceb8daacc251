//! 포화 온도/포화수 엔탈피 근사식과 증기 열부하.

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::error::{finite, positive, CalcResult, ValidationError};
use crate::steam::if97;

/// 물의 임계압력(MPa)
pub const CRITICAL_PRESSURE_MPA: f64 = 22.064;
/// 근사식이 받는 최저 압력(MPa, 1 kPa)
pub const MIN_PRESSURE_MPA: f64 = 0.001;

/// 포화 상태 근사값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaturationState {
    /// 포화 온도(°C)
    pub temperature_c: f64,
    /// 포화수(액) 비엔탈피(kJ/kg)
    pub liquid_enthalpy_kj_kg: f64,
}

/// 포화 상태 계산에 쓸 모델.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationModel {
    /// 압력 구간별 경험식(기본값)
    #[default]
    CurveFit,
    /// IAPWS-IF97 (seuif97 위임)
    If97,
}

impl SaturationModel {
    /// 선택된 모델로 포화 상태를 계산한다.
    pub fn evaluate(self, pressure_mpa: f64) -> CalcResult<SaturationState> {
        match self {
            SaturationModel::CurveFit => saturation_approximation(pressure_mpa),
            SaturationModel::If97 => if97::saturation_state(pressure_mpa),
        }
    }
}

/// 압력 범위 검사(0 < p ≤ 임계압력, p ≥ 1 kPa).
pub(crate) fn check_pressure(pressure_mpa: f64) -> CalcResult<f64> {
    positive("steam_pressure_mpa", pressure_mpa)?;
    if pressure_mpa > CRITICAL_PRESSURE_MPA {
        return Err(ValidationError::OutOfRange {
            name: "steam_pressure_mpa",
            value: pressure_mpa,
            constraint: "<= 22.064 MPa (임계압력)",
        });
    }
    if pressure_mpa < MIN_PRESSURE_MPA {
        return Err(ValidationError::OutOfRange {
            name: "steam_pressure_mpa",
            value: pressure_mpa,
            constraint: ">= 0.001 MPa (1 kPa)",
        });
    }
    Ok(pressure_mpa)
}

/// 압력(MPa)으로부터 포화 온도와 포화수 엔탈피를 근사한다.
///
/// 압력 구간(≤0.1, ≤1.0, >1.0 MPa)별 경험식으로 온도를 구하고,
/// 엔탈피는 온도의 2차식 h = 4.2·T + 0.0015·T² 로 구한다. 두 값 모두 소수 3자리.
/// IF97 전체 구현이 아니므로 저압 영역에서는 오차가 크다.
pub fn saturation_approximation(pressure_mpa: f64) -> CalcResult<SaturationState> {
    let p = check_pressure(pressure_mpa)?;
    let t_sat = if p <= 0.1 {
        10.1967 * p.powf(0.25) - 0.3667
    } else if p <= 1.0 {
        45.0 + 45.0 * (p * 10.0).log10()
    } else {
        100.0 + 50.0 * p.log10()
    };
    let h_water = 4.2 * t_sat + 0.0015 * t_sat * t_sat;
    Ok(SaturationState {
        temperature_c: round_to(t_sat, 3),
        liquid_enthalpy_kj_kg: round_to(h_water, 3),
    })
}

/// 증기 열부하(kJ/s = kW): (h_steam − h_water) × 질량유량(kg/s), 소수 3자리.
///
/// 증기 엔탈피가 포화수 엔탈피 이하이면 응축 열이 없으므로 거부한다.
pub fn heat_duty_from_steam(
    saturation: &SaturationState,
    steam_enthalpy_kj_kg: f64,
    steam_flow_kg_s: f64,
) -> CalcResult<f64> {
    finite("saturation_temperature_c", saturation.temperature_c)?;
    finite("liquid_enthalpy_kj_kg", saturation.liquid_enthalpy_kj_kg)?;
    positive("steam_enthalpy_kj_kg", steam_enthalpy_kj_kg)?;
    positive("steam_mass_flow_kg_s", steam_flow_kg_s)?;
    if steam_enthalpy_kj_kg <= saturation.liquid_enthalpy_kj_kg {
        return Err(ValidationError::OutOfRange {
            name: "steam_enthalpy_kj_kg",
            value: steam_enthalpy_kj_kg,
            constraint: "> 포화수 엔탈피 h_f",
        });
    }
    let duty = (steam_enthalpy_kj_kg - saturation.liquid_enthalpy_kj_kg) * steam_flow_kg_s;
    Ok(round_to(duty, 3))
}
