//! 설계 레코드: 계산 입력과 출력 항목 정의.
//!
//! 입력은 모두 `Option`이다. `None`은 "입력하지 않음"을 뜻하며 0이나 빈 문자열과 구분된다.
//! 출력은 항목마다 [`Outcome`]으로 계산됨/건너뜀/검증 실패를 구분한다.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::correlations::default_pitch_mm;
use crate::error::{AppError, ValidationError};

/// 냉각수 패스 수(1, 2, 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PassCount {
    One,
    Two,
    Four,
}

impl PassCount {
    pub const ALL: [PassCount; 3] = [PassCount::One, PassCount::Two, PassCount::Four];

    pub fn get(self) -> u32 {
        match self {
            PassCount::One => 1,
            PassCount::Two => 2,
            PassCount::Four => 4,
        }
    }
}

impl TryFrom<u32> for PassCount {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PassCount::One),
            2 => Ok(PassCount::Two),
            4 => Ok(PassCount::Four),
            _ => Err(ValidationError::PassCount { value }),
        }
    }
}

impl From<PassCount> for u32 {
    fn from(value: PassCount) -> Self {
        value.get()
    }
}

/// 냉각수 노즐 수(1 또는 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum NozzleCount {
    One,
    Two,
}

impl NozzleCount {
    pub fn get(self) -> u32 {
        match self {
            NozzleCount::One => 1,
            NozzleCount::Two => 2,
        }
    }
}

impl TryFrom<u32> for NozzleCount {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NozzleCount::One),
            2 => Ok(NozzleCount::Two),
            _ => Err(ValidationError::OutOfRange {
                name: "cooling_water_nozzle_count",
                value: f64::from(value),
                constraint: "1 또는 2",
            }),
        }
    }
}

impl From<NozzleCount> for u32 {
    fn from(value: NozzleCount) -> Self {
        value.get()
    }
}

/// 냉각수 계산 모드와 그에 딸린 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CoolingWaterSpec {
    /// 온도 상승을 주고 유량을 구한다.
    TemperatureRiseGiven { temp_rise_c: Option<f64> },
    /// 체적 유량을 주고 온도 상승을 구한다.
    FlowGiven { flow_m3_h: Option<f64> },
}

impl Default for CoolingWaterSpec {
    fn default() -> Self {
        CoolingWaterSpec::TemperatureRiseGiven { temp_rise_c: None }
    }
}

impl CoolingWaterSpec {
    pub fn mode(&self) -> CoolingWaterMode {
        match self {
            CoolingWaterSpec::TemperatureRiseGiven { .. } => CoolingWaterMode::TemperatureRiseGiven,
            CoolingWaterSpec::FlowGiven { .. } => CoolingWaterMode::FlowGiven,
        }
    }
}

/// 냉각수 계산 모드 선택지. 입력 화면은 이 목록을 그대로 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolingWaterMode {
    TemperatureRiseGiven,
    FlowGiven,
}

impl CoolingWaterMode {
    pub const ALL: [CoolingWaterMode; 2] = [
        CoolingWaterMode::TemperatureRiseGiven,
        CoolingWaterMode::FlowGiven,
    ];
}

impl fmt::Display for CoolingWaterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoolingWaterMode::TemperatureRiseGiven => "온도 상승 입력",
            CoolingWaterMode::FlowGiven => "유량 입력",
        };
        write!(f, "{s}")
    }
}

/// 관군 구조 결정 방식과 그에 딸린 입력값.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StructureSpec {
    /// 목표 유속으로 관 수를, 설계 면적으로 관 길이를 정한다.
    #[default]
    Auto,
    /// 관 수와 길이를 주고 면적과 유속을 역산한다.
    GivenStructure {
        tube_count: Option<u32>,
        tube_length_mm: Option<f64>,
    },
    /// 설계 면적과 관 수를 주고 관 길이와 유속을 역산한다.
    FixedArea {
        design_area_m2: Option<f64>,
        tube_count: Option<u32>,
    },
}

impl StructureSpec {
    pub fn mode(&self) -> StructureMode {
        match self {
            StructureSpec::Auto => StructureMode::Auto,
            StructureSpec::GivenStructure { .. } => StructureMode::GivenStructure,
            StructureSpec::FixedArea { .. } => StructureMode::FixedArea,
        }
    }
}

/// 관군 구조 모드 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureMode {
    Auto,
    GivenStructure,
    FixedArea,
}

impl StructureMode {
    pub const ALL: [StructureMode; 3] = [
        StructureMode::Auto,
        StructureMode::GivenStructure,
        StructureMode::FixedArea,
    ];
}

impl fmt::Display for StructureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StructureMode::Auto => "자동",
            StructureMode::GivenStructure => "관 수/길이 지정",
            StructureMode::FixedArea => "면적 고정",
        };
        write!(f, "{s}")
    }
}

/// 복수기 설계 입력. 한 번의 계산에 하나씩 만들어 파이프라인에 넘긴다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInput {
    // 식별 정보
    pub project_name: Option<String>,
    pub working_condition: Option<String>,

    // 증기 조건
    /// 증기 압력(MPa, 절대)
    pub steam_pressure_mpa: Option<f64>,
    /// 증기 질량유량(kg/h)
    pub steam_mass_flow_kg_h: Option<f64>,
    /// 증기 비엔탈피(kJ/kg)
    pub steam_enthalpy_kj_kg: Option<f64>,

    // 관/재질
    pub tube_outer_diameter_mm: Option<f64>,
    pub tube_wall_thickness_mm: Option<f64>,
    /// 관 피치(mm). 없으면 외경으로부터 [`crate::correlations::default_pitch_mm`]로 정한다.
    pub tube_pitch_mm: Option<f64>,
    /// 재질명, [`crate::material_db::material_names`] 중 하나
    pub material: Option<String>,
    pub passes: Option<PassCount>,
    pub cooling_water_nozzle_count: Option<NozzleCount>,

    // 냉각수
    pub cooling_water_inlet_temp_c: Option<f64>,
    /// 비열(kJ/kg·K)
    pub water_cp_kj_kgk: Option<f64>,
    pub water_density_kg_m3: Option<f64>,
    /// 청결계수 (0, 1]
    pub cleanliness_factor: Option<f64>,
    /// 오염계수(m²·K/W). 0보다 크면 청결계수보다 우선한다.
    pub fouling_factor_m2k_w: Option<f64>,
    pub cooling_water: CoolingWaterSpec,

    // 구조
    /// 관내 목표 유속(m/s). Auto 모드 관 수 산정과 전열계수에 쓰인다.
    pub target_velocity_m_s: Option<f64>,
    pub structure: StructureSpec,
}

impl DesignInput {
    /// TOML 문자열에서 설계 입력을 읽는다.
    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// TOML 파일에서 설계 입력을 읽는다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 입력 파일 작성용 예시. 0.2 MPa 공정용 복수기, 자동 구조 모드.
    pub fn template() -> Self {
        Self {
            project_name: Some("예시 복수기".to_string()),
            working_condition: Some("정격 부하".to_string()),
            steam_pressure_mpa: Some(0.2),
            steam_mass_flow_kg_h: Some(20_000.0),
            steam_enthalpy_kj_kg: Some(2_700.0),
            tube_outer_diameter_mm: Some(25.0),
            tube_wall_thickness_mm: Some(0.7),
            tube_pitch_mm: default_pitch_mm(25.0).ok(),
            material: Some("Titanium Grades 1 &2".to_string()),
            passes: Some(PassCount::Two),
            cooling_water_nozzle_count: Some(NozzleCount::Two),
            cooling_water_inlet_temp_c: Some(30.0),
            water_cp_kj_kgk: Some(4.18),
            water_density_kg_m3: Some(995.0),
            cleanliness_factor: Some(0.85),
            fouling_factor_m2k_w: None,
            cooling_water: CoolingWaterSpec::TemperatureRiseGiven {
                temp_rise_c: Some(8.0),
            },
            target_velocity_m_s: Some(2.0),
            structure: StructureSpec::Auto,
        }
    }
}

/// 파이프라인이 만들어내는 출력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SaturationTemperature,
    SaturatedLiquidEnthalpy,
    HeatDuty,
    WaterMassFlow,
    WaterVolumetricFlow,
    TemperatureRise,
    OutletTemperature,
    MaterialCorrection,
    WaterCorrection,
    UncorrectedU,
    UncorrectedUImperial,
    CorrectedU,
    Lmtd,
    Cleanliness,
    RequiredArea,
    DesignArea,
    TubeCount,
    TubeLength,
    TubeVelocity,
    TubeSheetDiameter,
    CondensateNozzleDiameter,
    CoolingWaterNozzleDiameter,
    LengthDiameterRatio,
    TotalPressureDrop,
    TerminalTemperatureDifference,
}

impl Field {
    pub const ALL: [Field; 25] = [
        Field::SaturationTemperature,
        Field::SaturatedLiquidEnthalpy,
        Field::HeatDuty,
        Field::WaterMassFlow,
        Field::WaterVolumetricFlow,
        Field::TemperatureRise,
        Field::OutletTemperature,
        Field::MaterialCorrection,
        Field::WaterCorrection,
        Field::UncorrectedU,
        Field::UncorrectedUImperial,
        Field::CorrectedU,
        Field::Lmtd,
        Field::Cleanliness,
        Field::RequiredArea,
        Field::DesignArea,
        Field::TubeCount,
        Field::TubeLength,
        Field::TubeVelocity,
        Field::TubeSheetDiameter,
        Field::CondensateNozzleDiameter,
        Field::CoolingWaterNozzleDiameter,
        Field::LengthDiameterRatio,
        Field::TotalPressureDrop,
        Field::TerminalTemperatureDifference,
    ];

    /// 화면 표시용 이름
    pub fn label(self) -> &'static str {
        match self {
            Field::SaturationTemperature => "포화 온도",
            Field::SaturatedLiquidEnthalpy => "포화수 엔탈피",
            Field::HeatDuty => "열부하",
            Field::WaterMassFlow => "냉각수 질량유량",
            Field::WaterVolumetricFlow => "냉각수 체적유량",
            Field::TemperatureRise => "냉각수 온도 상승",
            Field::OutletTemperature => "냉각수 출구 온도",
            Field::MaterialCorrection => "재질 보정계수",
            Field::WaterCorrection => "수온 보정계수",
            Field::UncorrectedU => "미보정 전열계수",
            Field::UncorrectedUImperial => "미보정 전열계수(영국 단위)",
            Field::CorrectedU => "보정 전열계수",
            Field::Lmtd => "대수평균온도차",
            Field::Cleanliness => "청결계수",
            Field::RequiredArea => "필요 전열면적",
            Field::DesignArea => "설계 전열면적",
            Field::TubeCount => "관 수",
            Field::TubeLength => "관 길이",
            Field::TubeVelocity => "관내 유속",
            Field::TubeSheetDiameter => "관판 외경",
            Field::CondensateNozzleDiameter => "응축수 노즐 내경",
            Field::CoolingWaterNozzleDiameter => "냉각수 노즐 내경",
            Field::LengthDiameterRatio => "길이/직경 비",
            Field::TotalPressureDrop => "총 압력 손실",
            Field::TerminalTemperatureDifference => "단말 온도차",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::SaturationTemperature
            | Field::TemperatureRise
            | Field::OutletTemperature
            | Field::Lmtd
            | Field::TerminalTemperatureDifference => "°C",
            Field::SaturatedLiquidEnthalpy => "kJ/kg",
            Field::HeatDuty => "kW",
            Field::WaterMassFlow => "kg/s",
            Field::WaterVolumetricFlow => "m³/h",
            Field::MaterialCorrection
            | Field::WaterCorrection
            | Field::Cleanliness
            | Field::LengthDiameterRatio => "-",
            Field::UncorrectedU | Field::CorrectedU => "W/(m²·K)",
            Field::UncorrectedUImperial => "Btu/(h·ft²·°F)",
            Field::RequiredArea | Field::DesignArea => "m²",
            Field::TubeCount => "개",
            Field::TubeLength
            | Field::TubeSheetDiameter
            | Field::CondensateNozzleDiameter
            | Field::CoolingWaterNozzleDiameter => "mm",
            Field::TubeVelocity => "m/s",
            Field::TotalPressureDrop => "kPa",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 값을 계산하지 않은 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "source", rename_all = "snake_case")]
pub enum SkipReason {
    /// 필요한 입력이 비어 있음(입력 항목 이름)
    MissingInput(&'static str),
    /// 앞 단계 출력이 계산되지 않음
    Upstream(Field),
    /// 선택한 모드에서는 쓰지 않는 항목
    NotApplicable,
    /// 앞 단계의 검증 실패로 계산이 중단됨
    Aborted(crate::pipeline::Step),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingInput(name) => write!(f, "입력 없음: {name}"),
            SkipReason::Upstream(field) => write!(f, "선행 값 없음: {field}"),
            SkipReason::NotApplicable => write!(f, "해당 없음"),
            SkipReason::Aborted(step) => write!(f, "{step} 단계 실패로 중단"),
        }
    }
}

/// 출력 항목 하나의 상태.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum Outcome<T> {
    Computed(T),
    Skipped(SkipReason),
    Failed(ValidationError),
}

impl<T: Copy> Outcome<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Outcome::Computed(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T> Outcome<T> {
    pub fn is_computed(&self) -> bool {
        matches!(self, Outcome::Computed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Computed(v) => Outcome::Computed(f(v)),
            Outcome::Skipped(r) => Outcome::Skipped(r),
            Outcome::Failed(e) => Outcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_count_rejects_three() {
        assert_eq!(
            PassCount::try_from(3),
            Err(ValidationError::PassCount { value: 3 })
        );
        assert_eq!(PassCount::try_from(4).map(PassCount::get), Ok(4));
    }

    #[test]
    fn absent_keys_stay_missing() {
        let input = DesignInput::from_toml_str("steam_pressure_mpa = 0.01").unwrap();
        assert_eq!(input.steam_pressure_mpa, Some(0.01));
        assert_eq!(input.steam_mass_flow_kg_h, None);
        assert_eq!(input.structure, StructureSpec::Auto);
    }

    #[test]
    fn field_list_is_ordered_and_complete() {
        assert!(Field::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
