use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::correlations::SaturationModel;

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 설계 여유와 반올림 규칙.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowances {
    /// Auto 모드 설계 면적 올림 단위(m²)
    pub area_step_m2: f64,
    /// 오염계수 미입력 시 Auto 모드 면적에 더하는 여유(비율)
    pub fouling_margin: f64,
    /// 마찰 저항에 곱하는 설계 여유
    pub pressure_drop_margin: f64,
}

impl Default for Allowances {
    fn default() -> Self {
        Self {
            area_step_m2: 50.0,
            fouling_margin: 0.05,
            pressure_drop_margin: 1.2,
        }
    }
}

/// 노즐 규격 산정 조건.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NozzleSettings {
    /// 응축수 출구 허용 유속 [최소, 최대] (m/s)
    pub condensate_velocity_m_s: [f64; 2],
    /// 응축수 밀도(kg/m³)
    pub condensate_density_kg_m3: f64,
    /// 냉각수 노즐 허용 유속 [최소, 최대] (m/s)
    pub cooling_water_velocity_m_s: [f64; 2],
    /// 노즐 내경 올림 단위(mm)
    pub stock_step_mm: u32,
}

impl Default for NozzleSettings {
    fn default() -> Self {
        Self {
            condensate_velocity_m_s: [0.5, 1.0],
            condensate_density_kg_m3: 1000.0,
            cooling_water_velocity_m_s: [2.0, 2.5],
            stock_step_mm: 50,
        }
    }
}

/// 경고(권고) 기준.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorySettings {
    /// 관 길이 / 관판 외경 권장 범위
    pub length_diameter_ratio: [f64; 2],
}

impl Default for AdvisorySettings {
    fn default() -> Self {
        Self {
            length_diameter_ratio: [2.0, 3.0],
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub saturation_model: SaturationModel,
    /// 근사식과 IF97 포화 온도 차가 이 값(°C)을 넘으면 경고
    pub saturation_deviation_warn_c: f64,
    pub allowances: Allowances,
    pub nozzles: NozzleSettings,
    pub advisories: AdvisorySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            saturation_model: SaturationModel::CurveFit,
            saturation_deviation_warn_c: 5.0,
            allowances: Allowances::default(),
            nozzles: NozzleSettings::default(),
            advisories: AdvisorySettings::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정으로 새로 만든다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// TOML 문자열에서 설정을 읽는다. 빠진 키는 기본값으로 채운다.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 설정을 지정한 경로에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
