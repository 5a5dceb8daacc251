//! 상관식 검증 오류와 파이프라인/CLI 오류 타입.

use serde::Serialize;
use thiserror::Error;

use crate::pipeline::Step;
use crate::record::Field;

/// 상관식 입력이 물리적 범위나 순서 조건을 위반했을 때의 오류.
///
/// 어느 입력이 어떤 조건을 어겼는지를 함께 담는다.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// NaN/무한대 입력
    #[error("{name} 값({value})은 유한한 숫자여야 합니다")]
    NotFinite { name: &'static str, value: f64 },

    /// 허용 범위를 벗어난 입력
    #[error("{name} 값({value})이 허용 범위를 벗어났습니다: {constraint}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// 재질 카탈로그에 없는 재질명
    #[error("알 수 없는 재질: {material}")]
    UnknownMaterial { material: String },

    /// t_sat > t_out > t_in 순서 위반
    #[error("온도 순서 오류: t_sat({t_sat}) > t_out({t_out}) > t_in({t_in}) 를 만족해야 합니다")]
    TemperatureOrder { t_sat: f64, t_in: f64, t_out: f64 },

    /// 단말 온도차가 최소값보다 작음
    #[error("단말 온도차 {difference:.3}°C가 최소값 {minimum}°C보다 작습니다")]
    TerminalDifference { difference: f64, minimum: f64 },

    /// 두께가 너무 커서 내경이 0 이하가 됨
    #[error("관 두께({wall_thickness_mm} mm)가 외경({outer_diameter_mm} mm)에 비해 커서 내경이 0 이하입니다")]
    NonPositiveInnerDiameter {
        outer_diameter_mm: f64,
        wall_thickness_mm: f64,
    },

    /// 관 피치는 외경보다 커야 함
    #[error("관 피치({pitch_mm} mm)는 관 외경({outer_diameter_mm} mm)보다 커야 합니다")]
    PitchNotAboveDiameter { pitch_mm: f64, outer_diameter_mm: f64 },

    /// 최소/최대 유속 순서 위반
    #[error("유속 범위 오류: 0 < 최소({min}) < 최대({max}) 를 만족해야 합니다")]
    VelocityWindow { min: f64, max: f64 },

    /// 허용되지 않는 패스 수
    #[error("패스 수는 1, 2, 4 중 하나여야 합니다 (입력: {value})")]
    PassCount { value: u32 },
}

/// 상관식 결과 타입 별칭.
pub type CalcResult<T> = Result<T, ValidationError>;

/// 유한한 값인지 확인한다.
pub(crate) fn finite(name: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { name, value })
    }
}

/// 0보다 큰 유한값인지 확인한다.
pub(crate) fn positive(name: &'static str, value: f64) -> CalcResult<f64> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            constraint: "> 0",
        })
    }
}

/// 0 이상인 유한값인지 확인한다.
pub(crate) fn non_negative(name: &'static str, value: f64) -> CalcResult<f64> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            constraint: ">= 0",
        })
    }
}

/// 닫힌 구간 [lo, hi] 안의 값인지 확인한다.
pub(crate) fn within(
    name: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    constraint: &'static str,
) -> CalcResult<f64> {
    finite(name, value)?;
    if (lo..=hi).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            constraint,
        })
    }
}

/// 파이프라인 단계에서 검증 오류가 발생해 계산이 중단된 경우.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{step} 단계에서 {field} 계산 실패: {source}")]
pub struct StepFailure {
    /// 실패한 단계
    pub step: Step,
    /// 실패한 출력 항목
    pub field: Field,
    /// 원인이 된 검증 오류
    #[source]
    pub source: ValidationError,
}

/// 파일 입출력 및 CLI 실행 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 설계 입력 파일 파싱 오류
    #[error("설계 입력 파싱 오류: {0}")]
    RecordParse(#[from] toml::de::Error),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    ReportSerialize(#[from] toml::ser::Error),
    /// 검증 실패로 계산 중단
    #[error("계산 오류: {0}")]
    Calculation(#[from] StepFailure),
}
