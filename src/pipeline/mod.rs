//! 복수기 설계 계산 파이프라인.
//!
//! 고정된 순서의 13단계를 차례로 접어(fold) 가며 각 출력 항목의 상태를 정한다.
//! 단계는 앞 단계의 출력을 작업 장부(`Ledger`)에서만 읽으므로, 입력이 빠져 건너뛴 항목에
//! 기대는 뒤 단계는 자동으로 함께 건너뛴다. 상관식이 입력을 거부하면 그 단계에서
//! 실행을 멈추고 나머지 항목은 `Aborted`로 남긴다.

mod ledger;
mod steps;

use std::fmt;
use std::num::NonZeroUsize;
use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::correlations::SaturationModel;
use crate::error::StepFailure;
use crate::record::{CoolingWaterMode, DesignInput, Field, Outcome, SkipReason, StructureMode};

use ledger::Ledger;

/// 계산 단계. 선언 순서가 곧 실행 순서이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    SteamDuty,
    CoolingWater,
    MaterialCorrection,
    WaterCorrection,
    HeatTransferCoefficient,
    Lmtd,
    Cleanliness,
    SurfaceArea,
    Structure,
    TubeSheet,
    Nozzles,
    PressureDrop,
    TerminalDifference,
}

impl Step {
    pub const ALL: [Step; 13] = [
        Step::SteamDuty,
        Step::CoolingWater,
        Step::MaterialCorrection,
        Step::WaterCorrection,
        Step::HeatTransferCoefficient,
        Step::Lmtd,
        Step::Cleanliness,
        Step::SurfaceArea,
        Step::Structure,
        Step::TubeSheet,
        Step::Nozzles,
        Step::PressureDrop,
        Step::TerminalDifference,
    ];

    /// 이 단계가 값을 정하는 출력 항목.
    pub fn outputs(self) -> &'static [Field] {
        match self {
            Step::SteamDuty => &[
                Field::SaturationTemperature,
                Field::SaturatedLiquidEnthalpy,
                Field::HeatDuty,
            ],
            Step::CoolingWater => &[
                Field::WaterMassFlow,
                Field::WaterVolumetricFlow,
                Field::TemperatureRise,
                Field::OutletTemperature,
            ],
            Step::MaterialCorrection => &[Field::MaterialCorrection],
            Step::WaterCorrection => &[Field::WaterCorrection],
            Step::HeatTransferCoefficient => &[
                Field::UncorrectedU,
                Field::UncorrectedUImperial,
                Field::CorrectedU,
            ],
            Step::Lmtd => &[Field::Lmtd],
            Step::Cleanliness => &[Field::Cleanliness],
            Step::SurfaceArea => &[Field::RequiredArea],
            Step::Structure => &[
                Field::DesignArea,
                Field::TubeCount,
                Field::TubeLength,
                Field::TubeVelocity,
            ],
            Step::TubeSheet => &[Field::TubeSheetDiameter],
            Step::Nozzles => &[
                Field::CondensateNozzleDiameter,
                Field::CoolingWaterNozzleDiameter,
                Field::LengthDiameterRatio,
            ],
            Step::PressureDrop => &[Field::TotalPressureDrop],
            Step::TerminalDifference => &[Field::TerminalTemperatureDifference],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::SteamDuty => "증기 열부하",
            Step::CoolingWater => "냉각수 유량/온도 상승",
            Step::MaterialCorrection => "재질 보정",
            Step::WaterCorrection => "수온 보정",
            Step::HeatTransferCoefficient => "전열계수",
            Step::Lmtd => "대수평균온도차",
            Step::Cleanliness => "청결계수",
            Step::SurfaceArea => "필요 전열면적",
            Step::Structure => "관군 구조",
            Step::TubeSheet => "관판 외경",
            Step::Nozzles => "노즐/길이 직경비",
            Step::PressureDrop => "압력 손실",
            Step::TerminalDifference => "단말 온도차",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 단계 실행 결과 요약.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// 모든 출력 계산
    Completed,
    /// 일부 출력만 계산
    Partial,
    /// 입력 부족으로 아무 출력도 계산하지 못함
    Skipped,
    /// 상관식이 입력을 거부함
    Failed,
    /// 앞 단계 실패로 실행하지 않음
    NotReached,
}

impl StepStatus {
    fn from_outcomes<'o>(outcomes: impl Iterator<Item = &'o Outcome<f64>>) -> Self {
        let (mut total, mut computed, mut aborted) = (0usize, 0usize, 0usize);
        for outcome in outcomes {
            total += 1;
            match outcome {
                Outcome::Failed(_) => return StepStatus::Failed,
                Outcome::Computed(_) => computed += 1,
                Outcome::Skipped(SkipReason::Aborted(_)) => aborted += 1,
                Outcome::Skipped(_) => {}
            }
        }
        if computed == total {
            StepStatus::Completed
        } else if computed > 0 {
            StepStatus::Partial
        } else if aborted == total {
            StepStatus::NotReached
        } else {
            StepStatus::Skipped
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Completed => "완료",
            StepStatus::Partial => "일부 완료",
            StepStatus::Skipped => "건너뜀",
            StepStatus::Failed => "실패",
            StepStatus::NotReached => "미실행",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepTrace {
    pub step: Step,
    pub status: StepStatus,
}

/// 계산을 막지는 않지만 검토가 필요한 사항.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub step: Step,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.step, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOutcome {
    pub field: Field,
    pub outcome: Outcome<f64>,
}

/// 한 번의 실행 결과. 만든 뒤에는 바뀌지 않는다.
///
/// 정수 항목(관 수, 노즐 내경)도 `f64`로 담기며 전용 접근자로 정수 값을 얻는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    working_condition: Option<String>,
    structure_mode: StructureMode,
    cooling_water_mode: CoolingWaterMode,
    saturation_model: SaturationModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<StepFailure>,
    warnings: Vec<Advisory>,
    trace: Vec<StepTrace>,
    fields: Vec<FieldOutcome>,
}

impl DesignReport {
    /// 항목 상태. `fields`는 `Field::ALL` 순서로 모든 항목을 담는다.
    pub fn get(&self, field: Field) -> &Outcome<f64> {
        &self.fields[field as usize].outcome
    }

    pub fn value(&self, field: Field) -> Option<f64> {
        self.get(field).value()
    }

    pub fn tube_count(&self) -> Option<u32> {
        self.value(Field::TubeCount).map(|v| v as u32)
    }

    pub fn condensate_nozzle_mm(&self) -> Option<u32> {
        self.value(Field::CondensateNozzleDiameter).map(|v| v as u32)
    }

    pub fn cooling_water_nozzle_mm(&self) -> Option<u32> {
        self.value(Field::CoolingWaterNozzleDiameter).map(|v| v as u32)
    }

    pub fn fields(&self) -> &[FieldOutcome] {
        &self.fields
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn working_condition(&self) -> Option<&str> {
        self.working_condition.as_deref()
    }

    pub fn structure_mode(&self) -> StructureMode {
        self.structure_mode
    }

    pub fn cooling_water_mode(&self) -> CoolingWaterMode {
        self.cooling_water_mode
    }

    pub fn saturation_model(&self) -> SaturationModel {
        self.saturation_model
    }

    /// 실행을 중단시킨 검증 실패.
    pub fn failure(&self) -> Option<&StepFailure> {
        self.failure.as_ref()
    }

    pub fn warnings(&self) -> &[Advisory] {
        &self.warnings
    }

    pub fn trace(&self) -> &[StepTrace] {
        &self.trace
    }

    /// 검증 실패가 있으면 오류로, 없으면 보고서 그대로 돌려준다.
    pub fn into_result(self) -> Result<Self, StepFailure> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(self),
        }
    }
}

/// 설계 입력 하나를 계산한다. 검증 실패도 보고서 안에 담긴다.
pub fn run(input: &DesignInput, config: &Config) -> DesignReport {
    info!(
        project = input.project_name.as_deref().unwrap_or("-"),
        structure = %input.structure.mode(),
        cooling_water = %input.cooling_water.mode(),
        "복수기 설계 계산 시작"
    );
    let report = Step::ALL
        .into_iter()
        .fold(Ledger::new(input, config), Ledger::apply)
        .finish();
    let computed = report
        .fields
        .iter()
        .filter(|f| f.outcome.is_computed())
        .count();
    match report.failure() {
        Some(failure) => info!(computed, %failure, "복수기 설계 계산 중단"),
        None => info!(computed, warnings = report.warnings.len(), "복수기 설계 계산 완료"),
    }
    report
}

/// [`run`]과 같되 검증 실패를 `Err`로 돌려준다.
pub fn run_strict(input: &DesignInput, config: &Config) -> Result<DesignReport, StepFailure> {
    run(input, config).into_result()
}

/// 서로 독립인 설계 입력들을 병렬로 계산한다. 결과는 입력 순서를 따른다.
///
/// 작업 스레드는 사용 가능한 코어 수까지만 만들고, 각 스레드가 연속된 구간을 맡는다.
/// 스레드를 만들 수 없으면 그 구간은 호출한 스레드에서 계산한다.
pub fn run_batch(inputs: &[DesignInput], config: &Config) -> Vec<DesignReport> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_len = inputs.len().div_ceil(workers);
    let run_chunk = |chunk: &[DesignInput]| -> Vec<DesignReport> {
        chunk.iter().map(|input| run(input, config)).collect()
    };
    thread::scope(|scope| {
        let pending: Vec<_> = inputs
            .chunks(chunk_len)
            .map(|chunk| {
                let spawned = thread::Builder::new()
                    .name("condenser-batch".to_string())
                    .spawn_scoped(scope, move || run_chunk(chunk));
                match spawned {
                    Ok(handle) => Ok(handle),
                    Err(err) => {
                        warn!(%err, records = chunk.len(), "작업 스레드 생성 실패, 현재 스레드에서 계산");
                        Err(run_chunk(chunk))
                    }
                }
            })
            .collect();
        pending
            .into_iter()
            .flat_map(|chunk| match chunk {
                Ok(handle) => handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload)),
                Err(reports) => reports,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_exactly_one_owner() {
        let mut owned: Vec<Field> = Step::ALL
            .iter()
            .flat_map(|s| s.outputs().iter().copied())
            .collect();
        owned.sort();
        assert_eq!(owned, Field::ALL.to_vec());
    }

    #[test]
    fn field_index_matches_declaration_order() {
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field as usize, i);
        }
    }

    #[test]
    fn status_summary() {
        let computed = Outcome::Computed(1.0);
        let missing = Outcome::Skipped(SkipReason::MissingInput("x"));
        let aborted = Outcome::Skipped(SkipReason::Aborted(Step::SteamDuty));
        assert_eq!(
            StepStatus::from_outcomes([&computed, &computed].into_iter()),
            StepStatus::Completed
        );
        assert_eq!(
            StepStatus::from_outcomes([&computed, &missing].into_iter()),
            StepStatus::Partial
        );
        assert_eq!(
            StepStatus::from_outcomes([&missing, &aborted].into_iter()),
            StepStatus::Skipped
        );
        assert_eq!(
            StepStatus::from_outcomes([&aborted].into_iter()),
            StepStatus::NotReached
        );
    }
}
