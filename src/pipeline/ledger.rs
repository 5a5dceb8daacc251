//! 한 번의 실행 동안 단계별 결과를 모으는 작업 장부.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{Advisory, DesignReport, FieldOutcome, Step, StepStatus, StepTrace};
use crate::config::Config;
use crate::error::{StepFailure, ValidationError};
use crate::record::{DesignInput, Field, Outcome, SkipReason};

/// 값을 만들지 못한 이유. 입력 부족은 건너뛰기, 검증 실패는 실행 중단으로 이어진다.
pub(crate) enum Blocked {
    Skip(SkipReason),
    Invalid(ValidationError),
}

impl From<SkipReason> for Blocked {
    fn from(value: SkipReason) -> Self {
        Blocked::Skip(value)
    }
}

impl From<ValidationError> for Blocked {
    fn from(value: ValidationError) -> Self {
        Blocked::Invalid(value)
    }
}

/// 비어 있는 입력을 건너뛰기 사유로 바꾼다.
pub(crate) fn required<T>(value: Option<T>, name: &'static str) -> Result<T, SkipReason> {
    value.ok_or(SkipReason::MissingInput(name))
}

pub(crate) struct Ledger<'a> {
    input: &'a DesignInput,
    config: &'a Config,
    step: Step,
    outcomes: BTreeMap<Field, Outcome<f64>>,
    warnings: Vec<Advisory>,
    trace: Vec<StepTrace>,
    failure: Option<StepFailure>,
}

impl<'a> Ledger<'a> {
    pub(crate) fn new(input: &'a DesignInput, config: &'a Config) -> Self {
        Self {
            input,
            config,
            step: Step::ALL[0],
            outcomes: BTreeMap::new(),
            warnings: Vec::new(),
            trace: Vec::with_capacity(Step::ALL.len()),
            failure: None,
        }
    }

    pub(crate) fn input(&self) -> &'a DesignInput {
        self.input
    }

    pub(crate) fn config(&self) -> &'a Config {
        self.config
    }

    /// 앞 단계에서 계산된 값. 계산되지 않았으면 `Upstream` 사유를 돌려준다.
    pub(crate) fn value(&self, field: Field) -> Result<f64, SkipReason> {
        self.outcomes
            .get(&field)
            .and_then(Outcome::value)
            .ok_or(SkipReason::Upstream(field))
    }

    /// 정수 항목(관 수 등)을 읽는다.
    pub(crate) fn count(&self, field: Field) -> Result<u32, SkipReason> {
        // 정수 항목은 u32에서 변환해 저장하므로 손실 없이 되돌릴 수 있다
        self.value(field).map(|v| v as u32)
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let advisory = Advisory {
            step: self.step,
            message: message.into(),
        };
        warn!(step = %advisory.step, "{}", advisory.message);
        self.warnings.push(advisory);
    }

    /// 항목 하나를 계산해 기록한다.
    pub(crate) fn derive(
        &mut self,
        field: Field,
        f: impl FnOnce(&mut Self) -> Result<f64, Blocked>,
    ) {
        self.derive_all([field], |ledger| f(ledger).map(|v| [v]));
    }

    /// 한 번의 계산으로 함께 정해지는 항목들을 기록한다.
    /// 실패하거나 건너뛰면 모든 항목이 같은 상태가 된다.
    pub(crate) fn derive_all<const N: usize>(
        &mut self,
        fields: [Field; N],
        f: impl FnOnce(&mut Self) -> Result<[f64; N], Blocked>,
    ) {
        if let Some(failed) = &self.failure {
            let reason = SkipReason::Aborted(failed.step);
            for field in fields {
                self.outcomes.insert(field, Outcome::Skipped(reason));
            }
            return;
        }
        match f(self) {
            Ok(values) => {
                for (field, value) in fields.into_iter().zip(values) {
                    debug!(step = %self.step, field = %field, value, "계산 완료");
                    self.outcomes.insert(field, Outcome::Computed(value));
                }
            }
            Err(Blocked::Skip(reason)) => {
                for field in fields {
                    debug!(step = %self.step, field = %field, %reason, "건너뜀");
                    self.outcomes.insert(field, Outcome::Skipped(reason));
                }
            }
            Err(Blocked::Invalid(error)) => {
                let field = fields[0];
                warn!(step = %self.step, field = %field, %error, "입력 검증 실패, 계산 중단");
                for field in fields {
                    self.outcomes.insert(field, Outcome::Failed(error.clone()));
                }
                self.failure = Some(StepFailure {
                    step: self.step,
                    field,
                    source: error,
                });
            }
        }
    }

    /// 단계 하나를 실행하고 추적 기록을 남긴다.
    pub(crate) fn apply(mut self, step: Step) -> Self {
        self.step = step;
        match self.failure.as_ref().map(|failure| failure.step) {
            None => super::steps::evaluate(step, &mut self),
            Some(failed) => {
                debug!(step = %step, "앞 단계 실패로 실행하지 않음");
                for &field in step.outputs() {
                    self.outcomes
                        .insert(field, Outcome::Skipped(SkipReason::Aborted(failed)));
                }
            }
        }
        for &field in step.outputs() {
            self.outcomes
                .entry(field)
                .or_insert(Outcome::Skipped(SkipReason::NotApplicable));
        }
        let status = StepStatus::from_outcomes(
            step.outputs()
                .iter()
                .filter_map(|field| self.outcomes.get(field)),
        );
        self.trace.push(StepTrace { step, status });
        self
    }

    pub(crate) fn finish(mut self) -> DesignReport {
        let fields = Field::ALL
            .into_iter()
            .map(|field| FieldOutcome {
                field,
                outcome: self
                    .outcomes
                    .remove(&field)
                    .unwrap_or(Outcome::Skipped(SkipReason::NotApplicable)),
            })
            .collect();
        DesignReport {
            project_name: self.input.project_name.clone(),
            working_condition: self.input.working_condition.clone(),
            structure_mode: self.input.structure.mode(),
            cooling_water_mode: self.input.cooling_water.mode(),
            saturation_model: self.config.saturation_model,
            failure: self.failure,
            warnings: self.warnings,
            trace: self.trace,
            fields,
        }
    }
}
