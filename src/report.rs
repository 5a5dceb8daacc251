//! 계산 결과를 사람이 읽는 표와 TOML로 바꾼다.
//! 계산되지 않은 항목은 0이 아니라 `-`와 사유로 표시한다.

use std::fmt::Write as _;

use crate::error::AppError;
use crate::material_db;
use crate::pipeline::DesignReport;
use crate::record::{Field, Outcome};

fn display_decimals(field: Field) -> usize {
    match field {
        Field::TubeCount
        | Field::TubeSheetDiameter
        | Field::CondensateNozzleDiameter
        | Field::CoolingWaterNozzleDiameter => 0,
        Field::UncorrectedU | Field::UncorrectedUImperial | Field::CorrectedU => 1,
        Field::RequiredArea | Field::DesignArea | Field::LengthDiameterRatio => 2,
        Field::MaterialCorrection | Field::WaterCorrection | Field::Cleanliness | Field::Lmtd => 4,
        _ => 3,
    }
}

/// 항목 하나의 값 또는 미계산 사유.
pub fn format_outcome(field: Field, outcome: &Outcome<f64>) -> String {
    match outcome {
        Outcome::Computed(v) => {
            format!("{v:.prec$} {}", field.unit(), prec = display_decimals(field))
        }
        Outcome::Skipped(reason) => format!("- ({reason})"),
        Outcome::Failed(error) => format!("- (검증 실패: {error})"),
    }
}

/// CLI 출력용 텍스트 보고서.
pub fn render(report: &DesignReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== 복수기 설계 계산 결과 ===");
    if let Some(name) = report.project_name() {
        let _ = writeln!(out, "프로젝트: {name}");
    }
    if let Some(condition) = report.working_condition() {
        let _ = writeln!(out, "운전 조건: {condition}");
    }
    let _ = writeln!(
        out,
        "구조 모드: {} / 냉각수 모드: {}",
        report.structure_mode(),
        report.cooling_water_mode()
    );

    let _ = writeln!(out, "\n-- 결과 --");
    for entry in report.fields() {
        let _ = writeln!(
            out,
            "{:<20} {}",
            entry.field.label(),
            format_outcome(entry.field, &entry.outcome)
        );
    }

    let _ = writeln!(out, "\n-- 단계 --");
    for trace in report.trace() {
        let _ = writeln!(out, "{:<20} {}", trace.step.label(), trace.status);
    }

    if !report.warnings().is_empty() {
        let _ = writeln!(out, "\n-- 경고 --");
        for advisory in report.warnings() {
            let _ = writeln!(out, "{advisory}");
        }
    }
    if let Some(failure) = report.failure() {
        let _ = writeln!(out, "\n계산 중단: {failure}");
    }
    out
}

/// 보고서를 TOML 문서로 직렬화한다.
pub fn to_toml(report: &DesignReport) -> Result<String, AppError> {
    Ok(toml::to_string_pretty(report)?)
}

/// 재질 카탈로그 목록(`materials` 명령).
pub fn render_materials() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<28} 비고", "재질");
    for material in material_db::materials() {
        let _ = writeln!(out, "{:<28} {}", material.name, material.notes);
    }
    out
}
