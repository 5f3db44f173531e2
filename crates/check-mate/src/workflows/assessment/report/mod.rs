mod document;
pub mod views;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::domain::AnalysisResult;
use views::{ChecklistRow, DisplayView, ScoreRow, TotalScoreView};

pub use document::{ShareableDocument, REPORT_SUBJECT};

/// Both renderings of one analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    pub display: DisplayView,
    pub document: ShareableDocument,
}

pub fn render(result: &AnalysisResult, analyzed_at: DateTime<Local>) -> RenderedReport {
    RenderedReport {
        display: display_view(result),
        document: document::render_document(result, analyzed_at),
    }
}

pub fn render_now(result: &AnalysisResult) -> RenderedReport {
    render(result, Local::now())
}

pub fn display_view(result: &AnalysisResult) -> DisplayView {
    DisplayView {
        total: TotalScoreView::new(result.total_score, result.max_total_score),
        checklist: result.checklist.iter().map(ChecklistRow::from).collect(),
        scores: result
            .scoring
            .categories()
            .into_iter()
            .map(ScoreRow::from)
            .collect(),
        suggestions: result
            .improvement_suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| format!("{}. {suggestion}", index + 1))
            .collect(),
    }
}

pub fn shareable_document(
    result: &AnalysisResult,
    analyzed_at: DateTime<Local>,
) -> ShareableDocument {
    document::render_document(result, analyzed_at)
}

/// Checklist table as CSV with the display headers.
pub fn checklist_csv(view: &DisplayView) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["조건", "내용", "충족 여부", "비고"])?;
    for row in &view.checklist {
        writer.write_record([
            row.condition.as_str(),
            row.content.as_str(),
            row.status_label,
            row.remarks.as_str(),
        ])?;
    }
    finish(writer)
}

/// Category score table as CSV with the display headers.
pub fn scores_csv(view: &DisplayView) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["평가 항목", "점수", "평가 내용"])?;
    for row in &view.scores {
        writer.write_record([
            row.category_label,
            row.score_label.as_str(),
            row.evaluation.as_str(),
        ])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Flush(err.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write csv record: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv output: {0}")]
    Flush(String),
    #[error("csv output was not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
