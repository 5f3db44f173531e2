//! Draft assessment: condition parsing, LLM judgment, rubric scoring,
//! improvement suggestions, and report rendering.

pub mod analyzer;
pub mod domain;
pub mod heuristics;
pub mod judge;
pub mod parser;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod suggestions;

#[cfg(test)]
mod tests;

pub use analyzer::PerformanceAnalyzer;
pub use domain::{
    AnalysisResult, ChecklistItem, Condition, Judgment, ScoreCategory, ScoreCategoryKind,
    ScoreValidationError, Scoring, ANALYSIS_FAILED_REMARK, CONDITION_MARKER,
};
pub use judge::{CompletionClient, ConditionJudge, JudgeError, JudgePolicy, LlmCompletionClient};
pub use parser::parse_conditions;
pub use report::{render, RenderedReport, ReportError, ShareableDocument};
pub use router::assessment_router;
pub use scoring::{aggregate, score_draft, ScoreTotals};
pub use service::{
    AnalysisOutcome, AnalysisRequest, AssessmentService, AssessmentServiceError,
    MISSING_INPUT_MESSAGE,
};
pub use suggestions::generate_suggestions;
