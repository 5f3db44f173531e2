use serde::Serialize;

use super::super::domain::{ChecklistItem, ScoreCategory, ScoreCategoryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Fulfilled,
    Unfulfilled,
}

impl FulfillmentStatus {
    pub const fn from_flag(fulfilled: bool) -> Self {
        if fulfilled {
            Self::Fulfilled
        } else {
            Self::Unfulfilled
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Fulfilled => "✅",
            Self::Unfulfilled => "❌",
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Fulfilled => "충족",
            Self::Unfulfilled => "미충족",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fulfilled => "✅ 충족",
            Self::Unfulfilled => "❌ 미충족",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Fulfilled => "fulfilled",
            Self::Unfulfilled => "not-fulfilled",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalScoreView {
    pub headline: &'static str,
    pub total_score: u16,
    pub max_total_score: u16,
    pub score_label: String,
}

impl TotalScoreView {
    pub fn new(total_score: u16, max_total_score: u16) -> Self {
        Self {
            headline: "총점",
            total_score,
            max_total_score,
            score_label: points_label(total_score, max_total_score),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistRow {
    pub condition: String,
    pub content: String,
    pub status: FulfillmentStatus,
    pub status_label: &'static str,
    pub remarks: String,
}

impl From<&ChecklistItem> for ChecklistRow {
    fn from(item: &ChecklistItem) -> Self {
        let status = FulfillmentStatus::from_flag(item.fulfilled);
        Self {
            condition: item.condition_number.clone(),
            content: item.content.clone(),
            status,
            status_label: status.label(),
            remarks: item.remarks.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub category: ScoreCategoryKind,
    pub category_label: &'static str,
    pub score: u8,
    pub max_score: u8,
    pub score_label: String,
    pub evaluation: String,
}

impl From<&ScoreCategory> for ScoreRow {
    fn from(category: &ScoreCategory) -> Self {
        Self {
            category: category.kind,
            category_label: category.kind.label(),
            score: category.score,
            max_score: category.max_score,
            score_label: points_label(category.score.into(), category.max_score.into()),
            evaluation: category.evaluation.clone(),
        }
    }
}

/// Display-ready projection of an analysis result.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayView {
    pub total: TotalScoreView,
    pub checklist: Vec<ChecklistRow>,
    pub scores: Vec<ScoreRow>,
    pub suggestions: Vec<String>,
}

pub(crate) fn points_label(score: u16, max_score: u16) -> String {
    format!("{score}점 / {max_score}점")
}
