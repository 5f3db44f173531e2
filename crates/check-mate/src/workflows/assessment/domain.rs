use serde::{Deserialize, Serialize};

/// Literal word that opens every condition line (`조건 1. ...`).
pub const CONDITION_MARKER: &str = "조건";

/// Remark attached to a checklist item whose judgment could not be obtained.
pub const ANALYSIS_FAILED_REMARK: &str = "AI 분석 실패";

/// One discrete requirement taken from the assessment rubric text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub number: String,
    pub content: String,
}

impl Condition {
    pub fn new(number: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            content: content.into(),
        }
    }

    /// Display label used in checklists and suggestions, e.g. `조건 3`.
    pub fn label(&self) -> String {
        format!("{CONDITION_MARKER} {}", self.number)
    }
}

/// Outcome of asking the model about a single condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgment {
    Verdict { fulfilled: bool, remarks: String },
    Failed { reason: String },
}

impl Judgment {
    pub fn is_failed(&self) -> bool {
        matches!(self, Judgment::Failed { .. })
    }
}

/// Checklist row pairing a condition with its fulfillment verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub condition_number: String,
    pub content: String,
    pub fulfilled: bool,
    pub remarks: String,
}

impl ChecklistItem {
    pub fn from_judgment(condition: &Condition, judgment: Judgment) -> Self {
        let (fulfilled, remarks) = match judgment {
            Judgment::Verdict { fulfilled, remarks } => (fulfilled, remarks),
            Judgment::Failed { .. } => (false, ANALYSIS_FAILED_REMARK.to_string()),
        };

        Self {
            condition_number: condition.label(),
            content: condition.content.clone(),
            fulfilled,
            remarks,
        }
    }
}

/// The four fixed rubric dimensions; their maxima sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategoryKind {
    ContentFidelity,
    ConditionFulfillment,
    LogicalComposition,
    GrammarExpression,
}

impl ScoreCategoryKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ContentFidelity,
            Self::ConditionFulfillment,
            Self::LogicalComposition,
            Self::GrammarExpression,
        ]
    }

    pub const fn max_score(self) -> u8 {
        match self {
            Self::ContentFidelity => 25,
            Self::ConditionFulfillment => 30,
            Self::LogicalComposition => 25,
            Self::GrammarExpression => 20,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ContentFidelity => "내용 충실도",
            Self::ConditionFulfillment => "조건 충족도",
            Self::LogicalComposition => "논리적 구성",
            Self::GrammarExpression => "문법·표현력",
        }
    }
}

/// Rejection raised when a serialized result breaks the rubric's bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreValidationError {
    #[error("{kind:?} max_score must be {expected}, got {actual}")]
    WrongMaximum {
        kind: ScoreCategoryKind,
        expected: u8,
        actual: u8,
    },
    #[error("{kind:?} score {score} exceeds its maximum of {max_score}")]
    ScoreAboveMaximum {
        kind: ScoreCategoryKind,
        score: u8,
        max_score: u8,
    },
    #[error("slot for {expected:?} holds a {actual:?} score")]
    MisplacedCategory {
        expected: ScoreCategoryKind,
        actual: ScoreCategoryKind,
    },
    #[error("{field} is {actual}, categories add up to {expected}")]
    TotalMismatch {
        field: &'static str,
        expected: u16,
        actual: u16,
    },
}

/// Score for one rubric dimension. The score never exceeds the dimension's maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreCategory")]
pub struct ScoreCategory {
    pub kind: ScoreCategoryKind,
    pub score: u8,
    pub max_score: u8,
    pub evaluation: String,
}

impl ScoreCategory {
    pub fn new(kind: ScoreCategoryKind, score: u8, evaluation: impl Into<String>) -> Self {
        let max_score = kind.max_score();
        Self {
            kind,
            score: score.min(max_score),
            max_score,
            evaluation: evaluation.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawScoreCategory {
    kind: ScoreCategoryKind,
    score: u8,
    max_score: u8,
    #[serde(default)]
    evaluation: String,
}

impl TryFrom<RawScoreCategory> for ScoreCategory {
    type Error = ScoreValidationError;

    fn try_from(raw: RawScoreCategory) -> Result<Self, Self::Error> {
        let expected = raw.kind.max_score();
        if raw.max_score != expected {
            return Err(ScoreValidationError::WrongMaximum {
                kind: raw.kind,
                expected,
                actual: raw.max_score,
            });
        }
        if raw.score > expected {
            return Err(ScoreValidationError::ScoreAboveMaximum {
                kind: raw.kind,
                score: raw.score,
                max_score: expected,
            });
        }

        Ok(Self::new(raw.kind, raw.score, raw.evaluation))
    }
}

/// All four category scores for one draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScoring")]
pub struct Scoring {
    pub content_fidelity: ScoreCategory,
    pub condition_fulfillment: ScoreCategory,
    pub logical_composition: ScoreCategory,
    pub grammar_expression: ScoreCategory,
}

impl Scoring {
    pub fn categories(&self) -> [&ScoreCategory; 4] {
        [
            &self.content_fidelity,
            &self.condition_fulfillment,
            &self.logical_composition,
            &self.grammar_expression,
        ]
    }

    pub fn get(&self, kind: ScoreCategoryKind) -> &ScoreCategory {
        match kind {
            ScoreCategoryKind::ContentFidelity => &self.content_fidelity,
            ScoreCategoryKind::ConditionFulfillment => &self.condition_fulfillment,
            ScoreCategoryKind::LogicalComposition => &self.logical_composition,
            ScoreCategoryKind::GrammarExpression => &self.grammar_expression,
        }
    }
}

#[derive(Deserialize)]
struct RawScoring {
    content_fidelity: ScoreCategory,
    condition_fulfillment: ScoreCategory,
    logical_composition: ScoreCategory,
    grammar_expression: ScoreCategory,
}

impl TryFrom<RawScoring> for Scoring {
    type Error = ScoreValidationError;

    fn try_from(raw: RawScoring) -> Result<Self, Self::Error> {
        let scoring = Scoring {
            content_fidelity: raw.content_fidelity,
            condition_fulfillment: raw.condition_fulfillment,
            logical_composition: raw.logical_composition,
            grammar_expression: raw.grammar_expression,
        };

        for (category, expected) in scoring.categories().iter().zip(ScoreCategoryKind::ordered()) {
            if category.kind != expected {
                return Err(ScoreValidationError::MisplacedCategory {
                    expected,
                    actual: category.kind,
                });
            }
        }

        Ok(scoring)
    }
}

/// Complete outcome of one analysis run.
///
/// Deserialized results must carry totals that match their categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysisResult")]
pub struct AnalysisResult {
    pub conditions: Vec<Condition>,
    pub checklist: Vec<ChecklistItem>,
    pub scoring: Scoring,
    pub total_score: u16,
    pub max_total_score: u16,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Deserialize)]
struct RawAnalysisResult {
    #[serde(default)]
    conditions: Vec<Condition>,
    #[serde(default)]
    checklist: Vec<ChecklistItem>,
    scoring: Scoring,
    total_score: u16,
    max_total_score: u16,
    #[serde(default)]
    improvement_suggestions: Vec<String>,
}

impl TryFrom<RawAnalysisResult> for AnalysisResult {
    type Error = ScoreValidationError;

    fn try_from(raw: RawAnalysisResult) -> Result<Self, Self::Error> {
        let (expected_total, expected_max) = raw.scoring.categories().iter().fold(
            (0u16, 0u16),
            |(total, max), category| {
                (
                    total + u16::from(category.score),
                    max + u16::from(category.max_score),
                )
            },
        );

        if raw.total_score != expected_total {
            return Err(ScoreValidationError::TotalMismatch {
                field: "total_score",
                expected: expected_total,
                actual: raw.total_score,
            });
        }
        if raw.max_total_score != expected_max {
            return Err(ScoreValidationError::TotalMismatch {
                field: "max_total_score",
                expected: expected_max,
                actual: raw.max_total_score,
            });
        }

        Ok(Self {
            conditions: raw.conditions,
            checklist: raw.checklist,
            scoring: raw.scoring,
            total_score: raw.total_score,
            max_total_score: raw.max_total_score,
            improvement_suggestions: raw.improvement_suggestions,
        })
    }
}

impl AnalysisResult {
    pub fn fulfilled_count(&self) -> usize {
        self.checklist.iter().filter(|item| item.fulfilled).count()
    }
}
