use serde::Serialize;

use super::domain::{Condition, Scoring};
use super::heuristics;

/// Summed category scores and maxima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreTotals {
    pub total_score: u16,
    pub max_total_score: u16,
}

/// Builds all four category scores for a draft.
pub fn score_draft(conditions: &[Condition], draft: &str) -> Scoring {
    Scoring {
        content_fidelity: heuristics::content_fidelity(draft),
        condition_fulfillment: heuristics::condition_fulfillment(conditions, draft),
        logical_composition: heuristics::logical_composition(draft),
        grammar_expression: heuristics::grammar_expression(draft),
    }
}

pub fn aggregate(scoring: &Scoring) -> ScoreTotals {
    let (total_score, max_total_score) = scoring
        .categories()
        .iter()
        .fold((0u16, 0u16), |(total, max), category| {
            (
                total + u16::from(category.score),
                max + u16::from(category.max_score),
            )
        });

    ScoreTotals {
        total_score,
        max_total_score,
    }
}
