use super::domain::AnalysisResult;
use super::judge::{CompletionClient, ConditionJudge, JudgePolicy};
use super::parser::parse_conditions;
use super::scoring::{aggregate, score_draft};
use super::suggestions::generate_suggestions;

/// Runs the full pipeline: parse, judge, score, suggest.
pub struct PerformanceAnalyzer<C> {
    judge: ConditionJudge<C>,
}

impl<C> PerformanceAnalyzer<C>
where
    C: CompletionClient,
{
    pub fn new(client: C, policy: JudgePolicy) -> Self {
        Self {
            judge: ConditionJudge::new(client, policy),
        }
    }

    /// Never fails. Blank or unparseable inputs produce a result with no
    /// conditions and a zero condition-fulfillment score.
    pub async fn analyze(&self, conditions_text: &str, draft_text: &str) -> AnalysisResult {
        let conditions = parse_conditions(conditions_text);
        if conditions.is_empty() {
            tracing::warn!("no conditions recognised in submitted requirements");
        }

        let checklist = self.judge.judge_all(&conditions, draft_text).await;
        let scoring = score_draft(&conditions, draft_text);
        let totals = aggregate(&scoring);
        let improvement_suggestions = generate_suggestions(&checklist, &scoring);

        tracing::info!(
            conditions = conditions.len(),
            fulfilled = checklist.iter().filter(|item| item.fulfilled).count(),
            total_score = totals.total_score,
            suggestions = improvement_suggestions.len(),
            "draft analysis complete"
        );

        AnalysisResult {
            conditions,
            checklist,
            scoring,
            total_score: totals.total_score,
            max_total_score: totals.max_total_score,
            improvement_suggestions,
        }
    }
}
