use super::common::*;
use crate::workflows::assessment::domain::{
    AnalysisResult, ChecklistItem, Condition, ScoreCategory, ScoreCategoryKind,
    ScoreValidationError, Scoring,
};
use crate::workflows::delivery::sample_result;
use crate::workflows::assessment::{
    aggregate, generate_suggestions, score_draft, PerformanceAnalyzer,
};

fn scoring(content: u8, fulfillment: u8, composition: u8, grammar: u8) -> Scoring {
    Scoring {
        content_fidelity: ScoreCategory::new(ScoreCategoryKind::ContentFidelity, content, ""),
        condition_fulfillment: ScoreCategory::new(
            ScoreCategoryKind::ConditionFulfillment,
            fulfillment,
            "",
        ),
        logical_composition: ScoreCategory::new(
            ScoreCategoryKind::LogicalComposition,
            composition,
            "",
        ),
        grammar_expression: ScoreCategory::new(ScoreCategoryKind::GrammarExpression, grammar, ""),
    }
}

fn category_rejection(json: &str) -> String {
    serde_json::from_str::<ScoreCategory>(json)
        .expect_err("invalid category")
        .to_string()
}

fn item(number: &str, content: &str, fulfilled: bool) -> ChecklistItem {
    ChecklistItem {
        condition_number: format!("조건 {number}"),
        content: content.to_string(),
        fulfilled,
        remarks: String::new(),
    }
}

#[test]
fn category_maxima_sum_to_one_hundred() {
    let total: u16 = ScoreCategoryKind::ordered()
        .iter()
        .map(|kind| u16::from(kind.max_score()))
        .sum();
    assert_eq!(total, 100);
}

#[test]
fn category_scores_are_clamped_at_their_maximum() {
    let category = ScoreCategory::new(ScoreCategoryKind::GrammarExpression, 99, "");
    assert_eq!(category.score, 20);
    assert_eq!(category.max_score, 20);
}

#[test]
fn serialized_result_reads_back_unchanged() {
    let json = serde_json::to_string(&sample_result()).expect("serialize");
    let parsed: AnalysisResult = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, sample_result());
}

#[test]
fn category_with_foreign_maximum_is_rejected() {
    let error = category_rejection(
        r#"{"kind":"grammar_expression","score":5,"max_score":7,"evaluation":""}"#,
    );
    assert!(error.contains("max_score must be 20"), "{error}");

    let error = category_rejection(
        r#"{"kind":"grammar_expression","score":200,"max_score":20,"evaluation":""}"#,
    );
    assert!(error.contains("exceeds its maximum"), "{error}");
}

#[test]
fn category_in_the_wrong_slot_is_rejected() {
    let mut value = serde_json::to_value(sample_result().scoring).expect("serialize");
    value["content_fidelity"] = value["grammar_expression"].clone();

    let error = serde_json::from_value::<Scoring>(value).expect_err("misplaced category");
    let expected = ScoreValidationError::MisplacedCategory {
        expected: ScoreCategoryKind::ContentFidelity,
        actual: ScoreCategoryKind::GrammarExpression,
    };
    assert_eq!(error.to_string(), expected.to_string());
}

#[test]
fn result_totals_must_match_categories() {
    let mut value = serde_json::to_value(sample_result()).expect("serialize");
    value["total_score"] = serde_json::json!(999);
    let error = serde_json::from_value::<AnalysisResult>(value).expect_err("bad total");
    assert!(error.to_string().contains("total_score is 999"), "{error}");

    let mut value = serde_json::to_value(sample_result()).expect("serialize");
    value["max_total_score"] = serde_json::json!(120);
    let error = serde_json::from_value::<AnalysisResult>(value).expect_err("bad maximum");
    assert!(error.to_string().contains("max_total_score is 120"), "{error}");
}

#[test]
fn aggregate_sums_scores_and_maxima() {
    let totals = aggregate(&scoring(20, 30, 25, 16));
    assert_eq!(totals.total_score, 91);
    assert_eq!(totals.max_total_score, 100);

    let full = aggregate(&scoring(25, 30, 25, 20));
    assert_eq!(full.total_score, 100);
}

#[test]
fn score_draft_fills_every_category() {
    let conditions = vec![Condition::new("1", "글자 수 800자 이상 1200자 이하")];

    let scoring = score_draft(&conditions, &structured_draft());

    assert_eq!(scoring.content_fidelity.score, 20);
    assert_eq!(scoring.condition_fulfillment.score, 30);
    assert_eq!(scoring.logical_composition.score, 25);
    assert_eq!(scoring.grammar_expression.score, 12);
    for (category, kind) in scoring.categories().iter().zip(ScoreCategoryKind::ordered()) {
        assert_eq!(category.kind, kind);
        assert!(!category.evaluation.is_empty());
    }
}

#[test]
fn suggestions_name_each_unmet_condition() {
    let checklist = vec![
        item("1", "글자 수 800자 이상", true),
        item("2", "참고문헌 제시", false),
    ];

    let suggestions = generate_suggestions(&checklist, &scoring(20, 15, 20, 16));

    assert_eq!(
        suggestions,
        vec!["조건 2: 참고문헌 제시 - 이 조건을 충족하도록 내용을 보완해주세요.".to_string()]
    );
}

#[test]
fn suggestions_follow_threshold_floors() {
    let suggestions = generate_suggestions(&[], &scoring(14, 0, 14, 11));
    assert_eq!(
        suggestions,
        vec![
            "내용을 더 구체적이고 상세하게 작성해주세요.".to_string(),
            "서론-본론-결론 구조를 명확히 하여 논리적 흐름을 개선해주세요.".to_string(),
            "문장을 더 명확하고 정확하게 작성해주세요.".to_string(),
        ]
    );

    assert!(generate_suggestions(&[], &scoring(15, 0, 15, 12)).is_empty());
}

#[test]
fn suggestions_empty_iff_everything_passes() {
    let all_met = vec![item("1", "a", true), item("2", "b", true)];
    assert!(generate_suggestions(&all_met, &scoring(20, 30, 25, 16)).is_empty());

    let one_unmet = vec![item("1", "a", true), item("2", "b", false)];
    assert_eq!(generate_suggestions(&one_unmet, &scoring(20, 30, 25, 16)).len(), 1);
}

#[tokio::test]
async fn analyzer_runs_the_full_pipeline() {
    let analyzer = PerformanceAnalyzer::new(ScriptedClient::fulfilled(), fast_policy());

    let result = analyzer
        .analyze(&conditions_text(), &structured_draft())
        .await;

    assert_eq!(result.conditions.len(), 2);
    assert_eq!(result.checklist.len(), 2);
    assert!(result.checklist.iter().all(|item| item.fulfilled));
    assert_eq!(result.scoring.condition_fulfillment.score, 30);
    assert_eq!(result.total_score, 20 + 30 + 25 + 12);
    assert_eq!(result.max_total_score, 100);
    assert!(result.improvement_suggestions.is_empty());
}

#[tokio::test]
async fn analyzer_degrades_on_unparseable_conditions() {
    let analyzer = PerformanceAnalyzer::new(ScriptedClient::fulfilled(), fast_policy());

    let result = analyzer.analyze("자유 주제", "짧은 초안").await;

    assert!(result.conditions.is_empty());
    assert!(result.checklist.is_empty());
    assert_eq!(result.scoring.condition_fulfillment.score, 0);
    assert!(result.total_score <= 100);
}

#[tokio::test]
async fn failed_judgments_still_produce_a_full_result() {
    let analyzer = PerformanceAnalyzer::new(FailingClient::default(), fast_policy());

    let result = analyzer
        .analyze(&conditions_text(), &structured_draft())
        .await;

    assert_eq!(result.checklist.len(), 2);
    assert!(result
        .checklist
        .iter()
        .all(|item| !item.fulfilled && item.remarks == "AI 분석 실패"));
    // The heuristic sub-score does not depend on the model.
    assert_eq!(result.scoring.condition_fulfillment.score, 30);
    assert_eq!(result.improvement_suggestions.len(), 2);
    assert!(result.improvement_suggestions[0].starts_with("조건 1: "));
}
