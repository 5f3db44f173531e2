use super::domain::{ChecklistItem, ScoreCategoryKind, Scoring};

/// Category floors below which a fixed suggestion is added.
const THRESHOLDS: [(ScoreCategoryKind, u8, &str); 3] = [
    (
        ScoreCategoryKind::ContentFidelity,
        15,
        "내용을 더 구체적이고 상세하게 작성해주세요.",
    ),
    (
        ScoreCategoryKind::LogicalComposition,
        15,
        "서론-본론-결론 구조를 명확히 하여 논리적 흐름을 개선해주세요.",
    ),
    (
        ScoreCategoryKind::GrammarExpression,
        12,
        "문장을 더 명확하고 정확하게 작성해주세요.",
    ),
];

pub fn generate_suggestions(checklist: &[ChecklistItem], scoring: &Scoring) -> Vec<String> {
    let unmet = checklist
        .iter()
        .filter(|item| !item.fulfilled)
        .map(|item| {
            format!(
                "{}: {} - 이 조건을 충족하도록 내용을 보완해주세요.",
                item.condition_number, item.content
            )
        });

    let low_scores = THRESHOLDS
        .iter()
        .filter(|(kind, floor, _)| scoring.get(*kind).score < *floor)
        .map(|(_, _, message)| (*message).to_string());

    unmet.chain(low_scores).collect()
}
