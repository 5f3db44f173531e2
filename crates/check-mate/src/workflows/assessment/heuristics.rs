//! Deterministic draft checks behind the rubric sub-scores.
//!
//! Every check works on plain substring and count tests. None of them look at
//! meaning; the model judgments live in [`super::judge`].

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use super::domain::{Condition, ScoreCategory, ScoreCategoryKind};

const LENGTH_CUE: &str = "글자";
const LENGTH_UNIT_CUES: [&str; 2] = ["자", "수"];
const STRUCTURE_CUES: [&str; 2] = ["구조", "서론"];
const STRUCTURE_TOKENS: [&str; 3] = ["서론", "본론", "결론"];

const INTRODUCTION_TOKENS: [&str; 2] = ["서론", "도입"];
const BODY_TOKENS: [&str; 2] = ["본론", "전개"];
const CONCLUSION_TOKENS: [&str; 2] = ["결론", "마무리"];

const CONTENT_BASE: u8 = 15;
const CONTENT_STEPS: [(usize, u8); 2] = [(800, 5), (1000, 5)];

const COMPOSITION_BASE: u8 = 15;
const INTRODUCTION_BONUS: u8 = 3;
const BODY_BONUS: u8 = 4;
const CONCLUSION_BONUS: u8 = 3;

const GRAMMAR_BASE: u8 = 12;
const GRAMMAR_STEPS: [(usize, u8); 2] = [(10, 4), (15, 4)];

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("integer pattern compiles"))
}

fn keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[가-힣a-zA-Z]+").expect("keyword pattern compiles"))
}

/// Character count of the draft with all whitespace removed.
pub fn stripped_char_count(draft: &str) -> usize {
    draft.chars().filter(|c| !c.is_whitespace()).count()
}

/// Number of segments produced by splitting the draft on periods.
pub fn sentence_count(draft: &str) -> usize {
    draft.split('.').count()
}

/// Heuristic fulfillment check used for the condition-fulfillment sub-score.
///
/// Checks run in order: character-count range, three-part structure, then a
/// keyword fallback. A length condition that names fewer than two numbers is
/// not treated as a length check at all and falls through to the later checks.
pub fn evaluate_fulfillment(condition: &Condition, draft: &str) -> bool {
    let condition_text = condition.content.to_lowercase();
    let draft_text = draft.to_lowercase();

    if let Some(range) = char_count_range(&condition_text) {
        return range.contains(&stripped_char_count(draft));
    }

    if STRUCTURE_CUES.iter().any(|cue| condition_text.contains(cue)) {
        return has_full_structure(&draft_text);
    }

    condition_keywords(&condition_text)
        .iter()
        .any(|keyword| draft_text.contains(keyword.as_str()))
}

/// Inclusive `[min, max]` taken from the first two integers of a length condition.
pub fn char_count_range(condition_text: &str) -> Option<RangeInclusive<usize>> {
    let mentions_length = condition_text.contains(LENGTH_CUE)
        && LENGTH_UNIT_CUES
            .iter()
            .any(|cue| condition_text.contains(cue));
    if !mentions_length {
        return None;
    }

    let mut numbers = integer_pattern()
        .find_iter(condition_text)
        .map(|found| found.as_str().parse::<usize>());
    match (numbers.next(), numbers.next()) {
        (Some(Ok(min)), Some(Ok(max))) => Some(min..=max),
        _ => None,
    }
}

/// Lowercased alphabetic tokens longer than one character.
pub fn condition_keywords(condition_text: &str) -> Vec<String> {
    keyword_pattern()
        .find_iter(condition_text)
        .map(|found| found.as_str().to_lowercase())
        .filter(|token| token.chars().count() > 1)
        .collect()
}

fn has_full_structure(draft_text: &str) -> bool {
    STRUCTURE_TOKENS
        .iter()
        .all(|token| draft_text.contains(token))
}

fn contains_any(draft_text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| draft_text.contains(token))
}

fn stepped_score(base: u8, measure: usize, steps: &[(usize, u8)]) -> u8 {
    steps
        .iter()
        .filter(|(threshold, _)| measure >= *threshold)
        .fold(base, |score, (_, bonus)| score.saturating_add(*bonus))
}

pub fn content_fidelity(draft: &str) -> ScoreCategory {
    let char_count = stripped_char_count(draft);
    let score = stepped_score(CONTENT_BASE, char_count, &CONTENT_STEPS);

    let verdict = if char_count >= 1000 {
        "분량이 충분합니다."
    } else if char_count >= 800 {
        "분량이 적정합니다."
    } else {
        "내용을 더 보강할 여지가 있습니다."
    };

    ScoreCategory::new(
        ScoreCategoryKind::ContentFidelity,
        score,
        format!("공백 제외 {char_count}자. {verdict}"),
    )
}

pub fn logical_composition(draft: &str) -> ScoreCategory {
    let draft_text = draft.to_lowercase();
    let parts = [
        (INTRODUCTION_TOKENS, INTRODUCTION_BONUS),
        (BODY_TOKENS, BODY_BONUS),
        (CONCLUSION_TOKENS, CONCLUSION_BONUS),
    ];

    let mut score = COMPOSITION_BASE;
    let mut present = 0;
    for (tokens, bonus) in parts {
        if contains_any(&draft_text, &tokens) {
            score = score.saturating_add(bonus);
            present += 1;
        }
    }

    ScoreCategory::new(
        ScoreCategoryKind::LogicalComposition,
        score,
        format!("서론·본론·결론 구성 요소 {present}/3개 확인"),
    )
}

pub fn grammar_expression(draft: &str) -> ScoreCategory {
    let segments = sentence_count(draft);
    let score = stepped_score(GRAMMAR_BASE, segments, &GRAMMAR_STEPS);

    ScoreCategory::new(
        ScoreCategoryKind::GrammarExpression,
        score,
        format!("마침표 기준 {segments}개 문장 단위"),
    )
}

/// `round(min(30, fulfilled / total * 30))`, or 0 without any conditions.
pub fn condition_fulfillment_score(fulfilled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let max = f64::from(ScoreCategoryKind::ConditionFulfillment.max_score());
    let ratio = fulfilled as f64 / total as f64;
    (ratio * max).min(max).round() as u8
}

pub fn condition_fulfillment(conditions: &[Condition], draft: &str) -> ScoreCategory {
    let fulfilled = conditions
        .iter()
        .filter(|condition| evaluate_fulfillment(condition, draft))
        .count();
    let score = condition_fulfillment_score(fulfilled, conditions.len());

    let evaluation = if conditions.is_empty() {
        "인식된 조건이 없습니다.".to_string()
    } else {
        format!("{}개 조건 중 {fulfilled}개 충족", conditions.len())
    };

    ScoreCategory::new(ScoreCategoryKind::ConditionFulfillment, score, evaluation)
}
