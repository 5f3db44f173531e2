use super::super::domain::Condition;

/// Prompt asking the model whether one condition is met by the draft.
pub fn build_judgment_prompt(condition: &Condition, draft: &str) -> String {
    format!(
        r#"다음 조건이 수행평가 초안에서 충족되었는지 판단해주세요.

조건: {condition}

수행평가 초안:
{draft}

다음 JSON 형식으로만 응답해주세요:
{{
    "fulfilled": true/false,
    "remarks": "충족 여부에 대한 간단한 설명"
}}"#,
        condition = condition.content,
        draft = draft,
    )
}
