use super::common::*;
use crate::workflows::assessment::domain::Condition;
use crate::workflows::assessment::parse_conditions;

#[test]
fn parses_one_condition_per_matching_line_in_order() {
    let conditions = parse_conditions(&conditions_text());

    assert_eq!(
        conditions,
        vec![
            Condition::new("1", "글자 수 800자 이상 1200자 이하"),
            Condition::new("2", "서론-본론-결론 구조로 작성할것"),
        ]
    );
    assert_eq!(conditions[0].label(), "조건 1");
}

#[test]
fn accepts_missing_period_and_surrounding_whitespace() {
    let text = "   조건3 참고문헌을 2개 이상 제시\n\t조건 10 .  결론에 느낀 점 포함  ";

    let conditions = parse_conditions(text);

    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0], Condition::new("3", "참고문헌을 2개 이상 제시"));
    assert_eq!(conditions[1], Condition::new("10", "결론에 느낀 점 포함"));
}

#[test]
fn skips_non_matching_and_empty_lines() {
    let text = "수행평가 안내\n\n조건 1.\n조건 A. 숫자가 아님\n- 조건 2. 앞에 기호\n조건 4. 유효한 조건";

    let conditions = parse_conditions(text);

    assert_eq!(conditions, vec![Condition::new("4", "유효한 조건")]);
}

#[test]
fn blank_input_yields_no_conditions() {
    assert!(parse_conditions("").is_empty());
    assert!(parse_conditions("   \n\n").is_empty());
}
