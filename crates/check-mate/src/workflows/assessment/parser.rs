use regex::Regex;
use std::sync::OnceLock;

use super::domain::{Condition, CONDITION_MARKER};

fn condition_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(r"^{CONDITION_MARKER}\s*(\d+)(?:\s*\.)?\s*(.*)$");
        Regex::new(&pattern).expect("condition pattern compiles")
    })
}

/// Extracts `조건 <n>. <text>` lines in input order. Lines that do not match, or
/// that carry no text after the number, are skipped.
pub fn parse_conditions(text: &str) -> Vec<Condition> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(CONDITION_MARKER))
        .filter_map(|line| {
            let captures = condition_line().captures(line)?;
            let number = captures.get(1)?.as_str();
            let content = captures.get(2)?.as_str().trim();
            if content.is_empty() {
                None
            } else {
                Some(Condition::new(number, content))
            }
        })
        .collect()
}
