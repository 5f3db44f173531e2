use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;

use super::super::domain::AnalysisResult;
use super::views::FulfillmentStatus;

pub const REPORT_SUBJECT: &str = "Check Mate - 수행평가 분석 결과";

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
        .header { background-color: #1f77b4; color: white; padding: 20px; text-align: center; }
        .score-section { background-color: #f8f9fa; padding: 20px; margin: 20px 0; border-radius: 10px; }
        .checklist-section, .scoring-section, .suggestions-section { margin: 20px 0; }
        .condition-item { margin: 10px 0; padding: 10px; border-left: 4px solid #ddd; }
        .fulfilled { border-left-color: #28a745; background-color: #d4edda; }
        .not-fulfilled { border-left-color: #dc3545; background-color: #f8d7da; }
        .score-item { margin: 10px 0; padding: 10px; background-color: #e9ecef; border-radius: 5px; }
        .suggestion-item { margin: 10px 0; padding: 10px; background-color: #fff3cd; border-radius: 5px; }
        .footer { margin-top: 40px; padding: 20px; background-color: #f8f9fa; border-radius: 10px; }
"#;

/// Self-contained HTML report handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareableDocument {
    pub subject: String,
    pub html: String,
}

pub(crate) fn render_document(
    result: &AnalysisResult,
    analyzed_at: DateTime<Local>,
) -> ShareableDocument {
    let mut html = String::new();

    writeln!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>",
        escape_html(REPORT_SUBJECT)
    )
    .expect("write head");

    writeln!(
        html,
        "<div class=\"header\"><h1>📚 {}</h1><p>분석 일시: {}</p></div>",
        escape_html(REPORT_SUBJECT),
        analyzed_at.format("%Y년 %m월 %d일 %H:%M")
    )
    .expect("write header");

    writeln!(
        html,
        "<div class=\"score-section\"><h2>📊 총점</h2><h1 style=\"font-size: 3em; color: #1f77b4; margin: 0;\">{}점</h1><p style=\"font-size: 1.2em; margin: 0;\">/ {}점</p></div>",
        result.total_score, result.max_total_score
    )
    .expect("write total");

    html.push_str("<div class=\"checklist-section\"><h2>📋 조건별 충족 여부</h2>\n");
    for item in &result.checklist {
        let status = FulfillmentStatus::from_flag(item.fulfilled);
        writeln!(
            html,
            "<div class=\"condition-item {}\"><h3>{} {} - {}</h3><p><strong>조건:</strong> {}</p><p><strong>비고:</strong> {}</p></div>",
            status.css_class(),
            status.icon(),
            escape_html(&item.condition_number),
            status.text(),
            escape_html(&item.content),
            escape_html(&item.remarks)
        )
        .expect("write checklist item");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"scoring-section\"><h2>📈 세부 점수</h2>\n");
    for category in result.scoring.categories() {
        writeln!(
            html,
            "<div class=\"score-item\"><h3>{}</h3><p><strong>점수:</strong> {}점 / {}점</p><p>{}</p></div>",
            category.kind.label(),
            category.score,
            category.max_score,
            escape_html(&category.evaluation)
        )
        .expect("write score item");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"suggestions-section\"><h2>💡 개선 제안</h2>\n");
    if result.improvement_suggestions.is_empty() {
        html.push_str("<p>개선 제안이 없습니다.</p>\n");
    } else {
        for (index, suggestion) in result.improvement_suggestions.iter().enumerate() {
            writeln!(
                html,
                "<div class=\"suggestion-item\"><p><strong>{}.</strong> {}</p></div>",
                index + 1,
                escape_html(suggestion)
            )
            .expect("write suggestion");
        }
    }
    html.push_str("</div>\n");

    html.push_str(
        "<div class=\"footer\"><p><strong>Check Mate</strong>는 AI 기반 수행평가 초안 검사 시스템입니다.</p><p>더 정확한 분석을 위해 항상 교사의 검토를 받으시기 바랍니다.</p></div>\n</body>\n</html>\n",
    );

    ShareableDocument {
        subject: REPORT_SUBJECT.to_string(),
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
