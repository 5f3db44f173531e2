use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::assessment::router::{analyze_handler, share_handler};
use crate::workflows::assessment::{assessment_router, AnalysisRequest, MISSING_INPUT_MESSAGE};
use crate::workflows::delivery::sample_result;

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn analyze_route_returns_result_and_renderings() {
    let router = assessment_router(unconfigured_service());

    let response = router
        .oneshot(json_request(
            "/api/v1/assessment/analyze",
            json!({
                "conditions_text": conditions_text(),
                "draft_text": structured_draft(),
            }),
        ))
        .await
        .expect("response");

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["max_total_score"], 100);
    assert_eq!(body["result"]["checklist"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["display"]["total"]["headline"], "총점");
    assert_eq!(body["document"]["subject"], "Check Mate - 수행평가 분석 결과");
}

#[tokio::test]
async fn analyze_handler_rejects_blank_inputs() {
    let service = unconfigured_service();

    let response = analyze_handler(
        State(service),
        axum::Json(AnalysisRequest {
            conditions_text: "조건 1. 서론 포함".to_string(),
            draft_text: "   ".to_string(),
        }),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], MISSING_INPUT_MESSAGE);
}

#[tokio::test]
async fn render_route_accepts_a_previous_result() {
    let router = assessment_router(unconfigured_service());

    let response = router
        .oneshot(json_request(
            "/api/v1/assessment/render",
            json!({ "result": sample_result() }),
        ))
        .await
        .expect("response");

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"]["total"]["score_label"], "85점 / 100점");
    assert!(body["document"]["html"]
        .as_str()
        .is_some_and(|html| html.contains("충족됨")));
}

#[tokio::test]
async fn share_route_accepts_valid_recipient() {
    let mailer = Arc::new(RecordingMailer::default());
    let router = assessment_router(build_service(ScriptedClient::fulfilled(), mailer.clone()));

    let response = router
        .oneshot(json_request(
            "/api/v1/assessment/share",
            json!({ "result": sample_result(), "recipient": "student@example.com" }),
        ))
        .await
        .expect("response");

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["recipient"], "student@example.com");
    assert_eq!(mailer.delivered().len(), 1);
}

#[tokio::test]
async fn share_handler_maps_delivery_errors() {
    let mailer = Arc::new(RecordingMailer::default());
    let cases = [
        (
            build_service(ScriptedClient::fulfilled(), mailer.clone()),
            "not-an-address",
            StatusCode::BAD_REQUEST,
        ),
        (unconfigured_service(), "student@example.com", StatusCode::SERVICE_UNAVAILABLE),
        (
            build_service(ScriptedClient::fulfilled(), Arc::new(RejectingMailer)),
            "student@example.com",
            StatusCode::BAD_GATEWAY,
        ),
    ];

    for (service, recipient, expected) in cases {
        let response = share_handler(
            State(service),
            axum::Json(crate::workflows::assessment::router::ShareRequest {
                result: sample_result(),
                recipient: recipient.to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), expected, "recipient {recipient}");
    }
    assert!(mailer.delivered().is_empty());
}

#[tokio::test]
async fn service_analysis_renders_every_checklist_row() {
    let service = unconfigured_service();
    let request = AnalysisRequest {
        conditions_text: conditions_text(),
        draft_text: structured_draft(),
    };

    let outcome = service.analyze(&request).await.expect("analysis");

    assert_eq!(outcome.result.checklist.len(), 2);
    assert_eq!(outcome.report.display.checklist.len(), 2);
}

fn tampered_result() -> Value {
    let mut result = serde_json::to_value(sample_result()).expect("serialize result");
    result["scoring"]["content_fidelity"] =
        json!({ "kind": "grammar_expression", "score": 200, "max_score": 7, "evaluation": "" });
    result["total_score"] = json!(999);
    result
}

#[tokio::test]
async fn render_route_rejects_results_outside_the_rubric() {
    let router = assessment_router(unconfigured_service());

    let response = router
        .oneshot(json_request(
            "/api/v1/assessment/render",
            json!({ "result": tampered_result() }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn share_route_never_mails_a_tampered_result() {
    let mailer = Arc::new(RecordingMailer::default());
    let router = assessment_router(build_service(ScriptedClient::fulfilled(), mailer.clone()));

    let mut result = serde_json::to_value(sample_result()).expect("serialize result");
    result["total_score"] = json!(100);

    let response = router
        .oneshot(json_request(
            "/api/v1/assessment/share",
            json!({ "result": result, "recipient": "student@example.com" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(mailer.delivered().is_empty());
}
