use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::AnalysisResult;
use super::judge::CompletionClient;
use super::service::{AnalysisRequest, AssessmentService, AssessmentServiceError};
use crate::workflows::delivery::DeliveryError;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub result: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub result: AnalysisResult,
    pub recipient: String,
}

/// Router builder exposing the analyze, render, and share endpoints.
pub fn assessment_router<C>(service: Arc<AssessmentService<C>>) -> Router
where
    C: CompletionClient + 'static,
{
    Router::new()
        .route("/api/v1/assessment/analyze", post(analyze_handler::<C>))
        .route("/api/v1/assessment/render", post(render_handler::<C>))
        .route("/api/v1/assessment/share", post(share_handler::<C>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<C>(
    State(service): State<Arc<AssessmentService<C>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match service.analyze(&request).await {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn render_handler<C>(
    State(service): State<Arc<AssessmentService<C>>>,
    axum::Json(request): axum::Json<RenderRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    let report = service.render(&request.result);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn share_handler<C>(
    State(service): State<Arc<AssessmentService<C>>>,
    axum::Json(request): axum::Json<ShareRequest>,
) -> Response
where
    C: CompletionClient + 'static,
{
    match service.share(&request.result, &request.recipient).await {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::MissingInput => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Delivery(DeliveryError::InvalidRecipient(_)) => {
            StatusCode::BAD_REQUEST
        }
        AssessmentServiceError::Delivery(DeliveryError::Unavailable) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        AssessmentServiceError::Delivery(
            DeliveryError::Rejected { .. } | DeliveryError::Transport(_),
        ) => StatusCode::BAD_GATEWAY,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
