use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::artifact::UploadedArtifact;
use super::extractor::TextExtractor;

const UPLOAD_FIELD: &str = "file";
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Router exposing file-to-text extraction for the condition and draft inputs.
pub fn intake_router(extractor: Arc<TextExtractor>) -> Router {
    Router::new()
        .route("/api/v1/intake/extract", post(extract_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(extractor)
}

pub(crate) async fn extract_handler(
    State(extractor): State<Arc<TextExtractor>>,
    mut multipart: Multipart,
) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return bad_request(err.to_string()),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return bad_request(err.to_string()),
        };

        let artifact = UploadedArtifact::new(file_name, content_type, bytes.to_vec());
        let kind = artifact.kind();
        let text = extractor.extract(&artifact).await;
        tracing::info!(kind = kind.label(), characters = text.chars().count(), "upload extracted");

        return (
            StatusCode::OK,
            axum::Json(json!({ "kind": kind.label(), "text": text })),
        )
            .into_response();
    }

    bad_request(format!("multipart field `{UPLOAD_FIELD}` is required"))
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}
