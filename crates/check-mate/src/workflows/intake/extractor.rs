use encoding_rs::EUC_KR;
use std::sync::Arc;

use super::artifact::{ArtifactKind, UploadedArtifact};
use super::ocr::{OcrEngine, TesseractCli};
use super::ExtractionError;
use crate::config::OcrConfig;

const UTF8_BOM: char = '\u{feff}';

/// Turns uploaded files into plain text for the condition and draft inputs.
#[derive(Clone)]
pub struct TextExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(Arc::new(TesseractCli::from_config(config)))
    }

    /// Never fails: unsupported files, OCR errors, and blank OCR output all
    /// produce an empty string and a warning.
    pub async fn extract(&self, artifact: &UploadedArtifact) -> String {
        match self.try_extract(artifact).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    file_name = artifact.file_name.as_deref().unwrap_or("<unnamed>"),
                    error = %err,
                    "text extraction failed"
                );
                String::new()
            }
        }
    }

    pub async fn try_extract(&self, artifact: &UploadedArtifact) -> Result<String, ExtractionError> {
        match artifact.kind() {
            ArtifactKind::Image => {
                let text = self.ocr.recognize(&artifact.bytes).await?;
                let text = text.trim();
                if text.is_empty() {
                    return Err(ExtractionError::NoTextRecognized);
                }
                Ok(text.to_string())
            }
            ArtifactKind::Text => Ok(decode_text(&artifact.bytes)),
            ArtifactKind::Unsupported => Err(ExtractionError::Unsupported(
                artifact
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

/// UTF-8 with an optional byte-order mark, then CP949 (Windows Korean).
/// Bytes that fit neither are decoded lossily as UTF-8.
pub fn decode_text(bytes: &[u8]) -> String {
    let decoded = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => match EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => {
                tracing::debug!("uploaded text decoded as CP949");
                text.into_owned()
            }
            None => {
                tracing::warn!(
                    valid_up_to = err.valid_up_to(),
                    "uploaded text is neither UTF-8 nor CP949; decoding lossily"
                );
                String::from_utf8_lossy(bytes).into_owned()
            }
        },
    };

    decoded.trim_start_matches(UTF8_BOM).trim().to_string()
}
