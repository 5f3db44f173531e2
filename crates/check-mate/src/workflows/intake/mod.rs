//! Plain-text extraction from uploaded requirement and draft files.

mod artifact;
mod extractor;
mod ocr;
pub mod router;


pub use artifact::{ArtifactKind, UploadedArtifact};
pub use extractor::{decode_text, TextExtractor};
pub use ocr::{OcrEngine, TesseractCli};
pub use router::intake_router;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),
    #[error("OCR failed: {0}")]
    OcrFailed(String),
    #[error("no text recognized in image")]
    NoTextRecognized,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
