use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::ExtractionError;
use crate::config::OcrConfig;

/// Optical character recognition over raw image bytes.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError>;
}

/// Pipes the image through the `tesseract` binary (`tesseract stdin stdout -l <langs>`).
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
    languages: String,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>, languages: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            languages: languages.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.tesseract_path.clone(), config.languages.clone())
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", self.languages.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                ExtractionError::OcrUnavailable(format!("{}: {err}", self.binary.display()))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExtractionError::OcrFailed("stdin not captured".to_string()))?;
        stdin.write_all(image).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractionError::OcrFailed(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
