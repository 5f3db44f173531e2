use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::assessment::{AssessmentServiceError, JudgeError, ReportError};
use crate::workflows::delivery::DeliveryError;
use crate::workflows::intake::ExtractionError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Judge(JudgeError),
    Assessment(AssessmentServiceError),
    Delivery(DeliveryError),
    Report(ReportError),
    Extraction(ExtractionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Judge(err) => write!(f, "llm judge error: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
            AppError::Delivery(err) => write!(f, "delivery error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Extraction(err) => write!(f, "extraction error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Judge(err) => Some(err),
            AppError::Assessment(err) => Some(err),
            AppError::Delivery(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Extraction(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<JudgeError> for AppError {
    fn from(value: JudgeError) -> Self {
        Self::Judge(value)
    }
}

impl From<AssessmentServiceError> for AppError {
    fn from(value: AssessmentServiceError) -> Self {
        match value {
            AssessmentServiceError::Delivery(err) => Self::Delivery(err),
            other => Self::Assessment(other),
        }
    }
}

impl From<DeliveryError> for AppError {
    fn from(value: DeliveryError) -> Self {
        Self::Delivery(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

impl From<ExtractionError> for AppError {
    fn from(value: ExtractionError) -> Self {
        Self::Extraction(value)
    }
}
