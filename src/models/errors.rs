//! Centralized Error Handling Module
//!
//! Every failure carries a unique code so log lines can be grepped by
//! category. Codes follow the pattern CATEGORY_SPECIFIC_ERROR:
//! - ARTIFACT_xxx: model/scaler loading at startup
//! - REQ_xxx: request payload problems
//! - PRED_xxx: inference problems

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Message returned to API clients. Includes the underlying cause when present.
    pub fn client_message(&self) -> String {
        match &self.source {
            Some(source) => format!("{}: {}", self.message, source),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Artifact Errors
    // ============================================
    /// Artifact file could not be read
    ArtifactReadFailed,
    /// Artifact file is not valid JSON for its schema
    ArtifactParseFailed,
    /// Artifact parsed but is internally inconsistent
    ArtifactInvalid,
    /// Scaler and model disagree on the feature count
    ArtifactShapeMismatch,

    // ============================================
    // Request Errors
    // ============================================
    /// Content-Type is not JSON
    RequestNotJson,
    /// Body is not valid JSON
    RequestMalformedJson,
    /// Body is JSON but not an object
    RequestNotObject,
    /// Required field absent
    RequestMissingField,
    /// Field present but cannot be coerced to a number
    RequestInvalidField,

    // ============================================
    // Prediction Errors
    // ============================================
    /// Scaled features do not match the artifact width
    PredictionShapeMismatch,
    /// Model produced NaN or infinity
    PredictionNonFinite,

    // ============================================
    // Generic Errors
    // ============================================
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArtifactReadFailed => "ARTIFACT_READ_FAILED",
            Self::ArtifactParseFailed => "ARTIFACT_PARSE_FAILED",
            Self::ArtifactInvalid => "ARTIFACT_INVALID",
            Self::ArtifactShapeMismatch => "ARTIFACT_SHAPE_MISMATCH",

            Self::RequestNotJson => "REQ_NOT_JSON",
            Self::RequestMalformedJson => "REQ_MALFORMED_JSON",
            Self::RequestNotObject => "REQ_NOT_OBJECT",
            Self::RequestMissingField => "REQ_MISSING_FIELD",
            Self::RequestInvalidField => "REQ_INVALID_FIELD",

            Self::PredictionShapeMismatch => "PRED_SHAPE_MISMATCH",
            Self::PredictionNonFinite => "PRED_NON_FINITE",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::RequestMissingField,
            format!("missing required field '{}'", field),
        )
    }

    pub fn invalid_field(field: &str, detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::RequestInvalidField,
            format!("field '{}' must be a number: {}", field, detail),
        )
    }

    /// Categorical field holding a container, which no label lookup accepts
    pub fn unhashable_field(field: &str, kind: &str) -> Self {
        Self::new(
            ErrorCode::RequestInvalidField,
            format!("field '{}' cannot be {}", field, kind),
        )
    }

    pub fn not_json(content_type: Option<&str>) -> Self {
        Self::new(
            ErrorCode::RequestNotJson,
            format!(
                "request content type must be application/json, got {}",
                content_type.unwrap_or("none")
            ),
        )
    }

    pub fn not_object() -> Self {
        Self::new(
            ErrorCode::RequestNotObject,
            "request body must be a JSON object",
        )
    }

    pub fn invalid_artifact(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactInvalid, msg)
    }

    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactShapeMismatch, msg)
    }
}

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::RequestMalformedJson, "invalid JSON body", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::missing_field("risk");
        assert_eq!(err.code, ErrorCode::RequestMissingField);
        assert_eq!(err.code_str(), "REQ_MISSING_FIELD");
        assert!(err.to_string().contains("risk"));
    }

    #[test]
    fn test_not_json_names_content_type() {
        let err = AppError::not_json(Some("text/plain"));
        assert_eq!(err.code_str(), "REQ_NOT_JSON");
        assert!(err.message.contains("text/plain"));
        assert!(AppError::not_json(None).message.ends_with("none"));
    }

    #[test]
    fn test_client_message_includes_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert_eq!(err.code, ErrorCode::RequestMalformedJson);
        let msg = err.client_message();
        assert!(msg.starts_with("invalid JSON body: "));
        assert!(msg.len() > "invalid JSON body: ".len());
    }
}
