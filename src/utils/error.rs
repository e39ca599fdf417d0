use crate::domain::model::Id;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("API request failed: {status}")]
    RequestError { status: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Student {student_id} is not eligible for enrollment")]
    NotEligible { student_id: Id },

    #[error("Enrollment session is not ready")]
    SessionNotReady,
}

impl AdminError {
    pub fn request(status: impl Into<String>) -> Self {
        AdminError::RequestError {
            status: status.into(),
        }
    }

    pub fn is_request_error(&self) -> bool {
        matches!(self, AdminError::RequestError { .. })
    }

    /// The status description for request failures, the full message otherwise.
    pub fn status_text(&self) -> String {
        match self {
            AdminError::RequestError { status } => status.clone(),
            other => other.to_string(),
        }
    }

    /// Short text meant for the operator, without the variant prefix.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AdminError::RequestError { status } => {
                format!("The school records service rejected the request: {}", status)
            }
            AdminError::IoError(e) => format!("Could not read a local file: {}", e),
            AdminError::TomlError(e) => format!("The configuration file is not valid TOML: {}", e),
            AdminError::ConfigError { message } => message.clone(),
            AdminError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting `{}` is invalid: {}", field, reason)
            }
            AdminError::NotEligible { student_id } => {
                format!("Student {} is already enrolled or unknown", student_id)
            }
            AdminError::SessionNotReady => "Enrollment data has not finished loading".to_string(),
        }
    }
}

// Status-less failures (connect, decode) collapse into the same kind as a
// non-2xx response.
impl From<reqwest::Error> for AdminError {
    fn from(e: reqwest::Error) -> Self {
        let status = match e.status() {
            Some(code) => describe_status(code),
            None => e.to_string(),
        };
        AdminError::RequestError { status }
    }
}

pub fn describe_status(code: reqwest::StatusCode) -> String {
    code.canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| code.as_u16().to_string())
}

pub type Result<T> = std::result::Result<T, AdminError>;
