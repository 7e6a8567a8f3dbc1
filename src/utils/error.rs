use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Sector {id} references unknown parent {parent_id}")]
    DanglingParent { id: i64, parent_id: i64 },

    #[error("Unexpected API response: {message}")]
    InvalidResponse { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::ApiError(_) => ErrorCategory::Network,
            FormError::IoError(_) | FormError::StorageError { .. } => ErrorCategory::Storage,
            FormError::ConfigError { .. }
            | FormError::InvalidConfigValueError { .. }
            | FormError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FormError::SerializationError(_)
            | FormError::DanglingParent { .. }
            | FormError::InvalidResponse { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FormError::ApiError(_) => ErrorSeverity::Medium,
            FormError::DanglingParent { .. }
            | FormError::SerializationError(_)
            | FormError::InvalidResponse { .. } => ErrorSeverity::High,
            FormError::IoError(_) | FormError::StorageError { .. } => ErrorSeverity::High,
            FormError::ConfigError { .. }
            | FormError::InvalidConfigValueError { .. }
            | FormError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the API endpoint is reachable and try the command again"
            }
            ErrorCategory::Storage => {
                "Check that the storage file is readable and writable, or pass --storage-path"
            }
            ErrorCategory::Configuration => {
                "Fix the configuration file or command line arguments"
            }
            ErrorCategory::Data => "The API returned data this client cannot use",
        }
    }

    // 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
            ErrorSeverity::High => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::ApiError(e) if e.is_timeout() => {
                "The API did not answer in time".to_string()
            }
            FormError::ApiError(e) => match e.status() {
                Some(status) => format!("The API answered with status {}", status),
                None => "Could not reach the API".to_string(),
            },
            FormError::DanglingParent { id, parent_id } => format!(
                "Sector {} points at parent {} which the API did not return",
                id, parent_id
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Process exit code for a form that failed validation. No error maps here.
pub const EXIT_INVALID_FORM: i32 = 1;
