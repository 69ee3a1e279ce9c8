use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{entity} '{id}' not found")]
    NotFound { entity: String, id: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Configuration,
    Input,
    Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MarketError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ZipError(_) | Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } | Self::NotFound { .. } | Self::Conflict { .. } => {
                ErrorCategory::Input
            }
            Self::Unauthorized { .. } => ErrorCategory::Access,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } => ErrorSeverity::Low,
            Self::ValidationError { .. } | Self::Unauthorized { .. } | Self::Conflict { .. } => {
                ErrorSeverity::Medium
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 給操作者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the data directory exists and is writable",
            Self::SerializationError(_) => {
                "A data file contains malformed JSON; restore it from a backup archive"
            }
            Self::CsvError(_) | Self::ZipError(_) => "Retry the export with a writable output path",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and restart"
            }
            Self::ValidationError { .. } => "Correct the request payload and try again",
            Self::NotFound { .. } => "Verify the identifier and try again",
            Self::Unauthorized { .. } => "Check the supplied credentials",
            Self::Conflict { .. } => "Use a different identifier",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage => format!("Data storage failure: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input | ErrorCategory::Access => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
