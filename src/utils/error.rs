use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset '{name}' could not be loaded: {message}")]
    DatasetError { name: String, message: String },

    #[error("Rendering error: {0}")]
    RenderError(#[from] std::fmt::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ConfigError { .. }
            | AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::CsvError(_) | AppError::DatasetError { .. } => ErrorCategory::Data,
            AppError::IoError(_) | AppError::RenderError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Data => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ConfigError { message } => format!("Configuration problem: {}", message),
            AppError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is not valid: {}", field, message)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is not valid: {}", field, reason)
            }
            AppError::DatasetError { name, .. } => format!("Could not load dataset '{}'", name),
            AppError::CsvError(_) => "A data file is not valid CSV".to_string(),
            AppError::IoError(e) => format!("File system error: {}", e),
            AppError::RenderError(_) => "The page could not be rendered".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the configuration file and command line arguments",
            ErrorCategory::Data => "Check that the data directory contains the expected CSV files",
            ErrorCategory::System => "Check file permissions, available disk space and network ports",
        }
    }
}

/// Failure of the optional remote translation provider.
///
/// Never leaves the text resolver.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation timed out after {0} ms")]
    Timeout(u64),

    #[error("translation quota exceeded")]
    QuotaExceeded,

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("translation request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("translation service returned HTTP {0}")]
    HttpStatus(u16),

    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
