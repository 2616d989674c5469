use thiserror::Error;

#[derive(Error, Debug)]
pub enum FancyError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unsupported file type: {file_name}")]
    UnsupportedFileError { file_name: String },

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLargeError { size: u64, limit: u64 },

    #[error("Telegram API call '{method}' failed: {description}")]
    TelegramApiError { method: String, description: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FancyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::HttpError(_) | Self::TelegramApiError { .. } => ErrorCategory::Network,
            Self::UnsupportedFileError { .. }
            | Self::FileTooLargeError { .. }
            | Self::CsvError(_)
            | Self::ZipError(_) => ErrorCategory::Input,
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Processing | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UnsupportedFileError { .. } => {
                "Unsupported file type. Send a .txt, .csv or .xlsx file.".to_string()
            }
            Self::FileTooLargeError { limit, .. } => {
                format!("File is too large. Maximum size is {} MB.", limit / 1024 / 1024)
            }
            Self::CsvError(_) => "The CSV file could not be read.".to_string(),
            Self::ZipError(_) => "The XLSX file could not be read.".to_string(),
            Self::HttpError(_) | Self::TelegramApiError { .. } => {
                "Could not reach the chat service.".to_string()
            }
            Self::MissingConfigError { field } => format!("Missing configuration: {}", field),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => {
                "Set the missing value via command line, environment or config file"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "Check the configuration values and restart",
            Self::HttpError(_) => "Check network connectivity and the API base URL",
            Self::TelegramApiError { .. } => "Verify the bot token and the Telegram API status",
            Self::UnsupportedFileError { .. } => "Convert the file to .txt, .csv or .xlsx",
            Self::FileTooLargeError { .. } => "Split the file into smaller parts",
            Self::CsvError(_) | Self::ZipError(_) => "Re-export the file and try again",
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                "Run with --verbose and inspect the logs"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FancyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = FancyError::MissingConfigError {
            field: "bot_token".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("bot_token"));
    }

    #[test]
    fn test_input_errors_are_low_severity() {
        let err = FancyError::UnsupportedFileError {
            file_name: "photo.png".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains(".xlsx"));
    }

    #[test]
    fn test_file_too_large_message_in_megabytes() {
        let err = FancyError::FileTooLargeError {
            size: 30 * 1024 * 1024,
            limit: 20 * 1024 * 1024,
        };
        assert!(err.user_friendly_message().contains("20 MB"));
    }
}
