use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
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

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unknown league selector '{selector}'")]
    UnknownLeague { selector: String },

    #[error("Fetch failed for {unit}: {message}")]
    FetchError { unit: String, message: String },

    #[error("Page parse error: {message}")]
    ParseError { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Description service error: {message}")]
    DescriptionError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Parsing,
    Storage,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::UnknownLeague { .. } => ErrorCategory::Configuration,
            EtlError::HttpError(_)
            | EtlError::FetchError { .. }
            | EtlError::DescriptionError { .. } => ErrorCategory::Network,
            EtlError::ParseError { .. } | EtlError::SerializationError(_) => ErrorCategory::Parsing,
            EtlError::ZipError(_)
            | EtlError::CsvError(_)
            | EtlError::IoError(_)
            | EtlError::TemplateError { .. } => ErrorCategory::Storage,
            EtlError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parsing => ErrorSeverity::Low,
            ErrorCategory::Storage | ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    /// 只有配置錯誤會中止整個執行
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::UnknownLeague { .. } => "Use one of the built-in leagues: mlb, nba, wnba, nhl",
            EtlError::MissingConfigError { .. } => "Add the missing key to the TOML configuration file",
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigValidationError { .. } => {
                "Fix the highlighted configuration value and run again"
            }
            EtlError::ConfigError { .. } => "Check the configuration file path and syntax",
            EtlError::HttpError(_) | EtlError::FetchError { .. } => {
                "Check network access to the schedule source or raise the retry budget"
            }
            EtlError::DescriptionError { .. } => {
                "Check the description endpoint and API key, or disable descriptions"
            }
            EtlError::ParseError { .. } => "The source layout may have changed; inspect the fetched page",
            EtlError::TemplateError { .. } => "Make sure the template exists and contains the target sheet",
            EtlError::ZipError(_) | EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Run again with --verbose for more details"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Network => format!("Could not reach a remote service: {}", self),
            ErrorCategory::Parsing => format!("Could not read source data: {}", self),
            ErrorCategory::Storage => format!("Could not write export artifacts: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_fatal_and_critical() {
        let err = EtlError::UnknownLeague {
            selector: "xfl".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("xfl"));
    }

    #[test]
    fn test_fetch_errors_are_not_fatal() {
        let err = EtlError::FetchError {
            unit: "dodgers".to_string(),
            message: "status 503".to_string(),
        };
        assert!(!err.is_fatal());
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
