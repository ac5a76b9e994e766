use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to load model artifact '{path}': {message}")]
    ModelLoadError { path: String, message: String },

    #[error("Prediction failed: {message}")]
    PredictionError { message: String },

    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Model,
    Input,
    Configuration,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn model_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModelLoadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::PredictionError {
            message: message.into(),
        }
    }

    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInputError {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::IoError(_) => ErrorCategory::Io,
            AppError::SerializationError(_)
            | AppError::ModelLoadError { .. }
            | AppError::PredictionError { .. } => ErrorCategory::Model,
            AppError::CsvError(_) | AppError::InvalidInputError { .. } => ErrorCategory::Input,
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::ServerError { .. } => ErrorCategory::Server,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::InvalidInputError { .. } => ErrorSeverity::Low,
            AppError::CsvError(_) | AppError::PredictionError { .. } => ErrorSeverity::Medium,
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            AppError::IoError(_)
            | AppError::SerializationError(_)
            | AppError::ModelLoadError { .. }
            | AppError::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AppError::SerializationError(_) | AppError::ModelLoadError { .. } => {
                "Re-export the model artifact as JSON and point --model at it".to_string()
            }
            AppError::CsvError(_) => {
                "Check the CSV delimiter and that every feature column is present".to_string()
            }
            AppError::PredictionError { .. } => {
                "The model artifact does not match the 11-feature input; re-export it".to_string()
            }
            AppError::InvalidInputError { field, .. } => {
                format!("Enter a value for '{}' within its allowed range", field)
            }
            AppError::ConfigValidationError { field, .. }
            | AppError::InvalidConfigValueError { field, .. } => {
                format!("Fix '{}' in the configuration file or command line", field)
            }
            AppError::ServerError { .. } => {
                "Check that the bind address is free and reachable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Model => format!("Model problem: {}", self),
            ErrorCategory::Input => format!("Input rejected: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Server => format!("Server problem: {}", self),
        }
    }

    /// 二進位檔依嚴重程度決定的退出碼，錯誤一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_error_is_critical() {
        let err = AppError::model_load("model.json", "No such file");
        assert_eq!(err.category(), ErrorCategory::Model);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("model.json"));
    }

    #[test]
    fn test_invalid_input_is_low_severity() {
        let err = AppError::invalid_input("ph", "15", "Value must be at most 14");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.recovery_suggestion().contains("ph"));
        assert!(err.user_friendly_message().starts_with("Input rejected"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = [
            AppError::invalid_input("alcohol", "-1", "Value must be at least 0"),
            AppError::prediction("Random forest has no trees"),
            AppError::model_load("model.json", "No such file"),
            AppError::ServerError {
                message: "address in use".to_string(),
            },
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{}", err);
        }
    }

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = AppError::InvalidConfigValueError {
            field: "server.bind".to_string(),
            value: "nowhere".to_string(),
            reason: "Invalid socket address".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
    }
}
