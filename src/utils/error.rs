use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Constraint configuration not found: {path}")]
    ConfigNotFoundError { path: String },

    #[error("Failed to parse constraint configuration '{source_name}': {message}")]
    ConfigParseError {
        source_name: String,
        message: String,
    },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid course data for '{field}' ({value}): {reason}")]
    DomainValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Course data error in '{source_name}': {message}")]
    CourseDataError {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    CourseData,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::ConfigNotFoundError { .. }
            | AuditError::ConfigParseError { .. }
            | AuditError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AuditError::DomainValidationError { .. }
            | AuditError::CourseDataError { .. }
            | AuditError::CsvError(_)
            | AuditError::SerializationError(_) => ErrorCategory::CourseData,
            AuditError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 所有錯誤都是確定性的結構錯誤，重試不會改變結果
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::CourseData => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuditError::ConfigNotFoundError { .. } => {
                "Check the --constraints path; the file must exist and end in .toml or .json"
            }
            AuditError::ConfigParseError { .. } => {
                "Make sure total_num_credits, ECE472_required and min_depth_requirement are all present"
            }
            AuditError::InvalidConfigValueError { .. } => {
                "Fix the offending value in the constraint file and run again"
            }
            AuditError::DomainValidationError { .. } => {
                "Correct the course row: credits and unit values must be non-negative, area must be 1-6"
            }
            AuditError::CourseDataError { .. }
            | AuditError::CsvError(_)
            | AuditError::SerializationError(_) => {
                "Check the course list file format against the expected columns"
            }
            AuditError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::ConfigNotFoundError { path } => {
                format!("找不到約束設定檔: {}", path)
            }
            AuditError::ConfigParseError { source_name, .. } => {
                format!("約束設定檔格式錯誤: {}", source_name)
            }
            AuditError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 {} 無效: {}", field, reason)
            }
            AuditError::DomainValidationError { field, value, reason } => {
                format!("課程資料無效 ({} = {}): {}", field, value, reason)
            }
            other => other.to_string(),
        }
    }

    pub(crate) fn invalid_course(
        field: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AuditError::DomainValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = AuditError::ConfigNotFoundError {
            path: "missing.toml".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_domain_validation_message_names_field() {
        let err = AuditError::invalid_course("credits", "-1", "credits cannot be negative");
        assert_eq!(err.category(), ErrorCategory::CourseData);
        assert!(err.user_friendly_message().contains("credits"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_every_error_is_at_least_medium_severity() {
        let errors = [
            AuditError::ConfigParseError {
                source_name: "constraints.toml".to_string(),
                message: "bad".to_string(),
            },
            AuditError::invalid_course("area", 9, "out of range"),
            AuditError::IoError(std::io::Error::other("disk")),
        ];
        for err in errors {
            assert!(err.severity() >= ErrorSeverity::Medium);
        }
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = AuditError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
