use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookshopError {
    #[error("Remote source request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Book store error: {message}")]
    StoreError { message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{entity} with key {key} not found")]
    NotFound { entity: String, key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Access,
    Request,
}

impl BookshopError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookshopError::ConfigError { .. }
            | BookshopError::ConfigValidationError { .. }
            | BookshopError::InvalidConfigValueError { .. }
            | BookshopError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BookshopError::HttpError(_)
            | BookshopError::CsvError(_)
            | BookshopError::IoError(_)
            | BookshopError::SerializationError(_)
            | BookshopError::StoreError { .. } => ErrorCategory::Storage,
            BookshopError::Unauthorized | BookshopError::Forbidden { .. } => ErrorCategory::Access,
            BookshopError::NotFound { .. } => ErrorCategory::Request,
        }
    }

    /// 對應的 HTTP 狀態碼，存儲失敗一律 500
    pub fn status_code(&self) -> u16 {
        match self {
            BookshopError::Unauthorized => 401,
            BookshopError::Forbidden { .. } => 403,
            BookshopError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Could not read books: {}", self),
            ErrorCategory::Access | ErrorCategory::Request => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookshopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BookshopError::Unauthorized.status_code(), 401);
        assert_eq!(
            BookshopError::Forbidden {
                message: "Not authorized".to_string()
            }
            .status_code(),
            403
        );
        assert_eq!(
            BookshopError::NotFound {
                entity: "Books".to_string(),
                key: "7".to_string()
            }
            .status_code(),
            404
        );
        assert_eq!(
            BookshopError::StoreError {
                message: "down".to_string()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_io_error_is_storage_category() {
        let err: BookshopError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.user_friendly_message().starts_with("Could not read books"));
    }

    #[test]
    fn test_forbidden_message_is_passed_through() {
        let err = BookshopError::Forbidden {
            message: "Not authorized".to_string(),
        };
        assert_eq!(err.to_string(), "Not authorized");
        assert_eq!(err.user_friendly_message(), "Not authorized");
    }
}
