use crate::utils::error::{BookshopError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BookshopError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 服務根路徑必須以 `/` 開頭且不以 `/` 結尾
pub fn validate_base_path(field_name: &str, base_path: &str) -> Result<()> {
    if !base_path.starts_with('/') || (base_path.len() > 1 && base_path.ends_with('/')) {
        return Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: base_path.to_string(),
            reason: "Base path must start with '/' and must not end with '/'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| BookshopError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookshopError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("data.endpoint", "https://example.com").is_ok());
        assert!(validate_url("data.endpoint", "http://example.com").is_ok());
        assert!(validate_url("data.endpoint", "").is_err());
        assert!(validate_url("data.endpoint", "invalid-url").is_err());
        assert!(validate_url("data.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_base_path() {
        assert!(validate_base_path("service.base_path", "/odata/v4/catalog").is_ok());
        assert!(validate_base_path("service.base_path", "/").is_ok());
        assert!(validate_base_path("service.base_path", "odata").is_err());
        assert!(validate_base_path("service.base_path", "/odata/").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("server.port", 4004, 1).is_ok());
        assert!(validate_positive_number("server.port", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("books.csv".to_string());
        let absent: Option<String> = None;
        assert_eq!(
            validate_required_field("data.path", &present).unwrap(),
            "books.csv"
        );
        assert!(matches!(
            validate_required_field("data.path", &absent),
            Err(BookshopError::MissingConfigError { .. })
        ));
    }
}
