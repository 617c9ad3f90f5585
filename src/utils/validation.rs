use crate::utils::error::{EtlError, Result};
use tokio::sync::Semaphore;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// `None` means "no cap" and is always accepted.
pub fn validate_concurrency_cap(field_name: &str, value: Option<usize>) -> Result<()> {
    match value {
        Some(0) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1 (omit it for unbounded fan-out)".to_string(),
        }),
        Some(permits) if permits > Semaphore::MAX_PERMITS => {
            Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: permits.to_string(),
                reason: format!("Value must be at most {}", Semaphore::MAX_PERMITS),
            })
        }
        _ => Ok(()),
    }
}

/// Shared checks for anything that can configure a run.
pub fn validate_run_settings(config: &impl crate::domain::ports::ConfigProvider) -> Result<()> {
    validate_url("listing_url", config.listing_url())?;
    validate_path("output_root", config.output_root())?;
    validate_path("entity_dir", config.entity_dir())?;
    validate_path("aggregate_file", config.aggregate_file())?;
    validate_concurrency_cap("max_concurrent_requests", config.max_concurrent_requests())
}
