use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Request to {url} failed: {source}")]
    TransportError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Failed to decode {context}: {source}")]
    DecodeError {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Filesystem error at {path}: {source}")]
    FilesystemError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Fetch task did not complete: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity. Never 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        EtlError::DecodeError {
            context: context.into(),
            source,
        }
    }

    pub fn filesystem(path: impl Into<String>, source: std::io::Error) -> Self {
        EtlError::FilesystemError {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::TransportError { .. } | EtlError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            EtlError::DecodeError { .. } | EtlError::SerializationError(_) => ErrorCategory::Data,
            EtlError::FilesystemError { .. } => ErrorCategory::Storage,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::TaskError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the remote side may recover on its own, a rerun can succeed
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::TransportError { url, .. } => {
                format!("Could not reach {}", url)
            }
            EtlError::HttpStatusError { url, status } => {
                format!("Server answered {} for {}", status, url)
            }
            EtlError::DecodeError { context, .. } => {
                format!("Received malformed data while decoding {}", context)
            }
            EtlError::FilesystemError { path, .. } => {
                format!("Could not write {}", path)
            }
            EtlError::SerializationError(_) => "Could not encode fetched data".to_string(),
            EtlError::TaskError(_) => "A fetch task stopped unexpectedly".to_string(),
            EtlError::ConfigError { message } => format!("Invalid configuration: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            EtlError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the listing URL, then rerun",
            ErrorCategory::Data => "The API response format may have changed; inspect the payload",
            ErrorCategory::Storage => "Check that the output directory is writable and has free space",
            ErrorCategory::Configuration => "Fix the flagged setting (see --help) and rerun",
            ErrorCategory::Runtime => "Rerun with --verbose and report the log if it persists",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
