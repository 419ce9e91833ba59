use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    /// No response was received (connection refused, reset, timed out).
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// A response was received but it is unusable.
    #[error("API error{}: {message}", status_suffix(.status))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" (status {})", code))
        .unwrap_or_default()
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_status() || err.is_decode() {
            StatsError::ApiError {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        } else if err.is_builder() {
            StatsError::ConfigError {
                message: format!("cannot build request: {}", err),
            }
        } else {
            StatsError::NetworkError(err)
        }
    }
}

impl StatsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StatsError::NetworkError(_) => ErrorCategory::Network,
            StatsError::ApiError { .. } => ErrorCategory::Api,
            StatsError::ConfigError { .. }
            | StatsError::MissingConfigError { .. }
            | StatsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StatsError::IoError(_) | StatsError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Api | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Only transport failures are skipped over by the engine; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StatsError::NetworkError(_))
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StatsError::NetworkError(_) => "Check the internet connection and try again",
            StatsError::ApiError {
                status: Some(401 | 403),
                ..
            } => "Check that SUPERJOB_KEY holds a valid SuperJob application key",
            StatsError::ApiError { .. } => {
                "The job board rejected the request; check area ids and try again later"
            }
            StatsError::ConfigError { .. } | StatsError::InvalidConfigValueError { .. } => {
                "Review the command line arguments and the config file"
            }
            StatsError::MissingConfigError { .. } => {
                "Set the missing value in .env, the environment or the config file"
            }
            StatsError::IoError(_) => "Check file paths and permissions",
            StatsError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StatsError::NetworkError(_) => "Could not reach the job board".to_string(),
            StatsError::ApiError { status, .. } => match status {
                Some(code) => format!("The job board answered with HTTP {}", code),
                None => "The job board returned an unreadable response".to_string(),
            },
            StatsError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
