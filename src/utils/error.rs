use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpkeepError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Remote service returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Card {card_id} has a malformed due date '{value}': {reason}")]
    DueDateParse {
        card_id: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, UpkeepError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Remote,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl UpkeepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::AuthError { .. } => ErrorCategory::Authentication,
            Self::ApiError(_) | Self::RemoteError { .. } => ErrorCategory::Remote,
            Self::SerializationError(_) | Self::DueDateParse { .. } => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Transient remote failures are `Medium`; a rerun may well succeed.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ApiError(_) => ErrorSeverity::Medium,
            Self::RemoteError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            Self::AuthError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file against the documented schema"
            }
            Self::AuthError { .. } => {
                "Remove the token from the configuration file and rerun to authorize again"
            }
            Self::RemoteError { status: 404, .. } => {
                "Check that board_id refers to a board the token can access"
            }
            Self::RemoteError { status: 429, .. } => "Rate limited; wait a few minutes and rerun",
            Self::ApiError(_) | Self::RemoteError { .. } => {
                "Check network connectivity and the service status, then rerun"
            }
            Self::DueDateParse { .. } => "Fix or clear the card's due date on the board",
            Self::SerializationError(_) => "The service returned an unexpected payload",
            Self::IoError(_) => "Check file permissions and paths",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Authentication => format!("Could not authenticate: {}", self),
            ErrorCategory::Remote => format!("Board service unavailable: {}", self),
            ErrorCategory::Data => format!("Unexpected board data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
