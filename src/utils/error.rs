use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid coordinate ({latitude}, {longitude}): {reason}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        reason: String,
    },

    #[error("You need to be logged in to modify your information.")]
    NotSignedIn,

    #[error("Sign-in failed: {message}")]
    SignInFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ProfileError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProfileError::HttpError(_) => ErrorCategory::Network,
            ProfileError::IoError(_) => ErrorCategory::Storage,
            ProfileError::SerializationError(_)
            | ProfileError::MalformedResponse { .. }
            | ProfileError::InvalidCoordinate { .. } => ErrorCategory::Data,
            ProfileError::ConfigValidationError { .. }
            | ProfileError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProfileError::NotSignedIn | ProfileError::SignInFailed { .. } => {
                ErrorCategory::Session
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Session => ErrorSeverity::Medium,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProfileError::HttpError(_) => "Could not reach a remote service.".to_string(),
            ProfileError::IoError(e) => format!("Local storage is not accessible: {}", e),
            ProfileError::SerializationError(_) => "Stored data is corrupted.".to_string(),
            ProfileError::SignInFailed { .. } => "Failed to sign in. Please try again.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProfileError::HttpError(_) => "Check the network connection and the geocoder base URL",
            ProfileError::IoError(_) => "Check that the data directory exists and is writable",
            ProfileError::SerializationError(_) => {
                "Remove or fix the stored JSON file in the data directory"
            }
            ProfileError::ConfigValidationError { .. }
            | ProfileError::InvalidConfigValueError { .. } => "Review the TOML configuration file",
            ProfileError::MalformedResponse { .. } => {
                "Check that the geocoder base URL points at a GeoJSON search API"
            }
            ProfileError::InvalidCoordinate { .. } => {
                "Latitude must be within [-90, 90] and longitude within [-180, 180]"
            }
            ProfileError::NotSignedIn => "Run the sign-in command first",
            ProfileError::SignInFailed { .. } => {
                "Configure [identity] display_name and email in the configuration file"
            }
        }
    }

    pub(crate) fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
