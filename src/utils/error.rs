use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Request to {url} failed: {source}")]
    FetchError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    ClientError(#[source] reqwest::Error),

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Missing required email settings: {}", keys.join(", "))]
    MissingMailSettings { keys: Vec<String> },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid mail address: {0}")]
    MailAddressError(#[from] lettre::address::AddressError),

    #[error("Failed to build mail message: {0}")]
    MailBuildError(#[from] lettre::error::Error),

    #[error("Mail submission failed: {0}")]
    MailTransportError(#[from] lettre::transport::smtp::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Parsing,
    Delivery,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DigestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DigestError::FetchError { .. } | DigestError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            DigestError::MissingMailSettings { .. }
            | DigestError::InvalidConfigValueError { .. }
            | DigestError::ConfigValidationError { .. }
            | DigestError::SelectorError { .. } => ErrorCategory::Configuration,
            DigestError::UrlError(_) | DigestError::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            DigestError::MailAddressError(_)
            | DigestError::MailBuildError(_)
            | DigestError::MailTransportError(_) => ErrorCategory::Delivery,
            DigestError::IoError(_) | DigestError::ClientError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parsing | ErrorCategory::Delivery => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_config_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DigestError::FetchError { .. } => {
                "Check network connectivity and that the notice board is reachable".to_string()
            }
            DigestError::HttpStatusError { status, .. } if *status >= 500 => {
                "The notice board is failing; try again on the next scheduled run".to_string()
            }
            DigestError::HttpStatusError { .. } => {
                "Verify SCHOLARSHIP_URL points at the board listing page".to_string()
            }
            DigestError::MissingMailSettings { keys } => {
                format!("Set {} in the environment or .env file", keys.join(", "))
            }
            DigestError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {}", field)
            }
            DigestError::ConfigValidationError { .. } => {
                "Check the TOML config file syntax and referenced environment variables"
                    .to_string()
            }
            DigestError::SelectorError { .. } => {
                "Use a valid CSS selector in the [selectors] section".to_string()
            }
            DigestError::UrlError(_) => "Check the listing URL and link targets".to_string(),
            DigestError::MailAddressError(_) => {
                "EMAIL_FROM and EMAIL_TO must be valid addresses".to_string()
            }
            DigestError::MailTransportError(_) => {
                "Check EMAIL_HOST/EMAIL_PORT and the SMTP credentials".to_string()
            }
            DigestError::MailBuildError(_) | DigestError::SerializationError(_) => {
                "This is likely a bug; rerun with --verbose and report the log".to_string()
            }
            DigestError::IoError(_) => "Check file paths and permissions".to_string(),
            DigestError::ClientError(_) => {
                "Check the [http] settings such as user_agent".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not load the notice board: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Parsing => format!("Could not interpret the board data: {}", self),
            ErrorCategory::Delivery => format!("Could not send the digest email: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
