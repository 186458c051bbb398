use reqwest::StatusCode;

/// Errors raised by the SIE client.
#[derive(Debug, thiserror::Error)]
pub enum SieError {
    /// Bad client input (empty series, empty token, unknown language, ...).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A date argument does not match `yyyy-mm-dd` or is not a calendar date.
    #[error("invalid {field} '{value}': expected a date in the format yyyy-mm-dd")]
    InvalidDate { field: &'static str, value: String },

    /// Connection, DNS or timeout failure.
    #[error("SIE request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `body` is kept verbatim.
    #[error("SIE request failed with status {status}. Review the token, series id or date format.")]
    Status { status: StatusCode, body: String },

    /// The response body was not valid JSON.
    #[error("failed to decode SIE response: {0}")]
    Decode(String),
}

impl SieError {
    /// True for errors raised before any network activity.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidDate { .. })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SieError> for AppError {
    fn from(err: SieError) -> Self {
        let exit_code = if err.is_input_error() { 2 } else { 4 };
        // The request URL carries the token.
        let err = match err {
            SieError::Transport(e) => SieError::Transport(e.without_url()),
            other => other,
        };
        let message = match &err {
            SieError::Status { body, .. } if !body.trim().is_empty() => {
                format!("{err}\n{}", body.trim())
            }
            _ => err.to_string(),
        };
        Self::new(exit_code, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
