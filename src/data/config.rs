//! Client configuration.
//!
//! Everything here is about *where* and *how* requests are sent; the token,
//! series and language live on the client itself.

use std::time::Duration;

use crate::error::SieError;

/// Default base URL of the SIE REST service.
pub const DEFAULT_BASE_URL: &str = "https://www.banxico.org.mx/SieAPIRest/service/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the query token.
pub const TOKEN_ENV: &str = "BANXICO_TOKEN";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SIE_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Output-format hint sent as `mediaType` when set.
    pub media_type: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("sie-banxico/{}", env!("CARGO_PKG_VERSION")),
            media_type: None,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults, with the base URL taken from `SIE_BASE_URL` when set.
    ///
    /// A `.env` file in the working directory is loaded first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn validate(&self) -> Result<(), SieError> {
        if self.base_url.is_empty() {
            return Err(SieError::Config("base_url cannot be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SieError::Config(
                "base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(SieError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Read the query token from `BANXICO_TOKEN` (after loading `.env`).
pub fn token_from_env() -> Result<String, SieError> {
    dotenvy::dotenv().ok();
    std::env::var(TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| SieError::Config(format!("missing {TOKEN_ENV} in environment (.env)")))
}
