//! Remote data access: the SIE client, its configuration and HTTP transport.

pub mod config;
pub mod sie;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_BASE_URL, token_from_env};
pub use sie::{Endpoint, SieClient};
pub use transport::{HttpTransport, Transport};
