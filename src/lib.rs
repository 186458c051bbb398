//! `sie-banxico` library crate.
//!
//! A small synchronous client for the Economic Information System (SIE) API of
//! Banco de México. Queries return the decoded JSON document untouched.
//!
//! ```no_run
//! use sie_banxico::{Language, SieClient, PctChange};
//!
//! let client = SieClient::new("my-token", ["SF43718", "SF46410"], Language::En)?;
//! let metadata = client.get_metadata()?;
//! let latest = client.get_last_data(Some(PctChange::Annual.as_param()))?;
//! let window = client.get_timeseries_range("2020-01-01", "2020-12-31", None)?;
//! # let _ = (metadata, latest, window);
//! # Ok::<(), sie_banxico::SieError>(())
//! ```
//!
//! The `sie` binary is a thin wrapper around this library.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;

pub use data::{ClientConfig, Endpoint, HttpTransport, SieClient, Transport};
pub use domain::{Language, PctChange};
pub use error::SieError;
