//! Output helpers for query responses.

pub mod export;

pub use export::*;
