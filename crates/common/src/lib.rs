//! Error taxonomy and wire constants shared across `tls-listener` crates.

pub mod error;
pub mod protocol;

pub use error::ListenerError;
