//! TLS termination listener.
//!
//! Accepts raw TCP connections, performs the TLS server handshake with a
//! configured PEM certificate/key pair, exchanges one request/response with
//! the decrypted stream, and closes. The binary in `main.rs` wires these
//! modules together; they are exposed here so the listener can also be
//! driven in-process.

pub mod accept;
pub mod config;
pub mod session;
pub mod shutdown;
pub mod telemetry;
pub mod tls;
