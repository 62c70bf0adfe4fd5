//! Error types shared across the listener crates.

use std::io;

use thiserror::Error;

/// Top-level listener error type.
///
/// Only [`ListenerError::Bind`] is fatal to the process. Every other variant
/// is contained to the accept-loop iteration or session that produced it and
/// surfaces solely as a logged diagnostic. Nothing structured is ever sent
/// back to the peer; a failed session simply closes the socket.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listening socket could not be bound (port in use, permission denied).
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The `address:port` string that was being bound.
        addr: String,
        /// Underlying socket error.
        source: io::Error,
    },

    /// A single accept call failed, e.g. the peer reset before accept completed.
    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    /// The certificate or private key could not be read or parsed.
    #[error("certificate material rejected: {0}")]
    CertificateLoad(String),

    /// The TLS server handshake with the peer failed.
    #[error("TLS handshake failed: {0}")]
    Handshake(#[source] io::Error),

    /// Reading the request from the secure stream failed, including a peer
    /// that closed before sending anything.
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// Writing the response to the secure stream failed.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl ListenerError {
    /// Returns `true` if this error must abort the process rather than a
    /// single session or accept iteration.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ListenerError::Bind { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err(kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, "boom")
    }

    #[test]
    fn only_bind_is_fatal() {
        let bind = ListenerError::Bind {
            addr: "127.0.0.1:8080".into(),
            source: io_err(io::ErrorKind::AddrInUse),
        };
        assert!(bind.is_fatal());

        assert!(!ListenerError::Accept(io_err(io::ErrorKind::ConnectionReset)).is_fatal());
        assert!(!ListenerError::CertificateLoad("bad pem".into()).is_fatal());
        assert!(!ListenerError::Handshake(io_err(io::ErrorKind::InvalidData)).is_fatal());
        assert!(!ListenerError::Read(io_err(io::ErrorKind::UnexpectedEof)).is_fatal());
        assert!(!ListenerError::Write(io_err(io::ErrorKind::BrokenPipe)).is_fatal());
    }

    #[test]
    fn display_names_the_bound_address() {
        let e = ListenerError::Bind {
            addr: "0.0.0.0:443".into(),
            source: io_err(io::ErrorKind::PermissionDenied),
        };
        assert!(e.to_string().contains("0.0.0.0:443"));
    }

    #[test]
    fn display_includes_certificate_detail() {
        let e = ListenerError::CertificateLoad("no private key found in key.pem".into());
        assert!(e.to_string().contains("key.pem"));
    }
}
