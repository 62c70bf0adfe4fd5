//! TLS termination: certificate loading and the server-side handshake.
//!
//! Certificate material is re-read from disk on every handshake. That is
//! intentional: the listener trades handshake throughput for having no
//! cache or reload coordination, and replaced certificate files take effect
//! on the next connection.

use std::io;
use std::sync::Arc;

use common::ListenerError;
use rustls::ServerConfig;
use tokio::net::TcpStream;
use tokio_rustls::{server::TlsStream, TlsAcceptor};

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate and key files.
///
/// Server-only authentication: no client certificate is requested.
///
/// # Errors
///
/// Returns [`ListenerError::CertificateLoad`] if either file cannot be read,
/// the PEM cannot be parsed, or rustls rejects the resulting configuration.
/// No handshake may proceed past a failure here.
pub fn load_server_config(
    cert_path: &str,
    key_path: &str,
) -> Result<Arc<ServerConfig>, ListenerError> {
    let cert_pem = std::fs::read(cert_path)
        .map_err(|e| ListenerError::CertificateLoad(format!("{cert_path}: {e}")))?;
    let key_pem = std::fs::read(key_path)
        .map_err(|e| ListenerError::CertificateLoad(format!("{key_path}: {e}")))?;

    let certs = rustls_pemfile::certs(&mut io::BufReader::new(cert_pem.as_slice()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            ListenerError::CertificateLoad(format!("bad certificate chain in {cert_path}: {e}"))
        })?;

    let key = rustls_pemfile::private_key(&mut io::BufReader::new(key_pem.as_slice()))
        .map_err(|e| {
            ListenerError::CertificateLoad(format!("bad private key in {key_path}: {e}"))
        })?
        .ok_or_else(|| {
            ListenerError::CertificateLoad(format!("no private key found in {key_path}"))
        })?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| {
            ListenerError::CertificateLoad(format!("rustls rejected certificate material: {e}"))
        })?;

    Ok(Arc::new(config))
}

/// Terminate TLS on an accepted connection: load the certificate material
/// and drive the server-side handshake to completion.
///
/// On failure the stream has been consumed and dropped: the raw socket is
/// closed and nothing is ever written to the peer afterwards, so a failed
/// handshake is never left in a half-negotiated state.
///
/// # Errors
///
/// Returns [`ListenerError::CertificateLoad`] before any handshake bytes are
/// exchanged, or [`ListenerError::Handshake`] for I/O and protocol failures
/// during the handshake itself.
pub async fn terminate(
    stream: TcpStream,
    cert_path: &str,
    key_path: &str,
) -> Result<TlsStream<TcpStream>, ListenerError> {
    let config = load_server_config(cert_path, key_path)?;
    let acceptor = TlsAcceptor::from(config);

    acceptor
        .accept(stream)
        .await
        .map_err(ListenerError::Handshake)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tls-listener-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn rejects_missing_files() {
        let err = load_server_config("/nonexistent/cert.pem", "/nonexistent/key.pem")
            .expect_err("missing files must not load");
        assert!(matches!(err, ListenerError::CertificateLoad(_)));
    }

    #[test]
    fn rejects_garbage_pem() {
        let dir = scratch_dir("garbage-pem");
        let cert = dir.join("cert.pem");
        let key = dir.join("key.pem");
        fs::write(&cert, "not a pem").unwrap();
        fs::write(&key, "also not a pem").unwrap();

        let err = load_server_config(cert.to_str().unwrap(), key.to_str().unwrap())
            .expect_err("garbage must not load");
        assert!(matches!(err, ListenerError::CertificateLoad(_)));
    }

    #[test]
    fn accepts_generated_materials() {
        let dir = scratch_dir("generated-pem");
        let key_pair = rcgen::KeyPair::generate().expect("generate key");
        let params =
            rcgen::CertificateParams::new(vec!["localhost".into()]).expect("cert params");
        let cert = params.self_signed(&key_pair).expect("self-sign cert");

        let cert_path = dir.join("cert.pem");
        let key_path = dir.join("key.pem");
        fs::write(&cert_path, cert.pem()).unwrap();
        fs::write(&key_path, key_pair.serialize_pem()).unwrap();

        load_server_config(cert_path.to_str().unwrap(), key_path.to_str().unwrap())
            .expect("generated materials must load");
    }
}
