//! Wire-level constants exchanged with connecting peers.
//!
//! The listener does not parse what a peer sends. It reads one bounded
//! buffer from the decrypted stream and answers with a fixed response
//! regardless of content, so the whole wire contract fits in two constants.

/// Maximum number of request bytes read from a session before responding.
pub const REQUEST_BUFFER_SIZE: usize = 1024;

/// The response written verbatim to every session after a non-empty read.
///
/// Shaped like a minimal HTTP response so ordinary clients render it, but
/// the listener implements no HTTP semantics around it.
pub const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\r\nHello client, from the listener!\n";
