//! Per-connection session: one bounded read, one canned response.

use std::io;
use std::net::SocketAddr;

use common::protocol::{REQUEST_BUFFER_SIZE, RESPONSE};
use common::ListenerError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

/// Serve one terminated connection: read up to [`REQUEST_BUFFER_SIZE`]
/// bytes, answer with [`RESPONSE`], close.
///
/// The received bytes are logged and otherwise ignored. The listener speaks
/// no protocol beyond its fixed response, and there is no keep-alive or
/// re-read loop: exactly one read and one write per session. The stream's
/// close_notify is sent before it is dropped, so the secure layer is
/// released first and the raw socket last.
///
/// # Errors
///
/// Returns [`ListenerError::Read`] if the peer errors or closes before
/// sending anything (nothing is written in that case), and
/// [`ListenerError::Write`] if the response cannot be delivered. Either one
/// ends this session only, never the process.
pub async fn serve<S>(mut stream: S, peer: SocketAddr) -> Result<(), ListenerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = [0u8; REQUEST_BUFFER_SIZE];

    let n = stream.read(&mut buffer).await.map_err(ListenerError::Read)?;
    if n == 0 {
        return Err(ListenerError::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "peer closed before sending a request",
        )));
    }
    info!(
        %peer,
        bytes = n,
        request = %String::from_utf8_lossy(&buffer[..n]),
        "request received"
    );

    stream
        .write_all(RESPONSE)
        .await
        .map_err(ListenerError::Write)?;

    // close_notify; the transport closes when `stream` drops.
    let _ = stream.shutdown().await;
    Ok(())
}
