//! # JSON-Lines Front End
//!
//! Reads one [`Command`] per line and writes one [`Reply`] per line, in order.
//! Blank lines are skipped. A line that does not parse gets an error reply of
//! kind `malformed` and does not stop the loop.

use crate::commands::{Command, Reply};
use crate::runtime::{RuntimeError, RuntimeHandle};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Front end failures. Bad input is answered, not returned.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Replies could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The runtime went away mid-stream.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Serves commands from `input` until end of input. Returns the number of
/// lines answered.
///
/// # Errors
///
/// See [`ServeError`].
pub async fn serve<R, W>(handle: &RuntimeHandle, input: R, mut output: W) -> Result<u64, ServeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut answered = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Command>(line) {
            Ok(command) => {
                debug!(command = command.name(), "received");
                handle.submit(command).await?
            }
            Err(err) => {
                warn!(error = %err, "malformed command");
                Reply::Error {
                    id: String::new(),
                    kind: "malformed".to_string(),
                    message: err.to_string(),
                }
            }
        };

        let mut encoded = serde_json::to_vec(&reply)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
        output.flush().await?;
        answered += 1;
    }

    Ok(answered)
}
