//! Newline-delimited JSON-RPC transport.
//!
//! One message per line in each direction. Blank lines are skipped. A line
//! that is not JSON (including bytes that are not UTF-8) gets a `-32700`
//! response with a null id and serving continues; a JSON value that is not
//! a request gets `-32600`.

use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::handler::McpHandler;
use crate::protocol::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse};

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serve requests from `reader` until end of input, writing responses to
/// `writer`. Returns the number of responses written.
pub async fn serve<R, W>(
    handler: &McpHandler,
    mut reader: R,
    mut writer: W,
) -> Result<u64, TransportError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut written = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let Some(response) = dispatch_line(handler, &buf) else {
            continue;
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        writer.write_all(&payload).await?;
        writer.flush().await?;
        written += 1;
    }

    info!(responses = written, "input closed, MCP server stopping");
    Ok(written)
}

/// Decode one line and run it through the handler.
///
/// Invalid UTF-8 is reported like any other unparsable line.
fn dispatch_line(handler: &McpHandler, line: &[u8]) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_slice(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "unparsable JSON-RPC message");
            return Some(JsonRpcResponse::error(
                JsonRpcId::Null,
                JsonRpcError::parse_error(format!("Parse error: {}", e)),
            ));
        }
    };

    let id = value
        .get("id")
        .and_then(|id| serde_json::from_value::<JsonRpcId>(id.clone()).ok());

    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handler.handle_request(request),
        Err(e) => {
            debug!(error = %e, "malformed JSON-RPC request");
            Some(JsonRpcResponse::error(
                id.unwrap_or(JsonRpcId::Null),
                JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
            ))
        }
    }
}
