//! Newline-delimited stdio transport

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::server::handler::McpServer;
use crate::server::protocol::{JsonRpcError, JsonRpcResponse};
use crate::utils::Result;

/// Serves requests from `reader` until EOF, writing one response per line.
///
/// A line that is not valid UTF-8 gets a parse error and the loop keeps going.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                debug!(bytes = line.len(), "Message received");
                server.handle_message(line.trim_end()).await
            }
            Err(e) => {
                warn!(error = %e, "Message is not valid UTF-8");
                let failure = JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e));
                Some(serde_json::to_string(&failure)?)
            }
        };

        if let Some(response) = response {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("Input closed, stopping server loop");
    Ok(())
}

/// Serves on the process's stdin and stdout.
pub async fn run_stdio(server: &McpServer) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(server, stdin, stdout).await
}
