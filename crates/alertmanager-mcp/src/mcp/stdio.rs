//! Newline-delimited JSON-RPC over a byte stream (normally stdin/stdout).

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::protocol::PARSE_ERROR;
use super::{McpServer, Response};

/// Serves requests until the reader reaches EOF, one response line per request.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> std::io::Result<()>
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
            // Skip empty lines
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => server.handle_message(line.trim_end()).await,
            Err(e) => {
                tracing::warn!("dropping non UTF-8 line: {}", e);
                Some(Response::error(
                    serde_json::Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: invalid UTF-8: {}", e),
                ))
            }
        };
        let Some(response) = response else {
            continue;
        };

        let json = serde_json::to_string(&response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
