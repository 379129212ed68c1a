// MCP over stdio: newline-delimited JSON-RPC

use crate::protocol::{JsonRpcError, JsonRpcResponse};
use crate::server::McpServer;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};

/// Longest request line accepted, in bytes.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// One line of client input.
#[derive(Debug)]
enum Frame {
    Line(String),
    /// Not valid UTF-8, or longer than [`MAX_LINE_LENGTH`].
    Rejected(LinesCodecError),
}

/// `LinesCodec` that reports unusable lines as frames instead of errors,
/// so the stream keeps going.
///
/// Decoding never touches the reader: any error it returns concerns the
/// line just consumed (bad UTF-8 surfaces as `Io(InvalidData)`). Read
/// failures reach the stream through `FramedRead` and still end it.
struct RequestLines(LinesCodec);

impl RequestLines {
    fn new() -> Self {
        Self(LinesCodec::new_with_max_length(MAX_LINE_LENGTH))
    }

    fn frame(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Frame>, LinesCodecError> {
        Ok(match result {
            Ok(line) => line.map(Frame::Line),
            Err(e) => Some(Frame::Rejected(e)),
        })
    }
}

impl Decoder for RequestLines {
    type Item = Frame;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::frame(self.0.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::frame(self.0.decode_eof(buf))
    }
}

/// Serve MCP on the process's stdin/stdout until stdin closes.
pub async fn serve(server: Arc<McpServer>) -> Result<()> {
    tracing::info!("MCP server reading JSON-RPC from stdin");
    serve_with(server, tokio::io::stdin(), tokio::io::stdout()).await?;
    tracing::info!("stdin closed, MCP server stopping");
    Ok(())
}

/// Serve MCP over any line-oriented reader/writer pair.
///
/// Each request runs as its own task, so a slow downstream call does not
/// hold up the others. Responses are written in completion order. Returns
/// the writer once every in-flight request has been answered.
pub async fn serve_with<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> Result<W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut lines = FramedRead::new(reader, RequestLines::new());
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer_task = tokio::spawn(async move {
        let mut sink = FramedWrite::new(writer, LinesCodec::new());
        while let Some(line) = rx.recv().await {
            sink.send(line).await?;
        }
        Ok::<_, LinesCodecError>(sink.into_inner())
    });

    while let Some(frame) = lines.next().await {
        let line = match frame.context("Failed to read from stdin")? {
            Frame::Line(line) => line,
            Frame::Rejected(e) => {
                tracing::warn!(error = %e, "Unreadable input line");
                let response = JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error());
                send(&tx, &response);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = server.handle_message(&line).await {
                send(&tx, &response);
            }
        });
    }

    drop(tx);
    let writer = writer_task
        .await
        .context("Writer task panicked")?
        .context("Failed to write to stdout")?;
    Ok(writer)
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(json) => {
            if tx.send(json).is_err() {
                tracing::warn!("Output closed before response could be written");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to encode response"),
    }
}
