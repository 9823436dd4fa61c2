use crate::config::ServerConfig;
use crate::engine::HealthVerifyEngine;
use crate::verification::VerificationResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::UnixListener;

const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// One request per line
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ServiceRequest {
    Verify {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        has_file: bool,
    },
    Chat {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ServiceResponse {
    Verification(VerificationResult),
    Chat { response: String },
    Error { error: String },
}

/// Newline-delimited JSON front end for the engine
pub struct Server {
    engine: Arc<HealthVerifyEngine>,
    max_line_bytes: usize,
}

impl Server {
    pub fn new(engine: HealthVerifyEngine, config: &ServerConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            max_line_bytes: config.max_line_bytes.unwrap_or(DEFAULT_MAX_LINE_BYTES),
        }
    }

    pub async fn run(&self, socket_path: &str) -> anyhow::Result<()> {
        log::info!("Starting verification service on: {}", socket_path);
        // Remove existing socket if it exists
        if std::path::Path::new(socket_path).exists() {
            std::fs::remove_file(socket_path)?;
        }

        let listener = UnixListener::bind(socket_path)?;
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, _addr) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            log::error!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };
                    let engine = self.engine.clone();
                    let max_line_bytes = self.max_line_bytes;
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, &engine, max_line_bytes).await {
                            log::warn!("Connection closed with error: {}", e);
                        }
                    });
                }
                _ = &mut shutdown => {
                    log::info!("Received shutdown signal, stopping service");
                    break;
                }
            }
        }

        if let Err(e) = std::fs::remove_file(socket_path) {
            log::warn!("Failed to remove socket {}: {}", socket_path, e);
        }
        Ok(())
    }
}

/// Answer requests on one connection until the peer hangs up.
///
/// At most `max_line_bytes + 1` bytes of a line are buffered; the rest of an
/// oversized line is skipped before the error reply is sent.
pub async fn serve_connection<S>(
    stream: S,
    engine: &HealthVerifyEngine,
    max_line_bytes: usize,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(max_line_bytes as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            break;
        }

        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let response = if buf.len() > max_line_bytes {
            if !terminated {
                discard_line(&mut reader).await?;
            }
            log::warn!("Rejecting request over {} bytes", max_line_bytes);
            ServiceResponse::Error {
                error: format!("request exceeds {} bytes", max_line_bytes),
            }
        } else {
            match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => handle_line(engine, line),
                Err(e) => {
                    log::debug!("Request is not UTF-8: {}", e);
                    ServiceResponse::Error {
                        error: format!("request is not valid UTF-8: {}", e),
                    }
                }
            }
        };

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Skip input up to and including the next newline (or EOF)
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

pub fn handle_line(engine: &HealthVerifyEngine, line: &str) -> ServiceResponse {
    match serde_json::from_str::<ServiceRequest>(line) {
        Ok(request) => handle_request(engine, request),
        Err(e) => {
            log::debug!("Malformed request: {}", e);
            ServiceResponse::Error {
                error: format!("invalid request: {}", e),
            }
        }
    }
}

pub fn handle_request(engine: &HealthVerifyEngine, request: ServiceRequest) -> ServiceResponse {
    match request {
        ServiceRequest::Verify { text, has_file } => {
            let result = engine.classify_content(text.as_deref(), has_file);
            log::info!(
                "verify: verdict {:?}, confidence {:.2}",
                result.is_reliable,
                result.confidence
            );
            ServiceResponse::Verification(result)
        }
        ServiceRequest::Chat { message } => {
            let reply = engine.reply(&message);
            log::info!("chat: intent {}", reply.intent);
            ServiceResponse::Chat {
                response: reply.response,
            }
        }
    }
}
