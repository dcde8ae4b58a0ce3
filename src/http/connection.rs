use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;

use crate::config::StaticFilesConfig;
use crate::http::mime::ContentType;
use crate::http::parser;
use crate::http::request::Request;
use crate::http::response::{ResponseHead, StatusCode, format_date};
use crate::http::target::FileTarget;
use crate::http::writer::{Body, ResponseWriter};

/// Handles exactly one request on an accepted stream.
///
/// The connection owns the stream; it is shut down after a complete
/// response and released on drop on every other path.
pub struct Connection<S> {
    stream: BufReader<S>,
    files: Arc<StaticFilesConfig>,
    read_timeout: Option<Duration>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Resolving(Option<Request>),
    Writing(Option<Request>, FileTarget),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, files: Arc<StaticFilesConfig>) -> Self {
        Self {
            stream: BufReader::new(stream),
            files,
            read_timeout: None,
            state: ConnectionState::Reading,
        }
    }

    /// Gives up waiting for the request head after `limit`.
    pub fn with_read_timeout(mut self, limit: Option<Duration>) -> Self {
        self.read_timeout = limit;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request = self.read_request().await;
                    self.state = ConnectionState::Resolving(request);
                }

                ConnectionState::Resolving(request) => {
                    let requested = request.as_ref().map(Request::requested_path).unwrap_or("");
                    let target = FileTarget::resolve(&self.files.root, requested).await;
                    self.state = ConnectionState::Writing(request, target);
                }

                ConnectionState::Writing(request, target) => {
                    self.respond(request.as_ref(), target).await?;

                    // The response is complete; a peer that already left is not an error.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Failed to shut down connection");
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> Option<Request> {
        let read = parser::read_request(&mut self.stream);

        match self.read_timeout {
            Some(limit) => match timeout(limit, read).await {
                Ok(request) => request,
                Err(_) => {
                    tracing::warn!(timeout = ?limit, "Timed out waiting for request");
                    None
                }
            },
            None => read.await,
        }
    }

    async fn respond(&mut self, request: Option<&Request>, target: FileTarget) -> anyhow::Result<()> {
        let requested = request.map(Request::requested_path).unwrap_or("");
        let content_type = ContentType::from_path(requested);
        let date = format_date(&Local::now());

        let status = if target.is_regular() {
            StatusCode::Ok
        } else {
            tracing::debug!(path = requested, resolved = ?target.path(), "Serving not-found page");
            StatusCode::NotFound
        };

        let head = ResponseHead::new(status, content_type, date.as_str());
        let body = Body::select(target, content_type);

        let mut writer = ResponseWriter::new(&mut self.stream);
        writer.write_head(&head).await?;
        writer
            .write_body(body, &date, &self.files.not_found_page)
            .await?;
        writer.flush().await?;

        tracing::info!(
            path = requested,
            status = status.as_u16(),
            content_type = content_type.mime_type(),
            bytes = writer.written(),
            "Response sent"
        );

        Ok(())
    }
}
