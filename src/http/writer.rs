use anyhow::Context;
use bytes::BytesMut;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::mime::ContentType;
use crate::http::response::ResponseHead;
use crate::http::target::FileTarget;
use crate::http::template;

/// Copy buffer size for binary bodies and the not-found page.
const BUFFER_SIZE: usize = 16 * 1024;

/// What goes after the response head.
#[derive(Debug)]
pub enum Body {
    /// HTML page with placeholders substituted line by line.
    Templated(File),
    /// Image copied byte for byte.
    Binary(File),
    /// The configured not-found page.
    NotFound,
}

impl Body {
    /// Picks the body for a resolved target.
    ///
    /// An existing file of unknown type still gets the not-found page.
    pub fn select(target: FileTarget, content_type: ContentType) -> Self {
        match (target.into_file(), content_type) {
            (Some(file), ContentType::Html) => Body::Templated(file),
            (
                Some(file),
                ContentType::Jpeg | ContentType::Gif | ContentType::Png | ContentType::Icon,
            ) => Body::Binary(file),
            (Some(_), ContentType::Unknown) | (None, _) => Body::NotFound,
        }
    }
}

/// Writes one response to a stream and counts the bytes sent.
pub struct ResponseWriter<'a, W> {
    stream: &'a mut W,
    written: u64,
}

impl<'a, W> ResponseWriter<'a, W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(stream: &'a mut W) -> Self {
        Self { stream, written: 0 }
    }

    /// Total bytes written so far, head included.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub async fn write_head(&mut self, head: &ResponseHead) -> anyhow::Result<()> {
        self.write_all(&head.serialize()).await
    }

    /// Streams `body`. Must follow [`write_head`](Self::write_head).
    ///
    /// `date` fills the date placeholder of templated pages. A missing
    /// `not_found_page` is an error; nothing is written in that case.
    pub async fn write_body(
        &mut self,
        body: Body,
        date: &str,
        not_found_page: &Path,
    ) -> anyhow::Result<()> {
        match body {
            Body::Templated(file) => self.write_templated(file, date).await,
            Body::Binary(file) => self.copy_from(file).await,
            Body::NotFound => {
                let page = File::open(not_found_page).await.with_context(|| {
                    format!("not-found page {} is unavailable", not_found_page.display())
                })?;
                self.copy_from(page).await
            }
        }
    }

    pub async fn flush(&mut self) -> anyhow::Result<()> {
        self.stream
            .flush()
            .await
            .context("failed to flush response")
    }

    async fn write_templated(&mut self, file: File, date: &str) -> anyhow::Result<()> {
        let mut reader = BufReader::new(file);
        let mut line = Vec::with_capacity(256);

        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .await
                .context("failed to read page")?;
            if n == 0 {
                break;
            }

            let rendered = template::render_line(&line, date);
            self.write_all(&rendered).await?;
        }

        Ok(())
    }

    async fn copy_from<R>(&mut self, mut source: R) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);

        loop {
            buffer.clear();
            let n = source
                .read_buf(&mut buffer)
                .await
                .context("failed to read file")?;
            if n == 0 {
                break;
            }

            self.write_all(&buffer).await?;
        }

        Ok(())
    }

    async fn write_all(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.stream
            .write_all(bytes)
            .await
            .context("connection closed while writing")?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}
