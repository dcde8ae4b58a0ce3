#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use webworker::config::StaticFilesConfig;
use webworker::http::connection::Connection;

pub const NOT_FOUND_BODY: &[u8] = b"<html><body>404 page</body></html>\n";

/// A document root with a not-found page living outside of it.
pub struct Site {
    pub dir: TempDir,
    pub files: Arc<StaticFilesConfig>,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        let not_found_page = dir.path().join("404page.html");
        std::fs::write(&not_found_page, NOT_FOUND_BODY).unwrap();

        let files = Arc::new(StaticFilesConfig {
            root,
            not_found_page,
        });
        Self { dir, files }
    }

    pub fn root(&self) -> &Path {
        &self.files.root
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }
}

/// A parsed response as seen by the client.
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn parse(raw: &[u8]) -> Self {
        let end = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response head is not terminated");
        let head = std::str::from_utf8(&raw[..end]).unwrap();
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap().to_string();
        let headers = lines
            .map(|line| {
                let (k, v) = line.split_once(':').unwrap();
                (k.to_string(), v.trim_start().to_string())
            })
            .collect();

        Self {
            status_line,
            headers,
            body: raw[end + 4..].to_vec(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Runs one connection over an in-memory stream and returns the raw bytes
/// the client received together with the connection's result.
pub async fn exchange(files: Arc<StaticFilesConfig>, request: &[u8]) -> (Vec<u8>, anyhow::Result<()>) {
    let (mut client, server) = tokio::io::duplex(8 * 1024);

    let worker = tokio::spawn(async move {
        let mut conn = Connection::new(server, files);
        conn.run().await
    });

    client.write_all(request).await.unwrap();
    if request.is_empty() {
        client.shutdown().await.unwrap();
    }

    let mut raw = Vec::new();
    client.read_to_end(&mut raw).await.unwrap();

    (raw, worker.await.unwrap())
}

/// Like [`exchange`] but asserts the connection finished cleanly.
pub async fn get(files: Arc<StaticFilesConfig>, path: &str) -> RawResponse {
    let request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\n", path);
    let (raw, result) = exchange(files, request.as_bytes()).await;
    result.unwrap();
    RawResponse::parse(&raw)
}

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}
