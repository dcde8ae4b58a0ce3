use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::request::{Method, Request};

/// Longest request or header line accepted, line ending included.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

/// Parses a single request line such as `GET /index.html HTTP/1.1`.
///
/// The path is the text after the method and one separator, up to the next
/// space. A line without a trailing version yields the rest of the line.
/// Returns `None` for lines that do not start with a known method token.
pub fn parse_request_line(line: &str) -> Option<Request> {
    let (method_str, rest) = match line.split_once(' ') {
        Some(parts) => parts,
        None => (line, ""),
    };

    let method = Method::from_str(method_str)?;
    let path = rest.split(' ').next().unwrap_or_default();

    Some(Request::new(method, path))
}

/// Reads a request head from `reader` up to and including the blank line.
///
/// The first GET line decides the request; every other line is discarded.
/// End of stream stops reading and keeps what was captured so far. An I/O
/// error or a line longer than [`MAX_REQUEST_LINE`] discards everything and
/// returns `None`, as does a head without any GET line.
pub async fn read_request<R>(reader: &mut R) -> Option<Request>
where
    R: AsyncBufRead + Unpin,
{
    let mut request = None;
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();

        let mut limited = (&mut *reader).take(MAX_REQUEST_LINE as u64);

        match limited.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                tracing::debug!("Client closed connection before end of request head");
                break;
            }
            Ok(n) if n == MAX_REQUEST_LINE && !buf.ends_with(b"\n") => {
                tracing::warn!(limit = MAX_REQUEST_LINE, "Request line too long");
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read request");
                return None;
            }
        }

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        tracing::trace!("Request line: ({})", line);

        if line.is_empty() {
            break;
        }

        if request.is_some() {
            continue;
        }

        match parse_request_line(&line) {
            Some(req) if req.method == Method::GET => request = Some(req),
            Some(req) => {
                tracing::debug!(method = ?req.method, path = %req.path, "Ignoring non-GET request line");
            }
            None => {}
        }
    }

    request
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
