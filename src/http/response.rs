use chrono::{DateTime, Local};

use crate::http::mime::ContentType;

/// Value of the `Server` header and of the `<cs371server>` placeholder.
pub const SERVER_NAME: &str = concat!("webworker/", env!("CARGO_PKG_VERSION"));

const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes this server answers with.
///
/// - `Ok` (200): The requested path is an existing regular file
/// - `NotFound` (404): Anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webworker::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Status line and headers of a response.
///
/// The body is streamed separately by the writer, so the head carries no
/// `Content-Length`; `Connection: close` tells the client where it ends.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub content_type: ContentType,
    /// Pre-formatted `Date` header value.
    pub date: String,
}

impl ResponseHead {
    pub fn new(status: StatusCode, content_type: ContentType, date: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            date: date.into(),
        }
    }

    /// Serializes the head, including the terminating blank line.
    pub fn serialize(&self) -> Vec<u8> {
        format!(
            "{} {} {}\r\n\
             Date: {}\r\n\
             Server: {}\r\n\
             Connection: close\r\n\
             Content-Type: {}\r\n\
             \r\n",
            HTTP_VERSION,
            self.status.as_u16(),
            self.status.reason_phrase(),
            self.date,
            SERVER_NAME,
            self.content_type.mime_type(),
        )
        .into_bytes()
    }
}

/// Formats a timestamp the way it appears in the `Date` header and in
/// templated pages, e.g. `Saturday, October 17, 2026 3:04:05 PM`.
pub fn format_date(time: &DateTime<Local>) -> String {
    time.format("%A, %B %-d, %Y %-I:%M:%S %p").to_string()
}
