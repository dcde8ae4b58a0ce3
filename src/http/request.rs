/// HTTP request methods.
///
/// Only GET selects a file. Other methods are recognised so they can be
/// logged, but a request using them is answered as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

/// The part of a client request this server acts on.
///
/// Everything after the request line (headers, body) is read and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method of the request line
    pub method: Method,
    /// The path token as sent by the client (e.g., "/index.html")
    pub path: String,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use webworker::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// The path relative to the document root: the request path with a
    /// single leading `/` removed.
    ///
    /// ```
    /// # use webworker::http::request::{Method, Request};
    /// let req = Request::new(Method::GET, "/img/logo.png");
    /// assert_eq!(req.requested_path(), "img/logo.png");
    /// ```
    pub fn requested_path(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }
}
