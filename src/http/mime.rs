//! Content type classification.
//!
//! The type decides both the `Content-Type` header and which body the
//! writer produces, so it is a closed set rather than a free-form string.

/// Kind of content a requested path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Jpeg,
    Gif,
    Png,
    Icon,
    Html,
    /// No known suffix. Served with an empty `Content-Type`.
    Unknown,
}

/// Extensions in match order. The first one found in the file name wins.
const EXTENSIONS: &[(&str, ContentType)] = &[
    (".jpeg", ContentType::Jpeg),
    (".jpg", ContentType::Jpeg),
    (".gif", ContentType::Gif),
    (".png", ContentType::Png),
    (".ico", ContentType::Icon),
    (".html", ContentType::Html),
];

impl ContentType {
    /// Classifies `path` by the extensions in its last component, ignoring
    /// ASCII case. A name carrying several known extensions takes the one
    /// listed first: jpeg/jpg, gif, png, ico, html.
    ///
    /// # Examples
    /// ```
    /// use webworker::http::mime::ContentType;
    /// assert_eq!(ContentType::from_path("photos/Cat.JPG"), ContentType::Jpeg);
    /// assert_eq!(ContentType::from_path("index.html"), ContentType::Html);
    /// assert_eq!(ContentType::from_path("photo.jpg.html"), ContentType::Jpeg);
    /// assert_eq!(ContentType::from_path("notes.txt"), ContentType::Unknown);
    /// ```
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        let lower = name.to_ascii_lowercase();

        EXTENSIONS
            .iter()
            .find(|(ext, _)| lower.contains(*ext))
            .map(|&(_, kind)| kind)
            .unwrap_or(ContentType::Unknown)
    }

    /// The value of the `Content-Type` header.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentType::Jpeg => "image/jpeg",
            ContentType::Gif => "image/gif",
            ContentType::Png => "image/png",
            ContentType::Icon => "image/x-icon",
            ContentType::Html => "text/html",
            ContentType::Unknown => "",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self,
            ContentType::Jpeg | ContentType::Gif | ContentType::Png | ContentType::Icon
        )
    }
}
