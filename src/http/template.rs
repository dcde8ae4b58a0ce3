//! Placeholder substitution for served HTML pages.
//!
//! Pages are rewritten one line at a time. Matching is literal; no other
//! markup is interpreted.

use std::borrow::Cow;

use crate::http::response::SERVER_NAME;

/// Replaced with the formatted response date.
pub const DATE_TAG: &str = "<cs371date>";

/// Replaced with [`SERVER_NAME`].
pub const SERVER_TAG: &str = "<cs371server>";

/// Substitutes both placeholders in `line`.
///
/// Lines without a placeholder are returned borrowed and untouched, line
/// ending included. The line does not need to be valid UTF-8.
///
/// ```
/// # use webworker::http::template::render_line;
/// let out = render_line(b"<p>Today is <cs371date></p>\n", "Monday");
/// assert_eq!(&*out, b"<p>Today is Monday</p>\n");
/// ```
pub fn render_line<'a>(line: &'a [u8], date: &str) -> Cow<'a, [u8]> {
    let line = replace_all(line, DATE_TAG.as_bytes(), date.as_bytes());

    let replaced = match replace_all(&line, SERVER_TAG.as_bytes(), SERVER_NAME.as_bytes()) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    };

    match replaced {
        Some(replaced) => Cow::Owned(replaced),
        None => line,
    }
}

fn replace_all<'a>(haystack: &'a [u8], needle: &[u8], replacement: &[u8]) -> Cow<'a, [u8]> {
    let Some(first) = find(haystack, needle) else {
        return Cow::Borrowed(haystack);
    };

    let mut out = Vec::with_capacity(haystack.len() + replacement.len());
    out.extend_from_slice(&haystack[..first]);
    out.extend_from_slice(replacement);

    let mut rest = &haystack[first + needle.len()..];
    while let Some(pos) = find(rest, needle) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(replacement);
        rest = &rest[pos + needle.len()..];
    }
    out.extend_from_slice(rest);

    Cow::Owned(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}
