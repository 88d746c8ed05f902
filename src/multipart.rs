//! multipart/form-data bodies for request tests.
//!
//! Builds the raw body and the matching `Content-Type` header value, so a
//! test can post a form to a handler without a client library.
//!
//! # Examples
//!
//! ```
//! use assay::Multipart;
//!
//! let form = Multipart::new()
//!     .field("name", "Alice")
//!     .file("avatar", "a.png", "image/png", vec![0x89u8, 0x50])
//!     .finish()
//!     .unwrap();
//!
//! assert!(form.content_type.starts_with("multipart/form-data; boundary="));
//! assert!(form.body.ends_with(b"--\r\n"));
//! ```

use crate::error::MultipartError;

pub const DEFAULT_BOUNDARY: &str = "assay-form-boundary-7d4b1e9c2f";

const MAX_BOUNDARY_LEN: usize = 70;

/// A finished form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub body: Vec<u8>,
    /// Value for the `Content-Type` request header
    pub content_type: String,
}

#[derive(Debug, Clone)]
struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    content: Vec<u8>,
}

/// Builder for a multipart/form-data body.
///
/// Parts are written in the order they were added.
#[derive(Debug, Clone)]
pub struct Multipart {
    boundary: String,
    parts: Vec<Part>,
}

impl Multipart {
    /// Creates an empty form using [`DEFAULT_BOUNDARY`].
    pub fn new() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY.to_string(),
            parts: Vec::new(),
        }
    }

    /// Creates an empty form with a custom boundary.
    ///
    /// The boundary must be 1 to 70 characters from the RFC 2046 set and
    /// must not end with a space.
    pub fn with_boundary(boundary: impl Into<String>) -> Result<Self, MultipartError> {
        let boundary = boundary.into();
        if !is_valid_boundary(&boundary) {
            return Err(MultipartError::InvalidBoundary { boundary });
        }
        Ok(Self {
            boundary,
            parts: Vec::new(),
        })
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Adds a plain form field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            filename: None,
            content_type: None,
            content: value.into().into_bytes(),
        });
        self
    }

    /// Adds a file upload.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            content: content.into(),
        });
        self
    }

    /// Writes the body.
    ///
    /// # Errors
    ///
    /// `MultipartError::BoundaryInContent` if any part contains the
    /// delimiter line, which would split it on the receiving side.
    pub fn finish(self) -> Result<MultipartBody, MultipartError> {
        let delimiter = format!("--{}", self.boundary);
        let mut body = Vec::new();

        for part in &self.parts {
            if contains(&part.content, delimiter.as_bytes()) {
                return Err(MultipartError::BoundaryInContent {
                    name: part.name.clone(),
                });
            }

            body.extend_from_slice(delimiter.as_bytes());
            body.extend_from_slice(b"\r\n");

            let mut disposition = format!("form-data; name=\"{}\"", escape_quotes(&part.name));
            if let Some(filename) = &part.filename {
                disposition.push_str(&format!("; filename=\"{}\"", escape_quotes(filename)));
            }
            body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
            if let Some(content_type) = &part.content_type {
                body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&part.content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("{delimiter}--\r\n").as_bytes());

        let content_type = if self.boundary.chars().all(is_token_char) {
            format!("multipart/form-data; boundary={}", self.boundary)
        } else {
            format!("multipart/form-data; boundary=\"{}\"", self.boundary)
        };

        tracing::debug!(
            parts = self.parts.len(),
            bytes = body.len(),
            "built multipart body"
        );
        Ok(MultipartBody { body, content_type })
    }
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a form of plain fields in iteration order.
///
/// ```
/// use assay::multipart;
///
/// let form = multipart([("q", "rust"), ("page", "2")]).unwrap();
/// let body = String::from_utf8(form.body).unwrap();
/// assert!(body.contains("name=\"q\"\r\n\r\nrust\r\n"));
/// ```
pub fn multipart<I, K, V>(fields: I) -> Result<MultipartBody, MultipartError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .fold(Multipart::new(), |form, (name, value)| form.field(name, value))
        .finish()
}

fn is_valid_boundary(boundary: &str) -> bool {
    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN || boundary.ends_with(' ') {
        return false;
    }
    boundary
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "'()+_,-./:=? ".contains(c))
}

/// Characters allowed in an unquoted header parameter value.
fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
