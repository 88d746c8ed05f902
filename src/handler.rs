//! In-process HTTP handler calls.
//!
//! A handler here is any function from an [`http::Request`] to an
//! [`http::Response`]. [`call`] runs it directly, without a socket or a
//! server, and records what it returned so the test can inspect the status,
//! headers and body.
//!
//! # Examples
//!
//! ```
//! use assay::handler::{call, get};
//! use http::{Response, StatusCode};
//!
//! let hello = |req: http::Request<Vec<u8>>| {
//!     Response::new(format!("hello from {}", req.uri().path()))
//! };
//!
//! let recorded = call(hello, get("/greet").unwrap());
//! recorded.check_status(StatusCode::OK).unwrap();
//! assert_eq!(recorded.text().unwrap(), "hello from /greet");
//! ```

use crate::error::HttpError;
use crate::multipart::MultipartBody;
use http::header::{HeaderMap, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// What a handler returned.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Recorded {
    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<&str, HttpError> {
        Ok(std::str::from_utf8(&self.body)?)
    }

    /// Body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Fails with the response body attached when the status is not
    /// `expected`.
    pub fn check_status(&self, expected: StatusCode) -> Result<(), HttpError> {
        if self.status == expected {
            return Ok(());
        }
        Err(HttpError::status_mismatch(expected, self.status, &self.body))
    }
}

/// Runs `handler` on `request` and records the response.
pub fn call<H, B>(handler: H, request: Request<Vec<u8>>) -> Recorded
where
    H: FnOnce(Request<Vec<u8>>) -> Response<B>,
    B: Into<Vec<u8>>,
{
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (parts, body) = handler(request).into_parts();
    let recorded = Recorded {
        status: parts.status,
        headers: parts.headers,
        body: body.into(),
    };

    tracing::debug!(
        %method,
        %uri,
        status = recorded.status.as_u16(),
        bytes = recorded.body.len(),
        "handler returned"
    );
    recorded
}

/// Builds a request with an arbitrary method and body.
pub fn request(
    method: Method,
    uri: &str,
    body: impl Into<Vec<u8>>,
) -> Result<Request<Vec<u8>>, HttpError> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())?)
}

/// Builds a `GET` request with an empty body.
pub fn get(uri: &str) -> Result<Request<Vec<u8>>, HttpError> {
    request(Method::GET, uri, Vec::new())
}

/// Builds a `POST` request with a raw body.
pub fn post(uri: &str, body: impl Into<Vec<u8>>) -> Result<Request<Vec<u8>>, HttpError> {
    request(Method::POST, uri, body)
}

/// Builds a `POST` request with `value` encoded as JSON.
pub fn post_json<T: Serialize + ?Sized>(
    uri: &str,
    value: &T,
) -> Result<Request<Vec<u8>>, HttpError> {
    let body = serde_json::to_vec(value)?;
    Ok(Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)?)
}

/// Builds a `POST` request carrying a multipart form.
pub fn post_form(uri: &str, form: MultipartBody) -> Result<Request<Vec<u8>>, HttpError> {
    Ok(Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, form.content_type)
        .body(form.body)?)
}
