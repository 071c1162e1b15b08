//! Immutable request description

use crate::args::Arguments;
use crate::error::Result;
use http::Method;
use serde::Serialize;

/// One logical API call: method, path relative to the base URL, optional
/// JSON payload, optional query arguments.
///
/// The payload is encoded when the request is built, so a `Request` can be
/// re-sent unchanged on every lock-retry attempt.
///
/// # Examples
///
/// ```rust
/// use rustack::http::Request;
/// use serde_json::json;
///
/// let request = Request::post("v1/project")
///     .json(&json!({"name": "demo", "client": "c1"}))
///     .unwrap();
///
/// assert_eq!(request.path(), "v1/project");
/// assert!(request.body().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    segments: Vec<String>,
    body: Option<Vec<u8>>,
    args: Arguments,
}

impl Request {
    /// Request with an arbitrary method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            body: None,
            args: Arguments::default(),
        }
    }

    /// GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Encode `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if the
    /// payload cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(payload)?);
        Ok(self)
    }

    /// Append one path segment. It is percent-encoded when the URL is
    /// built, so `/`, `?` and `#` stay inside the segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Set query arguments.
    pub fn args(mut self, args: Arguments) -> Self {
        self.args = args;
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extra path segments, unencoded.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Encoded JSON body.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Query arguments.
    pub fn arguments(&self) -> &Arguments {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_method() {
        assert_eq!(Request::get("v1/vm").method(), &Method::GET);
        assert_eq!(Request::post("v1/vm").method(), &Method::POST);
        assert_eq!(Request::put("v1/vm/1").method(), &Method::PUT);
        assert_eq!(Request::patch("v1/port/1/disconnect").method(), &Method::PATCH);
        assert_eq!(Request::delete("v1/vm/1").method(), &Method::DELETE);
    }

    #[test]
    fn test_json_encodes_body() {
        let request = Request::post("v1/disk/1/attach")
            .json(&serde_json::json!({"vm": "vm-1"}))
            .unwrap();
        assert_eq!(request.body(), Some(br#"{"vm":"vm-1"}"#.as_slice()));
    }

    #[test]
    fn test_segments_kept_in_order() {
        let request = Request::get("v1/job").segment("a/b").segment("c");
        assert_eq!(request.path(), "v1/job");
        assert_eq!(request.segments(), ["a/b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_args() {
        let request = Request::get("v1/template").args(Arguments::from([("vdc", "v1")]));
        assert_eq!(request.arguments().get("vdc"), Some("v1"));
        assert!(request.body().is_none());
    }
}
