//! Status results: a response outcome carried as a value.
//!
//! Handler pipelines return `Result<Response, Status>`: the `Err` arm is a
//! [`Status`] describing the short-circuit outcome (a redirect, an error
//! page, a `100 Continue`), convertible into a full [`Response`] at the
//! boundary. This keeps control flow explicit instead of routing outcomes
//! through unwinding.

use bytes::Bytes;
use http::{StatusCode, Version};

use crate::headers::Headers;
use crate::message::Response;

/// A response outcome: status code, headers to attach, optional body.
#[derive(Debug, Clone)]
pub struct Status {
    pub code: StatusCode,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl Status {
    pub fn new(code: StatusCode) -> Self {
        Self { code, headers: Headers::new(), body: None }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Whether this status code allows a response body. Informational
    /// responses, `204 No Content` and `304 Not Modified` do not.
    pub fn has_body(&self) -> bool {
        !(self.code.is_informational()
            || self.code == StatusCode::NO_CONTENT
            || self.code == StatusCode::NOT_MODIFIED)
    }

    /// Build the response this status stands for. A body on a bodiless
    /// status code is dropped.
    pub fn into_response(self, version: Version) -> Response {
        let body = if self.has_body() { self.body } else { None };
        Response { version, status: self.code, reason: None, headers: self.headers, body }
    }
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        Self::new(code)
    }
}

impl From<Status> for Response {
    fn from(status: Status) -> Self {
        status.into_response(Version::HTTP_11)
    }
}
