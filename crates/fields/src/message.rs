//! HTTP message heads: a start line plus a header collection.
//!
//! [`Request`] and [`Response`] wrap a [`Headers`] collection with the
//! corresponding start line, parsed from and rendered to the RFC 2616 wire
//! form. The transport owns framing; these types take a complete head (start
//! line through the blank line) and an optional already-delimited body.

use bytes::{BufMut, Bytes, BytesMut};
use http::{Method, StatusCode, Version};

use crate::error::MessageError;
use crate::headers::Headers;

const CRLF: &str = "\r\n";

pub(crate) fn parse_version(s: &str) -> Result<Version, MessageError> {
    match s {
        "HTTP/0.9" => Ok(Version::HTTP_09),
        "HTTP/1.0" => Ok(Version::HTTP_10),
        "HTTP/1.1" => Ok(Version::HTTP_11),
        other => Err(MessageError::unsupported_version(other)),
    }
}

pub(crate) fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "HTTP/0.9"
    } else if version == Version::HTTP_10 {
        "HTTP/1.0"
    } else {
        "HTTP/1.1"
    }
}

/// Split a message head into its start line and the header block.
fn split_head(head: &str) -> (&str, &str) {
    match head.split_once('\n') {
        Some((line, rest)) => (line.trim_end_matches('\r'), rest),
        None => (head, ""),
    }
}

/// An HTTP request head, with an optional body.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub target: String,
    pub version: Version,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self { method, target: target.into(), version: Version::HTTP_11, headers: Headers::new(), body: None }
    }

    /// Parse a complete request head: request line, then header lines. The
    /// headers go into `headers`, which also decides the error strategy.
    pub fn parse(head: &str, mut headers: Headers) -> Result<Self, MessageError> {
        let (request_line, header_block) = split_head(head);
        let mut parts = request_line.split_whitespace();
        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MessageError::malformed_start_line(request_line));
        };
        if parts.next().is_some() {
            return Err(MessageError::malformed_start_line(request_line));
        }
        let Ok(method) = Method::from_bytes(method.as_bytes()) else {
            return Err(MessageError::invalid_method(request_line));
        };
        let version = parse_version(version)?;
        headers.parse_block(header_block)?;
        Ok(Self { method, target: target.to_owned(), version, headers, body: None })
    }

    pub fn has_content(&self) -> bool {
        self.body.as_ref().is_some_and(|body| !body.is_empty())
    }

    /// The head as wire text: request line, header block, blank line.
    pub fn render_head(&mut self) -> Result<String, MessageError> {
        let mut out = format!("{} {} {}{CRLF}", self.method, self.target, version_str(self.version));
        out.push_str(&self.headers.render()?);
        out.push_str(CRLF);
        Ok(out)
    }

    /// The whole message, head plus body.
    pub fn encode(&mut self) -> Result<Bytes, MessageError> {
        let head = self.render_head()?;
        let mut buf = BytesMut::with_capacity(head.len() + self.body.as_ref().map_or(0, Bytes::len));
        buf.put_slice(head.as_bytes());
        if let Some(body) = &self.body {
            buf.put_slice(body);
        }
        Ok(buf.freeze())
    }
}

/// An HTTP response head, with an optional body.
#[derive(Debug, Clone)]
pub struct Response {
    pub version: Version,
    pub status: StatusCode,
    /// Reason phrase as received; rendered from the status code when absent.
    pub reason: Option<String>,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self { version: Version::HTTP_11, status, reason: None, headers: Headers::new(), body: None }
    }

    /// Parse a complete response head: status line, then header lines.
    pub fn parse(head: &str, mut headers: Headers) -> Result<Self, MessageError> {
        let (status_line, header_block) = split_head(head);
        let mut parts = status_line.splitn(3, char::is_whitespace);
        let (Some(version), Some(code)) = (parts.next(), parts.next()) else {
            return Err(MessageError::malformed_start_line(status_line));
        };
        let version = parse_version(version)?;
        let status = code
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .ok_or_else(|| MessageError::invalid_status(status_line))?;
        let reason = parts.next().map(str::trim).filter(|r| !r.is_empty()).map(str::to_owned);
        headers.parse_block(header_block)?;
        Ok(Self { version, status, reason, headers, body: None })
    }

    pub fn reason_phrase(&self) -> &str {
        self.reason.as_deref().or_else(|| self.status.canonical_reason()).unwrap_or_default()
    }

    pub fn has_content(&self) -> bool {
        self.body.as_ref().is_some_and(|body| !body.is_empty())
    }

    /// The head as wire text: status line, header block, blank line.
    pub fn render_head(&mut self) -> Result<String, MessageError> {
        let mut out =
            format!("{} {} {}{CRLF}", version_str(self.version), self.status.as_u16(), self.reason_phrase());
        out.push_str(&self.headers.render()?);
        out.push_str(CRLF);
        Ok(out)
    }

    /// The whole message, head plus body.
    pub fn encode(&mut self) -> Result<Bytes, MessageError> {
        let head = self.render_head()?;
        let mut buf = BytesMut::with_capacity(head.len() + self.body.as_ref().map_or(0, Bytes::len));
        buf.put_slice(head.as_bytes());
        if let Some(body) = &self.body {
            buf.put_slice(body);
        }
        Ok(buf.freeze())
    }
}
