//! A typed HTTP/1.1 header field engine
//!
//! This crate models header fields as data structures instead of strings: a
//! registry maps field names to grammars, every field value keeps both its
//! wire form and its parsed form in sync lazily, and collections parse and
//! render whole RFC 2616 header blocks. How strict parsing is stays in the
//! caller's hands through a pluggable error strategy.
//!
//! # Features
//!
//! - Canonical field-name handling, case-insensitive with a sensible
//!   fallback for unregistered names
//! - A grammar per field: tokens, parameter lists, entity tags, dates,
//!   ranges, challenges, and more, each with a typed structured form
//! - Lazy dual representation: parse and render cost is paid only when a
//!   representation boundary is actually crossed
//! - Header collections with RFC 822 unfolding and correct merging of
//!   repeated lines
//! - Pluggable error handling: raise, ignore, log, or invalidate
//! - Request/response heads and value-typed status results built on the
//!   `http` crate
//!
//! # Example
//!
//! ```
//! use http_fields::{ErrorStrategy, FieldData, Headers};
//!
//! let mut headers = Headers::new().with_strategy(ErrorStrategy::Raise);
//! headers.parse_block(concat!(
//!     "Host: www.example.com\r\n",
//!     "content-length: 42\r\n",
//!     "Cache-Control: max-age=60, private\r\n",
//! ))?;
//!
//! assert_eq!(headers.field("Content-Length").data()?, &FieldData::Int(Some(42)));
//!
//! let mut cache = headers.field("cache-control");
//! let directives = cache.data()?.as_params().unwrap();
//! assert_eq!(directives["max-age"].as_deref(), Some("60"));
//!
//! assert!(headers.render()?.starts_with("Host: www.example.com\r\n"));
//! # Ok::<(), http_fields::HeaderError>(())
//! ```

mod error;
mod field;
mod headers;
mod message;
mod registry;
mod standard;
mod status;
mod strategy;

pub use error::{FieldError, HeaderError, MessageError};
pub use field::{
    ByteRange, Challenge, ContentRange, EntityTag, FieldData, FieldKind, FieldValue, Params, TagOrDate, UriParts,
    Via, WarningValue,
};
pub use headers::Headers;
pub use message::{Request, Response};
pub use registry::{FieldSpec, Normalize, Registry};
pub use status::Status;
pub use strategy::ErrorStrategy;
