//! The standard header table: RFC 2616 fields plus the common extensions
//! (WebDAV, Delta encoding, hit metering, P3P, Keep-Alive, SOAPAction).
//!
//! Each entry binds a canonical spelling to a [`FieldKind`] and, where the
//! RFC calls for it, case normalization of tokens, force-quoted parameter
//! names, or `q`-last parameter ordering.

use crate::field::FieldKind;
use crate::registry::{FieldSpec, Normalize};

/// Specs for every standard field. [`Registry::standard`] compiles these
/// once into the shared table.
///
/// [`Registry::standard`]: crate::registry::Registry::standard
pub(crate) fn specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("A-IM", FieldKind::StrParamDict).normalize(Normalize::Lower),
        FieldSpec::new("Accept", FieldKind::StrParamDict).normalize(Normalize::Lower).sort_q_last(),
        FieldSpec::new("Accept-Charset", FieldKind::StrParamDict).sort_q_last(),
        FieldSpec::new("Accept-Encoding", FieldKind::StrParamDict),
        FieldSpec::new("Accept-Language", FieldKind::StrParamDict),
        FieldSpec::new("Accept-Ranges", FieldKind::HttpTokenList),
        FieldSpec::new("Age", FieldKind::Int),
        FieldSpec::new("Allow", FieldKind::HttpTokenList).normalize(Normalize::Upper),
        FieldSpec::new("Authentication-Info", FieldKind::ParamDict),
        FieldSpec::new("Authorization", FieldKind::Credentials),
        FieldSpec::new("Cache-Control", FieldKind::ParamDict),
        FieldSpec::new("Connection", FieldKind::HttpTokenList),
        FieldSpec::new("Content-Base", FieldKind::Uri),
        FieldSpec::new("Content-Disposition", FieldKind::StrParam),
        FieldSpec::new("Content-Encoding", FieldKind::HttpTokenList),
        FieldSpec::new("Content-Language", FieldKind::HttpTokenList),
        FieldSpec::new("Content-Length", FieldKind::Int),
        FieldSpec::new("Content-Location", FieldKind::Uri),
        FieldSpec::new("Content-MD5", FieldKind::Token),
        FieldSpec::new("Content-Range", FieldKind::ContentRange),
        FieldSpec::new("Content-Type", FieldKind::StrParam),
        FieldSpec::new("Content-Version", FieldKind::QuotedStr),
        FieldSpec::new("DAV", FieldKind::HttpTokenList).normalize(Normalize::Lower),
        FieldSpec::new("Date", FieldKind::HttpDate),
        FieldSpec::new("Delta-Base", FieldKind::EntityTag),
        FieldSpec::new("Depth", FieldKind::HttpToken),
        FieldSpec::new("Destination", FieldKind::Uri),
        FieldSpec::new("ETag", FieldKind::EntityTag),
        FieldSpec::new("Expect", FieldKind::HttpToken),
        FieldSpec::new("Expires", FieldKind::HttpDate),
        FieldSpec::new("From", FieldKind::Token),
        FieldSpec::new("Host", FieldKind::Token),
        FieldSpec::new("IM", FieldKind::HttpTokenList).normalize(Normalize::Lower),
        FieldSpec::new("If-Match", FieldKind::EntityTagDict),
        FieldSpec::new("If-Modified-Since", FieldKind::HttpDate),
        FieldSpec::new("If-None-Match", FieldKind::EntityTagDict),
        FieldSpec::new("If-Range", FieldKind::EntityTagOrDate),
        FieldSpec::new("If-Unmodified-Since", FieldKind::HttpDate),
        FieldSpec::new("Keep-Alive", FieldKind::ParamDict),
        FieldSpec::new("Last-Modified", FieldKind::HttpDate),
        FieldSpec::new("Location", FieldKind::Uri),
        FieldSpec::new("MIME-Version", FieldKind::Token),
        FieldSpec::new("Max-Forwards", FieldKind::Int),
        FieldSpec::new("Meter", FieldKind::ParamDict),
        FieldSpec::new("Overwrite", FieldKind::HttpToken).normalize(Normalize::Upper),
        FieldSpec::new("P3P", FieldKind::ParamDict).force_quote(&["policyref", "compact-policy"]),
        FieldSpec::new("Pragma", FieldKind::ParamDict),
        FieldSpec::new("Proxy-Authenticate", FieldKind::ChallengeList),
        FieldSpec::new("Proxy-Authentication-Info", FieldKind::ParamDict),
        FieldSpec::new("Proxy-Authorization", FieldKind::Credentials),
        FieldSpec::new("Public", FieldKind::HttpTokenList).normalize(Normalize::Upper),
        FieldSpec::new("Range", FieldKind::ByteRangeList),
        FieldSpec::new("Referer", FieldKind::Uri),
        FieldSpec::new("Retry-After", FieldKind::Int),
        FieldSpec::new("SOAPAction", FieldKind::Uri),
        FieldSpec::new("Server", FieldKind::ProductComment),
        FieldSpec::new("TE", FieldKind::StrParamDict),
        FieldSpec::new("Timeout", FieldKind::HttpToken).normalize(Normalize::Capitalize),
        FieldSpec::new("Trailer", FieldKind::FieldNameList),
        FieldSpec::new("Transfer-Encoding", FieldKind::HttpTokenList),
        FieldSpec::new("Upgrade", FieldKind::ProductComment),
        FieldSpec::new("User-Agent", FieldKind::ProductComment),
        FieldSpec::new("Vary", FieldKind::FieldNameList),
        FieldSpec::new("Via", FieldKind::ViaList),
        FieldSpec::new("Warning", FieldKind::WarningList),
        FieldSpec::new("WWW-Authenticate", FieldKind::ChallengeList),
    ]
}
