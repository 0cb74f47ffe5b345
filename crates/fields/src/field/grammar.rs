//! RFC 2616 lexical layer: grammar patterns and low-level scanners.
//!
//! Every field kind declares an item grammar here as a regular expression
//! built from the RFC's BNF rules (token, quoted-string, parameter, and so
//! on). The line grammar of a multi-value kind is the item grammar repeated
//! with comma separators; empty, leading, and trailing items are tolerated.
//! Line grammars are used for validation only; the actual value parsing in
//! [`codec`](super::codec) is done with the scanners below, which know that a
//! comma (or semicolon) inside a quoted string is not a delimiter.

use std::collections::HashMap;
use std::time::{Duration, UNIX_EPOCH};

use once_cell::sync::Lazy;
use regex::Regex;

use super::data::{FieldKind, UriParts};
use crate::error::FieldError;

// BNF rules, kept close to the RFC 2616 spelling.
const TOKEN: &str = r#"(?:[^()<>@,;:\\"/\[\]?={} \t]+?)"#;
const QUOTED_STRING: &str = r#"(?:"(?:\\"|[^"])*")"#;
const COMMENT: &str = r"(?:\((?:[^()]|\\\(|\\\))*\))"; // does not handle nesting
const COMMA: &str = r"(?:\s*(?:,\s*)+)";
const HTTP_DATE: &str = r"(?:\w{3}, \d{2} \w{3} \d{4} \d{2}:\d{2}:\d{2} GMT|\w{6,9}, \d{2}-\w{3}-\d{2} \d{2}:\d{2}:\d{2} GMT|\w{3} \w{3} [\d ]\d \d{2}:\d{2}:\d{2} \d{4})";

static PARAMETER: Lazy<String> = Lazy::new(|| format!("(?:{TOKEN}(?:=(?:{TOKEN}|{QUOTED_STRING}))?)"));
static STRPARAM: Lazy<String> = Lazy::new(|| format!(r"(?:\S+(?:\s*;\s*{})*)", &*PARAMETER));
static PRODUCT: Lazy<String> = Lazy::new(|| format!("(?:{TOKEN}(?:/{TOKEN})?)"));
static ETAG: Lazy<String> = Lazy::new(|| format!(r"(?:(?:W/)?{QUOTED_STRING}|\*)"));
// warn-agent is a host[:port] or pseudonym, wider than a token
static WARNING: Lazy<String> = Lazy::new(|| format!(r#"(?:\d{{3}} \S+ {QUOTED_STRING}(?: "{HTTP_DATE}")?)"#));

const ALL_KINDS: [FieldKind; 23] = [
    FieldKind::Unknown,
    FieldKind::Token,
    FieldKind::HttpToken,
    FieldKind::HttpTokenList,
    FieldKind::Int,
    FieldKind::QuotedStr,
    FieldKind::FieldName,
    FieldKind::FieldNameList,
    FieldKind::HttpDate,
    FieldKind::Uri,
    FieldKind::EntityTag,
    FieldKind::EntityTagDict,
    FieldKind::ParamDict,
    FieldKind::StrParam,
    FieldKind::StrParamDict,
    FieldKind::ChallengeList,
    FieldKind::Credentials,
    FieldKind::ContentRange,
    FieldKind::ByteRangeList,
    FieldKind::EntityTagOrDate,
    FieldKind::ProductComment,
    FieldKind::WarningList,
    FieldKind::ViaList,
];

/// The grammar of one value item of the given kind.
fn item_pattern(kind: FieldKind) -> String {
    let parameter = &*PARAMETER;
    match kind {
        FieldKind::Unknown => ".+".to_owned(),
        FieldKind::Token | FieldKind::Uri => r"\S+".to_owned(),
        FieldKind::HttpToken | FieldKind::HttpTokenList | FieldKind::FieldName | FieldKind::FieldNameList => {
            TOKEN.to_owned()
        }
        FieldKind::Int => r"\d+".to_owned(),
        FieldKind::QuotedStr => QUOTED_STRING.to_owned(),
        FieldKind::HttpDate => HTTP_DATE.to_owned(),
        FieldKind::EntityTag | FieldKind::EntityTagDict => ETAG.clone(),
        FieldKind::ParamDict => parameter.clone(),
        FieldKind::StrParam | FieldKind::StrParamDict => STRPARAM.clone(),
        FieldKind::ChallengeList => format!(r"{TOKEN}\s+(?:{parameter}(?:{COMMA}{parameter})*)?"),
        FieldKind::Credentials => format!(r"{TOKEN}\s(?:{parameter}(?:{COMMA}{parameter})*)?"),
        FieldKind::ContentRange => r"(?:bytes (?:\d+-\d+|\*)/(?:\d+|\*))".to_owned(),
        FieldKind::ByteRangeList => r"(?:\d*-\d*)".to_owned(),
        FieldKind::EntityTagOrDate => format!("(?:{}|{HTTP_DATE})", &*ETAG),
        FieldKind::ProductComment => {
            let product = &*PRODUCT;
            format!(r"(?:{product}|{COMMENT})(?:\s+(?:{product}|{COMMENT}))*")
        }
        FieldKind::WarningList => WARNING.clone(),
        FieldKind::ViaList => format!(r"(?:{TOKEN}/)?{TOKEN}\s+[^,\s]+(?:\s+{COMMENT})?"),
    }
}

static LINE_GRAMMARS: Lazy<HashMap<FieldKind, Regex>> = Lazy::new(|| {
    ALL_KINDS
        .into_iter()
        .map(|kind| {
            let item = item_pattern(kind);
            let line = if kind.is_single_value() {
                format!("^(?:{item})$")
            } else {
                format!(r"^(?:(?:^\s*|{COMMA})(?:{item}|\s*$))+$")
            };
            let regex = Regex::new(&line).expect("line grammar pattern compiles");
            (kind, regex)
        })
        .collect()
});

/// Whether `s` matches the whole-line grammar of `kind`.
pub(crate) fn line_matches(kind: FieldKind, s: &str) -> bool {
    LINE_GRAMMARS[&kind].is_match(s)
}

static WARNING_PARTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^(\d{{3}}) (\S+) ({QUOTED_STRING})(?: "({HTTP_DATE})")?$"#))
        .expect("warning capture pattern compiles")
});

/// Pick one warning-value apart into code, agent, quoted text, and the
/// optional quoted date. The text may contain spaces, so plain whitespace
/// splitting is not enough here.
pub(crate) fn warning_parts(s: &str) -> Option<(&str, &str, &str, Option<&str>)> {
    let caps = WARNING_PARTS.captures(s)?;
    let code = caps.get(1)?.as_str();
    let agent = caps.get(2)?.as_str();
    let text = caps.get(3)?.as_str();
    let date = caps.get(4).map(|m| m.as_str());
    Some((code, agent, text, date))
}

/// Quote a string as an RFC 2616 quoted-string, escaping `\` then `"`.
///
/// Without `force`, text containing none of `"`, `,`, `\`, `;` stays bare.
/// A bare `*` is never quoted; it is the wildcard in every grammar that
/// admits it.
pub(crate) fn quote(s: &str, force: bool) -> String {
    if !force && !s.contains(['"', ',', '\\', ';']) {
        return s.to_owned();
    }
    if s == "*" {
        return s.to_owned();
    }
    let escaped = s.replace('\\', r"\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Strip one layer of quoting and un-escape `\X` to `X`. Bare `*` and
/// unquoted text pass through untouched.
pub(crate) fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() || s == "*" {
        return s.to_owned();
    }
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        let inner = &s[1..s.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else {
                out.push(c);
            }
        }
        return out;
    }
    s.to_owned()
}

/// Split on `sep` occurrences that are outside quoted strings, trimming each
/// item and dropping empties.
pub(crate) fn split_items(s: &str, sep: char) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                items.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    items.push(&s[start..]);
    items.into_iter().map(str::trim).filter(|item| !item.is_empty()).collect()
}

/// Position of the first `sep` outside quoted strings, if any.
pub(crate) fn find_unquoted(s: &str, sep: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split a `Server`/`User-Agent`-style value into products and parenthesized
/// comments. Comments keep their parentheses and may contain whitespace.
pub(crate) fn split_products(s: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let end = if rest.starts_with('(') {
            rest.find(')').map_or(rest.len(), |i| i + 1)
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };
        items.push(rest[..end].to_owned());
        rest = rest[end..].trim_start();
    }
    items
}

/// Uppercase the first character, lowercase the rest.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Parse an HTTP-date in any of the RFC 1123, RFC 850, or asctime forms to
/// seconds since the epoch.
pub(crate) fn parse_date(s: &str) -> Result<u64, FieldError> {
    let time = httpdate::parse_http_date(s).map_err(|e| FieldError::unparseable("HttpDate", s, e))?;
    let elapsed = time.duration_since(UNIX_EPOCH).map_err(|e| FieldError::unparseable("HttpDate", s, e))?;
    Ok(elapsed.as_secs())
}

/// Format seconds since the epoch as an RFC 1123 HTTP-date.
pub(crate) fn format_date(seconds: u64) -> Result<String, FieldError> {
    let time = UNIX_EPOCH
        .checked_add(Duration::from_secs(seconds))
        .ok_or(FieldError::UnrepresentableDate { seconds })?;
    Ok(httpdate::fmt_http_date(time))
}

/// Split a URI into `(scheme, authority, path, query, fragment)`, urlsplit
/// style: empty strings for absent parts, no percent-decoding.
pub(crate) fn split_uri(s: &str) -> UriParts {
    let mut parts = UriParts::default();
    let mut rest = s;
    if let Some((head, fragment)) = rest.split_once('#') {
        parts.fragment = fragment.to_owned();
        rest = head;
    }
    if let Some(idx) = rest.find(':') {
        let candidate = &rest[..idx];
        let after = &rest[idx + 1..];
        let scheme_like = !candidate.is_empty()
            && candidate.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && candidate.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        // "host:80" is a port, not a scheme
        let port_like = !after.is_empty() && after.bytes().all(|b| b.is_ascii_digit());
        if scheme_like && !port_like {
            parts.scheme = candidate.to_ascii_lowercase();
            rest = after;
        }
    }
    if let Some(stripped) = rest.strip_prefix("//") {
        let end = stripped.find(['/', '?']).unwrap_or(stripped.len());
        parts.authority = stripped[..end].to_owned();
        rest = &stripped[end..];
    }
    match rest.split_once('?') {
        Some((path, query)) => {
            parts.path = path.to_owned();
            parts.query = query.to_owned();
        }
        None => parts.path = rest.to_owned(),
    }
    parts
}

/// Reassemble what [`split_uri`] took apart.
pub(crate) fn join_uri(parts: &UriParts) -> String {
    let mut out = String::new();
    if !parts.scheme.is_empty() {
        out.push_str(&parts.scheme);
        out.push(':');
    }
    if !parts.authority.is_empty() {
        out.push_str("//");
        out.push_str(&parts.authority);
    }
    out.push_str(&parts.path);
    if !parts.query.is_empty() {
        out.push('?');
        out.push_str(&parts.query);
    }
    if !parts.fragment.is_empty() {
        out.push('#');
        out.push_str(&parts.fragment);
    }
    out
}
