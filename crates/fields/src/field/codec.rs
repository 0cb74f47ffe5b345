//! Per-kind conversion between the wire string and [`FieldData`].
//!
//! [`parse`] and [`render`] are the only two entry points; both take the
//! field's spec for the kind and knobs, and the registry for the kinds that
//! re-canonicalize field names. `parse` expects trimmed, non-empty input and
//! always produces the shape declared by the kind; `render` rejects any
//! other shape with [`FieldError::WrongShape`].

use indexmap::IndexMap;

use super::data::{
    ByteRange, Challenge, ContentRange, EntityTag, FieldData, FieldKind, Params, TagOrDate, Via, WarningValue,
};
use super::grammar;
use crate::error::FieldError;
use crate::registry::{FieldSpec, Registry};

// Parameter names the authentication grammars always render quoted.
const CHALLENGE_FORCE_QUOTE: &[&str] = &["domain", "nonce", "opaque", "qop"];
const CREDENTIALS_FORCE_QUOTE: &[&str] = &["username", "uri", "response"];

pub(crate) fn parse(spec: &FieldSpec, registry: &Registry, s: &str) -> Result<FieldData, FieldError> {
    let kind = spec.kind;
    let data = match kind {
        FieldKind::Unknown => FieldData::List(vec![s.to_owned()]),
        FieldKind::Token => FieldData::Str(Some(s.to_owned())),
        FieldKind::HttpToken => FieldData::Str(Some(spec.normalize.apply(s))),
        FieldKind::HttpTokenList => {
            FieldData::List(grammar::split_items(s, ',').into_iter().map(|item| spec.normalize.apply(item)).collect())
        }
        FieldKind::Int => FieldData::Int(Some(parse_int(kind, s)?)),
        FieldKind::QuotedStr => FieldData::Str(Some(grammar::unquote(s))),
        FieldKind::FieldName => FieldData::Str(Some(registry.canonical_name(s))),
        FieldKind::FieldNameList => FieldData::List(
            grammar::split_items(s, ',').into_iter().map(|item| registry.canonical_name(item)).collect(),
        ),
        FieldKind::HttpDate => FieldData::Date(Some(grammar::parse_date(s)?)),
        FieldKind::Uri => FieldData::Uri(Some(grammar::split_uri(s))),
        FieldKind::EntityTag => FieldData::Tag(Some(parse_tag(s))),
        FieldKind::EntityTagDict => {
            let mut tags = IndexMap::new();
            for item in grammar::split_items(s, ',') {
                let tag = parse_tag(item);
                tags.insert(tag.tag, tag.weak);
            }
            FieldData::TagMap(tags)
        }
        FieldKind::ParamDict => FieldData::Params(parse_params(grammar::split_items(s, ','))),
        FieldKind::StrParam => {
            let (token, params) = parse_token_params(spec, s);
            FieldData::TokenParams(Some(token), params)
        }
        FieldKind::StrParamDict => {
            let mut entries = IndexMap::new();
            for item in grammar::split_items(s, ',') {
                let (token, params) = parse_token_params(spec, item);
                entries.insert(token, params);
            }
            FieldData::TokenParamsMap(entries)
        }
        FieldKind::ChallengeList => FieldData::Challenges(parse_challenges(s)),
        FieldKind::Credentials => FieldData::Credentials(Some(parse_credentials(s))),
        FieldKind::ContentRange => FieldData::Range(parse_content_range(kind, s)?),
        FieldKind::ByteRangeList => FieldData::Ranges(parse_byte_ranges(kind, s)?),
        FieldKind::EntityTagOrDate => FieldData::TagOrDate(Some(parse_tag_or_date(s)?)),
        FieldKind::ProductComment => FieldData::List(grammar::split_products(s)),
        FieldKind::WarningList => FieldData::Warnings(parse_warnings(kind, s)?),
        FieldKind::ViaList => FieldData::Vias(parse_vias(kind, s)?),
    };
    Ok(data)
}

pub(crate) fn render(spec: &FieldSpec, registry: &Registry, data: &FieldData) -> Result<String, FieldError> {
    let kind = spec.kind;
    let out = match (kind, data) {
        (FieldKind::Unknown, FieldData::List(items)) => items.join(", "),
        (FieldKind::Token, FieldData::Str(s)) => s.clone().unwrap_or_default(),
        (FieldKind::HttpToken, FieldData::Str(s)) => {
            s.as_deref().map(|s| spec.normalize.apply(s)).unwrap_or_default()
        }
        (FieldKind::HttpTokenList, FieldData::List(items)) => {
            items.iter().map(|item| spec.normalize.apply(item)).collect::<Vec<_>>().join(", ")
        }
        (FieldKind::Int, FieldData::Int(n)) => n.map(|n| n.to_string()).unwrap_or_default(),
        (FieldKind::QuotedStr, FieldData::Str(s)) => {
            s.as_deref().map(|s| grammar::quote(s, true)).unwrap_or_default()
        }
        (FieldKind::FieldName, FieldData::Str(s)) => {
            s.as_deref().map(|s| registry.canonical_name(s)).unwrap_or_default()
        }
        (FieldKind::FieldNameList, FieldData::List(items)) => {
            items.iter().map(|item| registry.canonical_name(item)).collect::<Vec<_>>().join(", ")
        }
        (FieldKind::HttpDate, FieldData::Date(seconds)) => match seconds {
            Some(seconds) => grammar::format_date(*seconds)?,
            None => String::new(),
        },
        (FieldKind::Uri, FieldData::Uri(parts)) => parts.as_ref().map(grammar::join_uri).unwrap_or_default(),
        (FieldKind::EntityTag, FieldData::Tag(tag)) => tag.as_ref().map(render_tag).unwrap_or_default(),
        (FieldKind::EntityTagDict, FieldData::TagMap(tags)) => tags
            .iter()
            .map(|(tag, weak)| render_tag(&EntityTag { tag: tag.clone(), weak: *weak }))
            .collect::<Vec<_>>()
            .join(", "),
        (FieldKind::ParamDict, FieldData::Params(params)) => {
            render_params(params, spec.force_quote, spec.sort_q_last, ", ")
        }
        (FieldKind::StrParam, FieldData::TokenParams(token, params)) => {
            render_token_params(spec, token.as_deref(), params)
        }
        (FieldKind::StrParamDict, FieldData::TokenParamsMap(entries)) => entries
            .iter()
            .map(|(token, params)| render_token_params(spec, Some(token), params))
            .collect::<Vec<_>>()
            .join(", "),
        (FieldKind::ChallengeList, FieldData::Challenges(challenges)) => challenges
            .iter()
            .map(|challenge| render_challenge(challenge, CHALLENGE_FORCE_QUOTE))
            .collect::<Vec<_>>()
            .join(", "),
        (FieldKind::Credentials, FieldData::Credentials(credentials)) => credentials
            .as_ref()
            .map(|challenge| render_challenge(challenge, CREDENTIALS_FORCE_QUOTE))
            .unwrap_or_default(),
        (FieldKind::ContentRange, FieldData::Range(range)) => render_content_range(range),
        (FieldKind::ByteRangeList, FieldData::Ranges(ranges)) => ranges
            .iter()
            .map(|range| format!("{}-{}", opt_u64(range.first), opt_u64(range.last)))
            .collect::<Vec<_>>()
            .join(", "),
        (FieldKind::EntityTagOrDate, FieldData::TagOrDate(value)) => match value {
            Some(TagOrDate::Tag(tag)) => render_tag(tag),
            Some(TagOrDate::Date(seconds)) => grammar::format_date(*seconds)?,
            None => String::new(),
        },
        (FieldKind::ProductComment, FieldData::List(items)) => items.join(" "),
        (FieldKind::WarningList, FieldData::Warnings(warnings)) => {
            let mut rendered = Vec::with_capacity(warnings.len());
            for warning in warnings {
                rendered.push(render_warning(warning)?);
            }
            rendered.join(", ")
        }
        (FieldKind::ViaList, FieldData::Vias(vias)) => {
            vias.iter().map(render_via).collect::<Vec<_>>().join(", ")
        }
        _ => return Err(FieldError::wrong_shape(kind.name())),
    };
    Ok(out)
}

fn parse_int(kind: FieldKind, s: &str) -> Result<u64, FieldError> {
    s.parse().map_err(|e| FieldError::unparseable(kind.name(), s, e))
}

fn parse_tag(s: &str) -> EntityTag {
    match s.strip_prefix("W/") {
        Some(rest) => EntityTag::weak(grammar::unquote(rest)),
        None => EntityTag::strong(grammar::unquote(s)),
    }
}

fn render_tag(tag: &EntityTag) -> String {
    let weak = if tag.weak { "W/" } else { "" };
    format!("{weak}{}", grammar::quote(&tag.tag, true))
}

/// `token[=value]` items to a lowercase-keyed map; values lose one quote
/// layer, a bare token maps to no value.
fn parse_params<'a>(items: impl IntoIterator<Item = &'a str>) -> Params {
    let mut params = IndexMap::new();
    for item in items {
        match item.split_once('=') {
            Some((attr, value)) => params.insert(attr.trim().to_ascii_lowercase(), Some(grammar::unquote(value))),
            None => params.insert(item.to_ascii_lowercase(), None),
        };
    }
    params
}

fn render_params(params: &Params, force_quote: &[&str], sort_q_last: bool, separator: &str) -> String {
    let mut entries: Vec<(&String, &Option<String>)> = params.iter().collect();
    if sort_q_last {
        entries.sort_by_key(|(attr, _)| attr.as_str() == "q");
    }
    entries
        .into_iter()
        .map(|(attr, value)| match value {
            Some(value) => format!("{attr}={}", grammar::quote(value, force_quote.contains(&attr.as_str()))),
            None => attr.clone(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn parse_token_params(spec: &FieldSpec, s: &str) -> (String, Params) {
    match grammar::find_unquoted(s, ';') {
        Some(idx) => {
            let token = spec.normalize.apply(s[..idx].trim());
            let params = parse_params(grammar::split_items(&s[idx + 1..], ';'));
            (token, params)
        }
        None => (spec.normalize.apply(s.trim()), IndexMap::new()),
    }
}

fn render_token_params(spec: &FieldSpec, token: Option<&str>, params: &Params) -> String {
    let token = spec.normalize.apply(token.unwrap_or_default());
    if params.is_empty() {
        token
    } else {
        format!("{token}; {}", render_params(params, spec.force_quote, spec.sort_q_last, "; "))
    }
}

/// Challenges are comma-grouped: a bare token followed by whitespace starts
/// a new `scheme params` challenge, anything else continues the parameters
/// of the current one. The token must contain no `=` and no quote, so a
/// quoted parameter value with an embedded space stays a parameter.
fn parse_challenges(s: &str) -> Vec<Challenge> {
    let mut challenges: Vec<Challenge> = Vec::new();
    for item in grammar::split_items(s, ',') {
        match item.split_once(char::is_whitespace) {
            Some((scheme, rest)) if !scheme.contains(['=', '"']) => challenges.push(Challenge {
                scheme: grammar::capitalize(scheme),
                params: parse_params(grammar::split_items(rest, ',')),
            }),
            _ => match challenges.last_mut() {
                Some(challenge) => {
                    challenge.params.extend(parse_params([item]));
                }
                None => challenges.push(Challenge { scheme: grammar::capitalize(item), params: IndexMap::new() }),
            },
        }
    }
    challenges
}

fn parse_credentials(s: &str) -> Challenge {
    match s.split_once(char::is_whitespace) {
        Some((scheme, rest)) => Challenge {
            scheme: grammar::capitalize(scheme),
            params: parse_params(grammar::split_items(rest, ',')),
        },
        None => Challenge { scheme: grammar::capitalize(s), params: IndexMap::new() },
    }
}

fn render_challenge(challenge: &Challenge, force_quote: &[&str]) -> String {
    format!("{} {}", challenge.scheme, render_params(&challenge.params, force_quote, false, ", "))
}

fn parse_content_range(kind: FieldKind, s: &str) -> Result<ContentRange, FieldError> {
    let (unit, rest) = s
        .split_once(char::is_whitespace)
        .ok_or_else(|| FieldError::unparseable(kind.name(), s, "missing range unit"))?;
    if !unit.eq_ignore_ascii_case("bytes") {
        return Err(FieldError::unsupported_range_unit(unit));
    }
    let (span, total) = rest
        .trim()
        .split_once('/')
        .ok_or_else(|| FieldError::unparseable(kind.name(), s, "missing instance length"))?;
    let (first, last) = if span == "*" {
        (None, None)
    } else {
        let (first, last) = span
            .split_once('-')
            .ok_or_else(|| FieldError::unparseable(kind.name(), s, "malformed byte range"))?;
        (Some(parse_int(kind, first)?), Some(parse_int(kind, last)?))
    };
    let total = if total == "*" { None } else { Some(parse_int(kind, total)?) };
    Ok(ContentRange { first, last, total })
}

fn render_content_range(range: &ContentRange) -> String {
    let span = match (range.first, range.last) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "*".to_owned(),
    };
    let total = range.total.map_or_else(|| "*".to_owned(), |total| total.to_string());
    format!("bytes {span}/{total}")
}

fn parse_byte_ranges(kind: FieldKind, s: &str) -> Result<Vec<ByteRange>, FieldError> {
    let mut ranges = Vec::new();
    for item in grammar::split_items(s, ',') {
        let (first, last) =
            item.split_once('-').ok_or_else(|| FieldError::unparseable(kind.name(), item, "missing dash"))?;
        let first = if first.is_empty() { None } else { Some(parse_int(kind, first)?) };
        let last = if last.is_empty() { None } else { Some(parse_int(kind, last)?) };
        ranges.push(ByteRange { first, last });
    }
    Ok(ranges)
}

fn parse_tag_or_date(s: &str) -> Result<TagOrDate, FieldError> {
    if s == "*" || s.ends_with('"') {
        Ok(TagOrDate::Tag(parse_tag(s)))
    } else {
        Ok(TagOrDate::Date(grammar::parse_date(s)?))
    }
}

fn parse_warnings(kind: FieldKind, s: &str) -> Result<Vec<WarningValue>, FieldError> {
    let mut warnings = Vec::new();
    for item in grammar::split_items(s, ',') {
        let (code, agent, text, date) = grammar::warning_parts(item)
            .ok_or_else(|| FieldError::unparseable(kind.name(), item, "not a warning-value"))?;
        let code = code.parse().map_err(|e| FieldError::unparseable(kind.name(), item, e))?;
        let date = match date {
            Some(date) => Some(grammar::parse_date(date)?),
            None => None,
        };
        warnings.push(WarningValue { code, agent: agent.to_owned(), text: grammar::unquote(text), date });
    }
    Ok(warnings)
}

fn render_warning(warning: &WarningValue) -> Result<String, FieldError> {
    let date = match warning.date {
        Some(seconds) => format!(" \"{}\"", grammar::format_date(seconds)?),
        None => String::new(),
    };
    Ok(format!("{} {} {}{date}", warning.code, warning.agent, grammar::quote(&warning.text, true)))
}

fn parse_vias(kind: FieldKind, s: &str) -> Result<Vec<Via>, FieldError> {
    let mut vias = Vec::new();
    for item in grammar::split_items(s, ',') {
        let (protocol, rest) = item
            .split_once(char::is_whitespace)
            .ok_or_else(|| FieldError::unparseable(kind.name(), item, "missing received-by"))?;
        let (by, comment) = match rest.trim().split_once(char::is_whitespace) {
            Some((by, comment)) => (by, Some(comment.trim().to_owned())),
            None => (rest.trim(), None),
        };
        vias.push(Via { protocol: protocol.to_owned(), by: by.to_owned(), comment });
    }
    Ok(vias)
}

fn render_via(via: &Via) -> String {
    let comment = via.comment.as_deref().map(|comment| format!(" {comment}")).unwrap_or_default();
    format!("{} {}{comment}", via.protocol.to_uppercase(), via.by)
}

fn opt_u64(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
