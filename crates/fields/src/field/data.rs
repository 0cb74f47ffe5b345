//! Structured representations of header field values.
//!
//! Every header grammar in the engine maps onto one [`FieldKind`], and every
//! parsed value onto one [`FieldData`] shape: a scalar, a list, a mapping or a
//! tuple. The kind carries the static facts about a grammar (single- vs
//! multi-value, unfoldable, default value); the data enum carries the parsed
//! result. Mappings use [`IndexMap`] so that parse followed by render keeps
//! the wire order stable.

use indexmap::IndexMap;

/// Parameter map: lowercased key to optional value. A bare token parses to a
/// key with no value.
pub type Params = IndexMap<String, Option<String>>;

/// The grammar of a header field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Unregistered header: an unfoldable list of opaque strings.
    Unknown,
    /// One run of non-whitespace characters, passed through untouched.
    Token,
    /// One RFC 2616 token, with optional case normalization.
    HttpToken,
    /// Comma-separated RFC 2616 tokens.
    HttpTokenList,
    /// Unsigned decimal integer.
    Int,
    /// One quoted-string; the structured form is the unquoted text.
    QuotedStr,
    /// A header field-name, re-canonicalized through the registry.
    FieldName,
    /// Comma-separated field-names.
    FieldNameList,
    /// HTTP-date in any of the three RFC forms; seconds since the epoch.
    HttpDate,
    /// Absolute or relative URI split into five parts, no percent-decoding.
    Uri,
    /// Entity tag, optionally weak (`W/` prefix).
    EntityTag,
    /// Comma-separated entity tags as a tag-to-weakness mapping.
    EntityTagDict,
    /// Comma-separated `token[=value]` parameters.
    ParamDict,
    /// One token followed by `;`-separated parameters.
    StrParam,
    /// Comma-separated token-with-parameters entries.
    StrParamDict,
    /// Authentication challenges: scheme plus comma-separated parameters.
    ChallengeList,
    /// A single scheme-plus-parameters credential.
    Credentials,
    /// `bytes first-last/total` with `*` for absent positions.
    ContentRange,
    /// Comma-separated byte ranges with optionally absent endpoints.
    ByteRangeList,
    /// Either an entity tag or an HTTP-date (If-Range).
    EntityTagOrDate,
    /// Whitespace-separated products and parenthesized comments.
    ProductComment,
    /// RFC 2616 warning values.
    WarningList,
    /// Via intermediary entries.
    ViaList,
}

impl FieldKind {
    /// Grammar name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Token => "Token",
            Self::HttpToken => "HttpToken",
            Self::HttpTokenList => "HttpTokenList",
            Self::Int => "Int",
            Self::QuotedStr => "QuotedStr",
            Self::FieldName => "FieldName",
            Self::FieldNameList => "FieldNameList",
            Self::HttpDate => "HttpDate",
            Self::Uri => "Uri",
            Self::EntityTag => "EntityTag",
            Self::EntityTagDict => "EntityTagDict",
            Self::ParamDict => "ParamDict",
            Self::StrParam => "StrParam",
            Self::StrParamDict => "StrParamDict",
            Self::ChallengeList => "ChallengeList",
            Self::Credentials => "Credentials",
            Self::ContentRange => "ContentRange",
            Self::ByteRangeList => "ByteRangeList",
            Self::EntityTagOrDate => "EntityTagOrDate",
            Self::ProductComment => "ProductComment",
            Self::WarningList => "WarningList",
            Self::ViaList => "ViaList",
        }
    }

    /// Whether the grammar allows only one item per logical value. For
    /// multi-value kinds the line grammar is a comma-separated repetition of
    /// the item grammar.
    pub fn is_single_value(self) -> bool {
        !matches!(
            self,
            Self::HttpTokenList
                | Self::FieldNameList
                | Self::EntityTagDict
                | Self::ParamDict
                | Self::StrParamDict
                | Self::ChallengeList
                | Self::ByteRangeList
                | Self::WarningList
                | Self::ViaList
        )
    }

    /// Whether repeated physical lines must merge by structured-value append
    /// rather than string concatenation. Only the opaque unknown-header kind
    /// qualifies: its grammar is ambiguous under comma-joining.
    pub fn is_unfoldable(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The structured value of an empty field of this kind.
    pub fn default_data(self) -> FieldData {
        match self {
            Self::Unknown | Self::ProductComment => FieldData::List(Vec::new()),
            Self::Token | Self::HttpToken | Self::QuotedStr | Self::FieldName => FieldData::Str(None),
            Self::HttpTokenList | Self::FieldNameList => FieldData::List(Vec::new()),
            Self::Int => FieldData::Int(None),
            Self::HttpDate => FieldData::Date(None),
            Self::Uri => FieldData::Uri(None),
            Self::EntityTag => FieldData::Tag(None),
            Self::EntityTagDict => FieldData::TagMap(IndexMap::new()),
            Self::ParamDict => FieldData::Params(IndexMap::new()),
            Self::StrParam => FieldData::TokenParams(None, IndexMap::new()),
            Self::StrParamDict => FieldData::TokenParamsMap(IndexMap::new()),
            Self::ChallengeList => FieldData::Challenges(Vec::new()),
            Self::Credentials => FieldData::Credentials(None),
            Self::ContentRange => FieldData::Range(ContentRange::default()),
            Self::ByteRangeList => FieldData::Ranges(Vec::new()),
            Self::EntityTagOrDate => FieldData::TagOrDate(None),
            Self::WarningList => FieldData::Warnings(Vec::new()),
            Self::ViaList => FieldData::Vias(Vec::new()),
        }
    }
}

/// An entity tag: opaque text plus the weak (`W/`) flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTag {
    pub tag: String,
    pub weak: bool,
}

impl EntityTag {
    pub fn strong(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), weak: false }
    }

    pub fn weak(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), weak: true }
    }
}

/// An authentication challenge (or credential): scheme plus parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Capitalized scheme name, e.g. `Digest`.
    pub scheme: String,
    pub params: Params,
}

/// `Content-Range` positions; `None` renders as `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentRange {
    pub first: Option<u64>,
    pub last: Option<u64>,
    pub total: Option<u64>,
}

/// One `Range` item; a missing endpoint stays absent, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub first: Option<u64>,
    pub last: Option<u64>,
}

/// `If-Range` alternative: an entity tag or a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOrDate {
    Tag(EntityTag),
    Date(u64),
}

/// One `Warning` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningValue {
    pub code: u16,
    pub agent: String,
    pub text: String,
    pub date: Option<u64>,
}

/// One `Via` intermediary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Via {
    pub protocol: String,
    pub by: String,
    pub comment: Option<String>,
}

/// URI parts in `urlsplit` convention: empty string means absent, and no
/// percent-decoding is applied anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UriParts {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

/// The structured form of a field value.
///
/// Variants are shapes, not headers: several kinds share a shape (a token and
/// a quoted string are both `Str`), with the kind deciding the grammar used
/// to get in and out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    Str(Option<String>),
    List(Vec<String>),
    Int(Option<u64>),
    Date(Option<u64>),
    Uri(Option<UriParts>),
    Tag(Option<EntityTag>),
    TagMap(IndexMap<String, bool>),
    Params(Params),
    TokenParams(Option<String>, Params),
    TokenParamsMap(IndexMap<String, Params>),
    Challenges(Vec<Challenge>),
    Credentials(Option<Challenge>),
    Range(ContentRange),
    Ranges(Vec<ByteRange>),
    TagOrDate(Option<TagOrDate>),
    Warnings(Vec<WarningValue>),
    Vias(Vec<Via>),
}

impl FieldData {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => s.as_deref(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(n) => *n,
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<u64> {
        match self {
            Self::Date(secs) => *secs,
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&UriParts> {
        match self {
            Self::Uri(parts) => parts.as_ref(),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&EntityTag> {
        match self {
            Self::Tag(tag) => tag.as_ref(),
            _ => None,
        }
    }

    pub fn as_tag_map(&self) -> Option<&IndexMap<String, bool>> {
        match self {
            Self::TagMap(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_params(&self) -> Option<&Params> {
        match self {
            Self::Params(params) => Some(params),
            _ => None,
        }
    }

    pub fn as_token_params(&self) -> Option<(Option<&str>, &Params)> {
        match self {
            Self::TokenParams(token, params) => Some((token.as_deref(), params)),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<ContentRange> {
        match self {
            Self::Range(range) => Some(*range),
            _ => None,
        }
    }

    pub fn as_ranges(&self) -> Option<&[ByteRange]> {
        match self {
            Self::Ranges(ranges) => Some(ranges),
            _ => None,
        }
    }
}
