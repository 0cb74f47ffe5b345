//! Typed header field values.
//!
//! A [`FieldValue`] keeps two representations of one header field: the wire
//! string and the structured [`FieldData`] its grammar parses to. At most one
//! of the two is live at a time. Setting either representation marks the
//! other stale; reading the stale one converts through the grammar on demand
//! and moves liveness over, so repeated reads are free and conversion cost is
//! only paid at the representation boundary actually crossed.
//!
//! Grammar and parse failures are routed through the field's
//! [`ErrorStrategy`]: under the default *ignore* strategy a bad string is
//! stored anyway and reads of the structured form degrade to the kind's
//! default value, with the string left live so nothing is lost on re-render.

mod codec;
mod data;
pub(crate) mod grammar;

pub use data::{
    ByteRange, Challenge, ContentRange, EntityTag, FieldData, FieldKind, Params, TagOrDate, UriParts, Via,
    WarningValue,
};

use std::mem::discriminant;
use std::sync::Arc;

use crate::error::FieldError;
use crate::registry::{FieldSpec, Registry};
use crate::strategy::ErrorStrategy;

/// One header field value with lazily reconciled string and structured forms.
#[derive(Debug, Clone)]
pub struct FieldValue {
    spec: Arc<FieldSpec>,
    registry: Arc<Registry>,
    strategy: ErrorStrategy,
    /// Wire form; `None` when the structured form is the live one.
    string: Option<String>,
    data: FieldData,
    valid: bool,
}

impl FieldValue {
    /// An empty field. Usually reached through
    /// [`Registry::construct_field`](crate::registry::Registry::construct_field).
    pub fn new(spec: Arc<FieldSpec>, registry: Arc<Registry>, strategy: ErrorStrategy) -> Self {
        let data = spec.kind.default_data();
        Self { spec, registry, strategy, string: None, data, valid: true }
    }

    /// Canonical field name.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    pub fn strategy(&self) -> ErrorStrategy {
        self.strategy
    }

    /// False only after the invalidate strategy disposed of an error here.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Set the wire form, trimming surrounding whitespace. The structured
    /// form goes stale. Text that violates the line grammar is reported
    /// through the strategy but stored regardless.
    pub fn set_string(&mut self, value: &str) -> Result<(), FieldError> {
        let value = value.trim();
        self.data = self.spec.kind.default_data();
        self.string = Some(value.to_owned());
        if !value.is_empty() && !grammar::line_matches(self.spec.kind, value) {
            let err = FieldError::grammar_mismatch(self.spec.kind.name(), value);
            self.strategy.dispose(&self.spec.name, &mut self.valid, err)?;
        }
        Ok(())
    }

    /// Set the structured form; the string form goes stale. A value of the
    /// wrong shape for this kind is reported through the strategy and the
    /// field keeps its previous state.
    pub fn set_data(&mut self, data: FieldData) -> Result<(), FieldError> {
        if discriminant(&data) != discriminant(&self.spec.kind.default_data()) {
            let err = FieldError::wrong_shape(self.spec.kind.name());
            return self.strategy.dispose(&self.spec.name, &mut self.valid, err);
        }
        self.data = data;
        self.string = None;
        Ok(())
    }

    /// The wire form, rendering from the structured form when that one is
    /// live. Rendered text is checked against the line grammar in debug
    /// builds, with mismatches routed through the strategy.
    pub fn string(&mut self) -> Result<String, FieldError> {
        if self.string.is_none() {
            if self.data == self.spec.kind.default_data() {
                self.string = Some(String::new());
            } else {
                match codec::render(&self.spec, &self.registry, &self.data) {
                    Ok(rendered) => {
                        if cfg!(debug_assertions)
                            && !rendered.is_empty()
                            && !grammar::line_matches(self.spec.kind, &rendered)
                        {
                            let err = FieldError::grammar_mismatch(self.spec.kind.name(), &rendered);
                            self.strategy.dispose(&self.spec.name, &mut self.valid, err)?;
                        }
                        self.data = self.spec.kind.default_data();
                        self.string = Some(rendered);
                    }
                    Err(err) => {
                        self.strategy.dispose(&self.spec.name, &mut self.valid, err)?;
                        self.string = Some(String::new());
                    }
                }
            }
        }
        Ok(self.string.clone().unwrap_or_default())
    }

    /// The structured form, parsing the string form when that one is live.
    /// On parse failure the strategy decides, the string stays live, and the
    /// kind's default value is returned.
    pub fn data(&mut self) -> Result<&FieldData, FieldError> {
        let needs_parse = self.data == self.spec.kind.default_data()
            && self.string.as_deref().is_some_and(|s| !s.trim().is_empty());
        if needs_parse {
            let text = self.string.clone().unwrap_or_default();
            match codec::parse(&self.spec, &self.registry, text.trim()) {
                Ok(parsed) => {
                    self.data = parsed;
                    self.string = None;
                }
                Err(err) => self.strategy.dispose(&self.spec.name, &mut self.valid, err)?,
            }
        }
        Ok(&self.data)
    }

    /// Parse one more physical line into an unfoldable field, appending its
    /// items to the structured form. Collections use this to merge repeated
    /// lines of fields whose grammar is ambiguous under comma-joining.
    pub(crate) fn fold_in(&mut self, line: &str) -> Result<(), FieldError> {
        self.data()?;
        match codec::parse(&self.spec, &self.registry, line.trim()) {
            Ok(FieldData::List(mut items)) => {
                if let FieldData::List(existing) = &mut self.data {
                    existing.append(&mut items);
                    self.string = None;
                }
                Ok(())
            }
            Ok(_) => {
                let err = FieldError::wrong_shape(self.spec.kind.name());
                self.strategy.dispose(&self.spec.name, &mut self.valid, err)
            }
            Err(err) => self.strategy.dispose(&self.spec.name, &mut self.valid, err),
        }
    }

    /// Each item of an unfoldable field rendered on its own, for one
    /// physical line per item.
    pub(crate) fn item_strings(&mut self) -> Result<Vec<String>, FieldError> {
        let mut lines = Vec::new();
        if let FieldData::List(items) = self.data()? {
            for item in items.clone() {
                lines.push(codec::render(&self.spec, &self.registry, &FieldData::List(vec![item]))?);
            }
        }
        Ok(lines)
    }

    /// Both forms back to the kind's default, the valid mark restored.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.string = None;
        self.data = self.spec.kind.default_data();
        self.valid = true;
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn field(kind: FieldKind) -> FieldValue {
        let spec = Arc::new(FieldSpec::new(kind.name(), kind));
        FieldValue::new(spec, Registry::standard(), ErrorStrategy::Raise)
    }

    fn registered(name: &str) -> FieldValue {
        Registry::standard().construct_field(name, ErrorStrategy::Raise)
    }

    /// `(string, data)` pairs that are stable in both directions.
    fn check_round_trips(mut f: FieldValue, pairs: &[(&str, FieldData)]) {
        for (s, v) in pairs {
            f.reset();
            f.set_string(s).unwrap();
            assert_eq!(f.data().unwrap(), v, "parse of {s:?}");
            f.reset();
            f.set_data(v.clone()).unwrap();
            assert_eq!(f.string().unwrap(), *s, "render of {v:?}");
        }
    }

    /// `(string, data)` pairs where only string-to-data is canonical.
    fn check_parses(mut f: FieldValue, pairs: &[(&str, FieldData)]) {
        for (s, v) in pairs {
            f.reset();
            f.set_string(s).unwrap();
            assert_eq!(f.data().unwrap(), v, "parse of {s:?}");
        }
    }

    fn params(entries: &[(&str, Option<&str>)]) -> Params {
        entries.iter().map(|(k, v)| ((*k).to_owned(), v.map(str::to_owned))).collect()
    }

    fn list(items: &[&str]) -> FieldData {
        FieldData::List(items.iter().map(|s| (*s).to_owned()).collect())
    }

    #[test]
    fn unknown_pairs() {
        check_round_trips(
            field(FieldKind::Unknown),
            &[
                ("", list(&[])),
                (",", list(&[","])),
                ("1", list(&["1"])),
                ("Ab Cd", list(&["Ab Cd"])),
                ("ab, cd", list(&["ab, cd"])),
                ("ab, cd=\"f,g\"", list(&["ab, cd=\"f,g\""])),
            ],
        );
        check_parses(field(FieldKind::Unknown), &[(" ", list(&[]))]);
    }

    #[test]
    fn token_pairs() {
        check_round_trips(
            field(FieldKind::Token),
            &[
                ("", FieldData::Str(None)),
                ("a123b456", FieldData::Str(Some("a123b456".to_owned()))),
                ("www.example.com:80", FieldData::Str(Some("www.example.com:80".to_owned()))),
                ("bob!jane-john@example.com", FieldData::Str(Some("bob!jane-john@example.com".to_owned()))),
            ],
        );
    }

    #[test]
    fn http_token_list_pairs() {
        check_round_trips(
            field(FieldKind::HttpTokenList),
            &[
                ("", list(&[])),
                ("a", list(&["a"])),
                ("a, b", list(&["a", "b"])),
                ("abc, DEF", list(&["abc", "DEF"])),
            ],
        );
        check_parses(
            field(FieldKind::HttpTokenList),
            &[
                (" ", list(&[])),
                ("a,b", list(&["a", "b"])),
                (",", list(&[])),
                ("a,,", list(&["a"])),
                ("a,,b", list(&["a", "b"])),
            ],
        );
    }

    #[test]
    fn quoted_str_pairs() {
        check_round_trips(
            field(FieldKind::QuotedStr),
            &[
                ("", FieldData::Str(None)),
                ("\"\"", FieldData::Str(Some(String::new()))),
                ("\"a,b\"", FieldData::Str(Some("a,b".to_owned()))),
                (r#""a,b\"c\"""#, FieldData::Str(Some("a,b\"c\"".to_owned()))),
            ],
        );
    }

    #[test]
    fn int_pairs() {
        check_round_trips(
            field(FieldKind::Int),
            &[
                ("", FieldData::Int(None)),
                ("0", FieldData::Int(Some(0))),
                ("2134234234234", FieldData::Int(Some(2134234234234))),
            ],
        );
        check_parses(field(FieldKind::Int), &[(" 1 ", FieldData::Int(Some(1)))]);
    }

    #[test]
    fn field_name_pairs() {
        check_round_trips(
            field(FieldKind::FieldName),
            &[
                ("", FieldData::Str(None)),
                ("Foo", FieldData::Str(Some("Foo".to_owned()))),
                ("Cache-Control", FieldData::Str(Some("Cache-Control".to_owned()))),
            ],
        );
        check_parses(
            field(FieldKind::FieldName),
            &[("cachE-controL", FieldData::Str(Some("Cache-Control".to_owned())))],
        );
        check_parses(
            field(FieldKind::FieldNameList),
            &[
                ("foo, bar, host", list(&["Foo", "Bar", "Host"])),
                (",", list(&[])),
                ("foo,,bar", list(&["Foo", "Bar"])),
            ],
        );
    }

    #[test]
    fn http_date_pairs() {
        check_round_trips(
            field(FieldKind::HttpDate),
            &[("", FieldData::Date(None)), ("Sun, 06 Nov 1994 08:49:37 GMT", FieldData::Date(Some(784111777)))],
        );
        check_parses(
            field(FieldKind::HttpDate),
            &[
                ("Sunday, 06-Nov-94 08:49:37 GMT", FieldData::Date(Some(784111777))),
                ("Sun Nov  6 08:49:37 1994", FieldData::Date(Some(784111777))),
            ],
        );
    }

    #[test]
    fn uri_pairs() {
        let parts = UriParts {
            scheme: "http".to_owned(),
            authority: "www.example.com".to_owned(),
            path: "/foo/bar".to_owned(),
            query: "baz=bat".to_owned(),
            fragment: "bam".to_owned(),
        };
        check_round_trips(
            field(FieldKind::Uri),
            &[("http://www.example.com/foo/bar?baz=bat#bam", FieldData::Uri(Some(parts)))],
        );
    }

    #[test]
    fn entity_tag_pairs() {
        check_round_trips(
            field(FieldKind::EntityTag),
            &[
                ("", FieldData::Tag(None)),
                ("\"\"", FieldData::Tag(Some(EntityTag::strong("")))),
                ("\"abc\"", FieldData::Tag(Some(EntityTag::strong("abc")))),
                ("W/\"abc\"", FieldData::Tag(Some(EntityTag::weak("abc")))),
                ("W/\"\"", FieldData::Tag(Some(EntityTag::weak("")))),
            ],
        );
    }

    #[test]
    fn entity_tag_dict_pairs() {
        let tag_map = |entries: &[(&str, bool)]| {
            FieldData::TagMap(entries.iter().map(|(tag, weak)| ((*tag).to_owned(), *weak)).collect())
        };
        check_round_trips(
            field(FieldKind::EntityTagDict),
            &[
                ("", tag_map(&[])),
                ("\"123,456\"", tag_map(&[("123,456", false)])),
                ("*", tag_map(&[("*", false)])),
            ],
        );
        check_parses(
            field(FieldKind::EntityTagDict),
            &[
                ("\"abc\", \"def\"", tag_map(&[("abc", false), ("def", false)])),
                ("W/\"ghi\", \"jkl\"", tag_map(&[("ghi", true), ("jkl", false)])),
            ],
        );
    }

    #[test]
    fn param_dict_pairs() {
        check_round_trips(
            field(FieldKind::ParamDict),
            &[
                ("", FieldData::Params(IndexMap::new())),
                ("abc=def", FieldData::Params(params(&[("abc", Some("def"))]))),
                ("abc", FieldData::Params(params(&[("abc", None)]))),
                ("$foo=bar", FieldData::Params(params(&[("$foo", Some("bar"))]))),
            ],
        );
        check_parses(
            field(FieldKind::ParamDict),
            &[
                (
                    "abc=def, ghi, jkl=mno",
                    FieldData::Params(params(&[("abc", Some("def")), ("ghi", None), ("jkl", Some("mno"))])),
                ),
                (
                    "abc=\"def,ghi\", jkl=mno",
                    FieldData::Params(params(&[("abc", Some("def,ghi")), ("jkl", Some("mno"))])),
                ),
            ],
        );
    }

    #[test]
    fn str_param_pairs() {
        check_round_trips(
            field(FieldKind::StrParam),
            &[
                ("", FieldData::TokenParams(None, IndexMap::new())),
                ("text/html", FieldData::TokenParams(Some("text/html".to_owned()), IndexMap::new())),
                (
                    "text/html; charset=utf-8",
                    FieldData::TokenParams(Some("text/html".to_owned()), params(&[("charset", Some("utf-8"))])),
                ),
            ],
        );
        check_parses(
            field(FieldKind::StrParam),
            &[(
                "text/html;CHarSET=utf-8 ;q=1.0",
                FieldData::TokenParams(
                    Some("text/html".to_owned()),
                    params(&[("charset", Some("utf-8")), ("q", Some("1.0"))]),
                ),
            )],
        );
    }

    #[test]
    fn str_param_dict_pairs() {
        let map = |entries: &[(&str, &[(&str, Option<&str>)])]| {
            FieldData::TokenParamsMap(entries.iter().map(|(token, p)| ((*token).to_owned(), params(p))).collect())
        };
        check_round_trips(
            field(FieldKind::StrParamDict),
            &[
                ("", map(&[])),
                ("text/html", map(&[("text/html", &[])])),
                ("text/html; charset=utf-8", map(&[("text/html", &[("charset", Some("utf-8"))])])),
                ("*", map(&[("*", &[])])),
                (
                    "text/html; q=1.0, text/plain; q=0.5",
                    map(&[("text/html", &[("q", Some("1.0"))]), ("text/plain", &[("q", Some("0.5"))])]),
                ),
            ],
        );
        check_parses(
            field(FieldKind::StrParamDict),
            &[("text/html, text/plain", map(&[("text/html", &[]), ("text/plain", &[])]))],
        );
    }

    #[test]
    fn challenge_list_pairs() {
        let challenges = |entries: &[(&str, &[(&str, Option<&str>)])]| {
            FieldData::Challenges(
                entries.iter().map(|(scheme, p)| Challenge { scheme: (*scheme).to_owned(), params: params(p) }).collect(),
            )
        };
        check_round_trips(
            field(FieldKind::ChallengeList),
            &[
                ("", challenges(&[])),
                ("Basic realm=Test", challenges(&[("Basic", &[("realm", Some("Test"))])])),
                (
                    "Basic realm=Test, Basic realm=Other",
                    challenges(&[("Basic", &[("realm", Some("Test"))]), ("Basic", &[("realm", Some("Other"))])]),
                ),
            ],
        );
        check_parses(
            field(FieldKind::ChallengeList),
            &[
                (
                    "Digest realm=\"testrealm@host.com\", qop=\"auth,auth-int\", nonce=\"dcd9\", opaque=\"5cc\"",
                    challenges(&[(
                        "Digest",
                        &[
                            ("realm", Some("testrealm@host.com")),
                            ("qop", Some("auth,auth-int")),
                            ("nonce", Some("dcd9")),
                            ("opaque", Some("5cc")),
                        ],
                    )]),
                ),
                ("digesT RealM=foo", challenges(&[("Digest", &[("realm", Some("foo"))])])),
                // a quoted value with a space is a parameter, not a new challenge
                (
                    "Digest realm=\"x\", domain=\"/a /b\"",
                    challenges(&[("Digest", &[("realm", Some("x")), ("domain", Some("/a /b"))])]),
                ),
            ],
        );
    }

    #[test]
    fn credentials_pairs() {
        let credentials = |scheme: &str, p: &[(&str, Option<&str>)]| {
            FieldData::Credentials(Some(Challenge { scheme: scheme.to_owned(), params: params(p) }))
        };
        check_round_trips(
            field(FieldKind::Credentials),
            &[
                ("", FieldData::Credentials(None)),
                ("Basic abcdef", credentials("Basic", &[("abcdef", None)])),
            ],
        );
        check_parses(
            field(FieldKind::Credentials),
            &[(
                "Digest username=\"Mufasa\", realm=\"testrealm@host.com\", qop=auth",
                credentials(
                    "Digest",
                    &[("username", Some("Mufasa")), ("realm", Some("testrealm@host.com")), ("qop", Some("auth"))],
                ),
            )],
        );
    }

    #[test]
    fn content_range_pairs() {
        check_round_trips(
            field(FieldKind::ContentRange),
            &[
                (
                    "bytes 0-500/1600",
                    FieldData::Range(ContentRange { first: Some(0), last: Some(500), total: Some(1600) }),
                ),
                (
                    "bytes 0-500/*",
                    FieldData::Range(ContentRange { first: Some(0), last: Some(500), total: None }),
                ),
            ],
        );
        // a fully-starred range is the kind's empty value, so it only parses
        check_parses(
            field(FieldKind::ContentRange),
            &[("bytes */*", FieldData::Range(ContentRange { first: None, last: None, total: None }))],
        );
    }

    #[test]
    fn content_range_rejects_other_units() {
        let mut f = field(FieldKind::ContentRange);
        f.set_string("lines 0-500/1600").unwrap_err();
        f.reset();
        // the grammar check can be bypassed, the parse still refuses
        let mut f = FieldValue::new(
            Arc::new(FieldSpec::new("Content-Range", FieldKind::ContentRange)),
            Registry::standard(),
            ErrorStrategy::Ignore,
        );
        f.set_string("lines 0-500/1600").unwrap();
        assert_eq!(f.data().unwrap().as_range(), Some(ContentRange::default()));
    }

    #[test]
    fn byte_range_pairs() {
        let ranges = |entries: &[(Option<u64>, Option<u64>)]| {
            FieldData::Ranges(entries.iter().map(|(first, last)| ByteRange { first: *first, last: *last }).collect())
        };
        check_round_trips(
            field(FieldKind::ByteRangeList),
            &[
                ("", ranges(&[])),
                (
                    "500-600, -50, 2500-",
                    ranges(&[(Some(500), Some(600)), (None, Some(50)), (Some(2500), None)]),
                ),
            ],
        );
    }

    #[test]
    fn tag_or_date_pairs() {
        check_round_trips(
            field(FieldKind::EntityTagOrDate),
            &[
                ("", FieldData::TagOrDate(None)),
                ("W/\"12345\"", FieldData::TagOrDate(Some(TagOrDate::Tag(EntityTag::weak("12345"))))),
                (
                    "Sun, 06 Nov 1994 08:49:37 GMT",
                    FieldData::TagOrDate(Some(TagOrDate::Date(784111777))),
                ),
            ],
        );
    }

    #[test]
    fn product_comment_pairs() {
        check_round_trips(
            field(FieldKind::ProductComment),
            &[
                ("", list(&[])),
                (
                    "Mozilla/5.0 (Macintosh; U; PPC) AppleWebKit/412.6.2",
                    list(&["Mozilla/5.0", "(Macintosh; U; PPC)", "AppleWebKit/412.6.2"]),
                ),
            ],
        );
    }

    #[test]
    fn warning_pairs() {
        let warning = FieldData::Warnings(vec![WarningValue {
            code: 199,
            agent: "www.example.com:85".to_owned(),
            text: "Something's wrong".to_owned(),
            date: Some(784111777),
        }]);
        check_round_trips(
            field(FieldKind::WarningList),
            &[(
                "199 www.example.com:85 \"Something's wrong\" \"Sun, 06 Nov 1994 08:49:37 GMT\"",
                warning,
            )],
        );
        check_round_trips(
            field(FieldKind::WarningList),
            &[(
                "110 proxy.example.org \"Response is stale\"",
                FieldData::Warnings(vec![WarningValue {
                    code: 110,
                    agent: "proxy.example.org".to_owned(),
                    text: "Response is stale".to_owned(),
                    date: None,
                }]),
            )],
        );
    }

    #[test]
    fn via_pairs() {
        let vias = FieldData::Vias(vec![
            Via { protocol: "HTTP/1.0".to_owned(), by: "fred".to_owned(), comment: None },
            Via { protocol: "1.1".to_owned(), by: "nowhere.com".to_owned(), comment: Some("(Apache/1.1)".to_owned()) },
        ]);
        check_round_trips(
            field(FieldKind::ViaList),
            &[("HTTP/1.0 fred, 1.1 nowhere.com (Apache/1.1)", vias)],
        );
    }

    #[test]
    fn normalization_knobs_apply() {
        let mut allow = registered("Allow");
        allow.set_string("get, head").unwrap();
        assert_eq!(allow.data().unwrap(), &list(&["GET", "HEAD"]));
        assert_eq!(allow.string().unwrap(), "GET, HEAD");

        let mut accept = registered("Accept");
        accept.set_string("TEXT/HTML;q=0.8").unwrap();
        accept.data().unwrap();
        assert_eq!(accept.string().unwrap(), "text/html; q=0.8");
    }

    #[test]
    fn q_param_renders_last() {
        let mut accept = registered("Accept");
        accept.set_string("text/html;q=0.8;level=1").unwrap();
        accept.data().unwrap();
        assert_eq!(accept.string().unwrap(), "text/html; level=1; q=0.8");
    }

    #[test]
    fn force_quote_knob_applies() {
        let mut p3p = registered("P3P");
        p3p.set_data(FieldData::Params(params(&[("policyref", Some("/w3c/p3p.xml"))]))).unwrap();
        assert_eq!(p3p.string().unwrap(), "policyref=\"/w3c/p3p.xml\"");
    }

    #[test]
    fn reset_is_idempotent() {
        let mut f = field(FieldKind::Int);
        f.set_string("15").unwrap();
        f.reset();
        assert_eq!(f.string().unwrap(), "");
        assert_eq!(f.data().unwrap(), &FieldData::Int(None));
        f.reset();
        assert_eq!(f.string().unwrap(), "");
        assert_eq!(f.data().unwrap(), &FieldData::Int(None));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let mut f = field(FieldKind::Int);
        assert!(matches!(f.set_data(list(&["a"])), Err(FieldError::WrongShape { .. })));
    }

    #[test]
    fn bad_date_raise_vs_ignore() {
        let mut raising = field(FieldKind::HttpDate);
        raising.set_string("not a date").unwrap_err();

        let mut ignoring = FieldValue::new(
            Arc::new(FieldSpec::new("Date", FieldKind::HttpDate)),
            Registry::standard(),
            ErrorStrategy::Ignore,
        );
        ignoring.set_string("not a date").unwrap();
        assert_eq!(ignoring.data().unwrap(), &FieldData::Date(None));
        // the unparsed text stays live
        assert_eq!(ignoring.string().unwrap(), "not a date");
        assert!(ignoring.is_valid());
    }

    #[test]
    fn invalidate_marks_the_field() {
        let mut f = FieldValue::new(
            Arc::new(FieldSpec::new("Age", FieldKind::Int)),
            Registry::standard(),
            ErrorStrategy::Invalidate,
        );
        f.set_string("abc").unwrap();
        assert!(!f.is_valid());
        f.reset();
        assert!(f.is_valid());
    }
}
