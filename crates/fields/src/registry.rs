//! The field registry: canonical names and per-field grammar specs.
//!
//! A [`Registry`] is an explicit, immutable table mapping case-insensitive
//! field names to [`FieldSpec`]s. It replaces any notion of process-global
//! registration state: callers build (or share) an instance and pass it to
//! the collections and fields that need it, which makes it trivial to
//! construct a small registry in a test. [`Registry::standard`] hands out the
//! shared RFC 2616 table from [`standard`](crate::standard).
//!
//! Names that miss the table are not errors. Lookup falls back to an
//! unknown-header spec whose canonical spelling capitalizes the first letter
//! of each hyphen-delimited segment, so `x-custom` reads back as `X-Custom`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::field::grammar::capitalize;
use crate::field::{FieldKind, FieldValue};
use crate::standard;
use crate::strategy::ErrorStrategy;

/// Case normalization applied to tokens of a field on both parse and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalize {
    #[default]
    None,
    /// `Allow: get` reads back as `GET`.
    Upper,
    /// `Accept: TEXT/HTML` reads back as `text/html`.
    Lower,
    /// `Timeout: INFINITE` reads back as `Infinite`.
    Capitalize,
}

impl Normalize {
    pub(crate) fn apply(self, s: &str) -> String {
        match self {
            Self::None => s.to_owned(),
            Self::Upper => s.to_ascii_uppercase(),
            Self::Lower => s.to_ascii_lowercase(),
            Self::Capitalize => capitalize(s),
        }
    }
}

/// Everything the engine knows about one header field: its canonical
/// spelling, its grammar, and the per-field rendering knobs.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Canonical spelling, e.g. `WWW-Authenticate`.
    pub name: Cow<'static, str>,
    pub kind: FieldKind,
    /// Token case normalization (token-shaped kinds only).
    pub normalize: Normalize,
    /// Parameter names whose values are always rendered quoted.
    pub force_quote: &'static [&'static str],
    /// Render parameters with `q` last, the conventional spelling for
    /// quality-factored lists like `Accept`.
    pub sort_q_last: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind, normalize: Normalize::None, force_quote: &[], sort_q_last: false }
    }

    pub fn normalize(mut self, normalize: Normalize) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn force_quote(mut self, names: &'static [&'static str]) -> Self {
        self.force_quote = names;
        self
    }

    pub fn sort_q_last(mut self) -> Self {
        self.sort_q_last = true;
        self
    }
}

/// Canonical spelling for a name the registry does not know.
fn fallback_name(name: &str) -> String {
    name.split('-').map(capitalize).collect::<Vec<_>>().join("-")
}

/// An immutable table of field specs, keyed by lowercased name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_name: HashMap<String, Arc<FieldSpec>>,
}

static STANDARD: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::from_specs(standard::specs())));

impl Registry {
    /// An empty registry: every name falls back to the unknown-header kind.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from specs. Later specs win on name collision.
    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        let mut registry = Self::default();
        for spec in specs {
            registry.register(spec);
        }
        registry
    }

    /// The shared standard table, RFC 2616 plus common extensions.
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    pub fn register(&mut self, spec: FieldSpec) {
        self.by_name.insert(spec.name.to_ascii_lowercase(), Arc::new(spec));
    }

    /// The spec registered under `name`, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&Arc<FieldSpec>> {
        self.by_name.get(&name.to_ascii_lowercase())
    }

    /// Canonical spelling for `name`: the registered spelling on a hit, the
    /// segment-capitalized fallback on a miss.
    pub fn canonical_name(&self, name: &str) -> String {
        match self.lookup(name) {
            Some(spec) => spec.name.clone().into_owned(),
            None => fallback_name(name),
        }
    }

    /// The spec for `name`, synthesizing an unknown-header spec on a miss.
    pub fn spec_for(&self, name: &str) -> Arc<FieldSpec> {
        match self.lookup(name) {
            Some(spec) => Arc::clone(spec),
            None => Arc::new(FieldSpec::new(fallback_name(name), FieldKind::Unknown)),
        }
    }

    /// An empty field of the right kind for `name`.
    pub fn construct_field(self: &Arc<Self>, name: &str, strategy: ErrorStrategy) -> FieldValue {
        FieldValue::new(self.spec_for(name), Arc::clone(self), strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        let registry = Registry::standard();
        assert_eq!(registry.canonical_name("cachE-controL"), "Cache-Control");
        assert_eq!(registry.canonical_name("content-md5"), "Content-MD5");
        assert_eq!(registry.canonical_name("te"), "TE");
        assert_eq!(registry.canonical_name("www-authenticate"), "WWW-Authenticate");
        assert_eq!(registry.canonical_name("x-custom"), "X-Custom");
        assert_eq!(registry.canonical_name("x"), "X");
    }

    #[test]
    fn unknown_names_fall_back() {
        let registry = Registry::standard();
        let spec = registry.spec_for("X-Whatever");
        assert_eq!(spec.kind, FieldKind::Unknown);
        assert_eq!(spec.name, "X-Whatever");
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = Registry::empty();
        registry.register(FieldSpec::new("X-Limit", FieldKind::Token));
        registry.register(FieldSpec::new("X-Limit", FieldKind::Int));
        assert_eq!(registry.lookup("x-limit").unwrap().kind, FieldKind::Int);
    }

    #[test]
    fn test_registry_is_cheap_to_build() {
        let registry = Registry::from_specs([FieldSpec::new("X-Count", FieldKind::Int)]);
        assert_eq!(registry.canonical_name("x-count"), "X-Count");
        assert_eq!(registry.spec_for("other").kind, FieldKind::Unknown);
    }
}
