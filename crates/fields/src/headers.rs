//! Ordered collections of typed header fields.
//!
//! [`Headers`] maps canonical field names to [`FieldValue`]s, preserving the
//! order lines arrived in. It parses raw RFC 2616 §4.2 header blocks
//! (including RFC 822 folded continuation lines), pre-split name/value
//! pairs, and CGI-style environment variables, and renders the collection
//! back to a wire block. Repeated physical lines for the same field merge:
//! comma-concatenation for foldable kinds, structured append for unfoldable
//! ones.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::HeaderError;
use crate::field::{FieldData, FieldValue};
use crate::registry::Registry;
use crate::strategy::ErrorStrategy;

const CRLF: &str = "\r\n";

// RFC 822 folding: a line break followed by SP/HT continues the previous line.
static LWS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n[ \t]+").expect("unfold pattern compiles"));
static LINE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("line split pattern compiles"));

/// A header collection: canonical name to field, in arrival order.
#[derive(Debug, Clone)]
pub struct Headers {
    fields: IndexMap<String, FieldValue>,
    registry: Arc<Registry>,
    strategy: ErrorStrategy,
    valid: bool,
}

impl Default for Headers {
    fn default() -> Self {
        Self::new()
    }
}

impl Headers {
    /// An empty collection over the standard registry with the default
    /// (ignore) strategy.
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self { fields: IndexMap::new(), registry, strategy: ErrorStrategy::default(), valid: true }
    }

    pub fn with_strategy(mut self, strategy: ErrorStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn strategy(&self) -> ErrorStrategy {
        self.strategy
    }

    /// False only after the invalidate strategy disposed of an error here.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a raw header block: unfold continuations, then one
    /// `name: value` field per line. Lines without a colon go through the
    /// strategy and are skipped; empty lines are ignored, so a trailing
    /// blank line is harmless.
    pub fn parse_block(&mut self, block: &str) -> Result<(), HeaderError> {
        let unfolded = LWS.replace_all(block, " ");
        for line in LINE_SPLIT.split(&unfolded) {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once(':') {
                Some((name, value)) => self.merge_line(name.trim(), value.trim())?,
                None => {
                    let err = HeaderError::malformed_line(line);
                    self.strategy.dispose("headers", &mut self.valid, err)?;
                }
            }
        }
        trace!(fields = self.fields.len(), "parsed header block");
        Ok(())
    }

    /// Merge one physical line into the collection.
    pub fn merge_line(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        let canonical = self.registry.canonical_name(name);
        match self.fields.get_mut(&canonical) {
            Some(field) if field.kind().is_unfoldable() => field.fold_in(value)?,
            Some(field) => {
                let merged = format!("{}, {}", field.string()?, value);
                field.set_string(&merged)?;
            }
            None => {
                let mut field = self.registry.construct_field(&canonical, self.strategy);
                field.set_string(value)?;
                self.fields.insert(canonical, field);
            }
        }
        Ok(())
    }

    /// Parse pre-split name/value pairs, with the same merge semantics as
    /// repeated physical lines.
    pub fn parse_pairs<N, V>(&mut self, pairs: impl IntoIterator<Item = (N, V)>) -> Result<(), HeaderError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in pairs {
            self.merge_line(name.as_ref().trim(), value.as_ref().trim())?;
        }
        Ok(())
    }

    /// Parse request headers from CGI-style environment variables: `HTTP_*`
    /// with underscores read as hyphens, plus the `CONTENT_TYPE` and
    /// `CONTENT_LENGTH` pass-throughs. Anything else goes through the
    /// strategy and is skipped.
    pub fn parse_env<N, V>(&mut self, vars: impl IntoIterator<Item = (N, V)>) -> Result<(), HeaderError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in vars {
            let name = name.as_ref();
            let header_name = match name {
                "CONTENT_TYPE" => "Content-Type".to_owned(),
                "CONTENT_LENGTH" => "Content-Length".to_owned(),
                _ => match name.strip_prefix("HTTP_") {
                    Some(rest) => rest.replace('_', "-"),
                    None => {
                        let err = HeaderError::unexpected_env_name(name);
                        self.strategy.dispose("headers", &mut self.valid, err)?;
                        continue;
                    }
                },
            };
            self.merge_line(&header_name, value.as_ref().trim())?;
        }
        Ok(())
    }

    /// Render the collection to a wire block: one `Name: value` line per
    /// field, CRLF after every line including the last. Unfoldable fields
    /// emit one line per structured item.
    pub fn render(&mut self) -> Result<String, HeaderError> {
        let mut out = String::new();
        for index in 0..self.fields.len() {
            let Some((name, field)) = self.fields.get_index_mut(index) else { break };
            let name = name.clone();
            if field.kind().is_unfoldable() {
                for item in field.item_strings()? {
                    out.push_str(&name);
                    out.push_str(": ");
                    out.push_str(&item);
                    out.push_str(CRLF);
                }
            } else {
                let value = field.string()?;
                out.push_str(&name);
                out.push_str(": ");
                out.push_str(&value);
                out.push_str(CRLF);
            }
        }
        Ok(out)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&self.registry.canonical_name(name))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(&self.registry.canonical_name(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(&self.registry.canonical_name(name))
    }

    /// The field under `name`: a clone of the stored entry, or a fresh
    /// default-valued field of the right kind. Reading a header that is not
    /// there always succeeds with the kind's defaults and never alters the
    /// collection.
    pub fn field(&self, name: &str) -> FieldValue {
        let canonical = self.registry.canonical_name(name);
        match self.fields.get(&canonical) {
            Some(field) => field.clone(),
            None => self.registry.construct_field(&canonical, self.strategy),
        }
    }

    /// Replace (or create) a field from a raw string value.
    pub fn set_string(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        let canonical = self.registry.canonical_name(name);
        let mut field = self.registry.construct_field(&canonical, self.strategy);
        field.set_string(value)?;
        self.fields.insert(canonical, field);
        Ok(())
    }

    /// Replace (or create) a field from a structured value.
    pub fn set_data(&mut self, name: &str, data: FieldData) -> Result<(), HeaderError> {
        let canonical = self.registry.canonical_name(name);
        let mut field = self.registry.construct_field(&canonical, self.strategy);
        field.set_data(data)?;
        self.fields.insert(canonical, field);
        Ok(())
    }

    /// Insert a prebuilt field under its own canonical name.
    pub fn insert(&mut self, field: FieldValue) {
        self.fields.insert(field.name().to_owned(), field);
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.shift_remove(&self.registry.canonical_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FieldValue)> {
        self.fields.iter_mut().map(|(name, field)| (name.as_str(), field))
    }
}
