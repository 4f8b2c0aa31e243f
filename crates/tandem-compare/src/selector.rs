//! What part of each record participates in a comparison.
//!
//! Two knobs narrow a comparison: per-field inclusion lists of top-level
//! keys, and ignore patterns such as `response.header.Date` or
//! `response.body.*.updated_at`. A `*` segment matches any single key or
//! index, and a pattern also covers everything below the node it matches.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tandem_config::CompareConfig;
use tandem_core::enums::RecordField;
use tandem_core::path::{PathSegment, TreePath};

use crate::error::CompareError;

const WILDCARD: &str = "*";

// ---------------------------------------------------------------------------
// PathPattern
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Any,
    Exact(PathSegment),
}

impl PatternSegment {
    fn matches(&self, segment: &PathSegment) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == segment,
        }
    }
}

/// A tree path in which `*` segments match anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<PatternSegment>,
}

impl PathPattern {
    /// Whether `path` is the matched node or lies below it.
    #[must_use]
    pub fn covers(&self, path: &TreePath) -> bool {
        let segments = path.segments();
        self.segments.len() <= segments.len()
            && self
                .segments
                .iter()
                .zip(segments)
                .all(|(pattern, segment)| pattern.matches(segment))
    }
}

impl From<&[PathSegment]> for PathPattern {
    fn from(segments: &[PathSegment]) -> Self {
        Self {
            segments: segments
                .iter()
                .map(|segment| match segment {
                    PathSegment::Key(key) if key == WILDCARD => PatternSegment::Any,
                    other => PatternSegment::Exact(other.clone()),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// IgnoreRules
// ---------------------------------------------------------------------------

/// Ignore patterns split by the record field they are rooted at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    by_field: BTreeMap<RecordField, Vec<PathPattern>>,
}

impl IgnoreRules {
    /// Parse patterns of the form `request.<path>` or `response.<path>`.
    ///
    /// # Errors
    ///
    /// Returns `CompareError::InvalidPattern` for a pattern that does not
    /// parse or is not rooted at `request` or `response`.
    pub fn parse<S: AsRef<str>>(patterns: &[S]) -> Result<Self, CompareError> {
        let mut rules = Self::default();
        for raw in patterns {
            let raw = raw.as_ref();
            let (field, rest) =
                TreePath::parse_rooted(raw).map_err(|e| CompareError::InvalidPattern {
                    pattern: raw.to_string(),
                    reason: e.reason,
                })?;
            rules
                .by_field
                .entry(field)
                .or_default()
                .push(PathPattern::from(rest.segments()));
        }
        Ok(rules)
    }

    /// Patterns rooted at `field`. `kind` is never ignored.
    #[must_use]
    pub fn for_field(&self, field: RecordField) -> &[PathPattern] {
        self.by_field
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// FieldSelector
// ---------------------------------------------------------------------------

/// Restricts request and response trees to configured top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelector {
    request: Vec<String>,
    response: Vec<String>,
}

impl FieldSelector {
    #[must_use]
    pub const fn new(request: Vec<String>, response: Vec<String>) -> Self {
        Self { request, response }
    }

    #[must_use]
    pub fn from_config(config: &CompareConfig) -> Self {
        Self::new(config.request_fields.clone(), config.response_fields.clone())
    }

    /// The part of `tree` that takes part in comparing `field`.
    ///
    /// With no keys configured, or when `tree` is not a mapping, the whole
    /// tree is returned. Listed keys absent from `tree` are simply left out,
    /// so a key present on one side only still shows up as missing.
    #[must_use]
    pub fn project<'v>(&self, field: RecordField, tree: &'v Value) -> Cow<'v, Value> {
        let keys = match field {
            RecordField::Kind => return Cow::Borrowed(tree),
            RecordField::Request => &self.request,
            RecordField::Response => &self.response,
        };
        let Value::Object(map) = tree else {
            return Cow::Borrowed(tree);
        };
        if keys.is_empty() {
            return Cow::Borrowed(tree);
        }

        let projected: Map<String, Value> = keys
            .iter()
            .filter_map(|key| map.get(key).map(|value| (key.clone(), value.clone())))
            .collect();
        Cow::Owned(Value::Object(projected))
    }
}
