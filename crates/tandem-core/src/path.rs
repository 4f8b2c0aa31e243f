//! Locations inside a payload tree.
//!
//! A [`TreePath`] is a list of mapping keys and sequence indices from the
//! root of a request or response tree. Its textual form joins keys with `.`
//! and renders indices as `[i]`:
//!
//! ```text
//! $                  the root itself
//! status             key "status" of the root mapping
//! items[2].price     key "price" of the third element of "items"
//! headers["x.id"]    keys that contain `.`, `[`, `]`, `"`, `\` or start with `$`
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::enums::RecordField;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Path from the root of a payload tree to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreePath {
    segments: Vec<PathSegment>,
}

/// A path string that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid tree path '{input}': {reason}")]
pub struct PathParseError {
    pub input: String,
    pub reason: String,
}

impl TreePath {
    /// The root path (`$`).
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a path rooted at a payload field, such as
    /// `response.header.Date`, into the field and the path below it.
    ///
    /// # Errors
    ///
    /// Returns `PathParseError` when `input` is not a valid path or does not
    /// start with `request` or `response`.
    pub fn parse_rooted(input: &str) -> Result<(RecordField, Self), PathParseError> {
        let path: Self = input.parse()?;
        let field = match path.segments.first() {
            Some(PathSegment::Key(root)) if root == "request" => RecordField::Request,
            Some(PathSegment::Key(root)) if root == "response" => RecordField::Response,
            _ => {
                return Err(PathParseError {
                    input: input.to_string(),
                    reason: "must start with 'request' or 'response'".to_string(),
                });
            }
        };
        Ok((field, path.segments[1..].to_vec().into()))
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Child path through a mapping key.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        self.child(PathSegment::Key(key.to_string()))
    }

    /// Child path through a sequence index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }
}

impl From<Vec<PathSegment>> for TreePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key.starts_with('$')
        || key.contains(['.', '[', ']', '"', '\\'])
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }

        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if needs_quoting(key) => {
                    f.write_str("[\"")?;
                    for ch in key.chars() {
                        if matches!(ch, '"' | '\\') {
                            f.write_str("\\")?;
                        }
                        write!(f, "{ch}")?;
                    }
                    f.write_str("\"]")?;
                }
                PathSegment::Key(key) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for TreePath {
    type Err = PathParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| PathParseError {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let rest = match input.strip_prefix('$') {
            Some(rest) => {
                if !(rest.is_empty() || rest.starts_with(['.', '['])) {
                    return Err(fail("'$' must be followed by '.', '[' or nothing"));
                }
                rest
            }
            None => input,
        };

        let mut segments = Vec::new();
        let mut chars = rest.chars().peekable();
        let mut first = true;

        while let Some(&next) = chars.peek() {
            match next {
                '[' => {
                    chars.next();
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        let mut key = String::new();
                        loop {
                            match chars.next() {
                                Some('\\') => match chars.next() {
                                    Some(escaped) => key.push(escaped),
                                    None => return Err(fail("dangling escape in quoted key")),
                                },
                                Some('"') => break,
                                Some(ch) => key.push(ch),
                                None => return Err(fail("unterminated quoted key")),
                            }
                        }
                        if chars.next() != Some(']') {
                            return Err(fail("expected ']' after quoted key"));
                        }
                        segments.push(PathSegment::Key(key));
                    } else {
                        let mut digits = String::new();
                        loop {
                            match chars.next() {
                                Some(']') => break,
                                Some(ch) => digits.push(ch),
                                None => return Err(fail("unterminated index")),
                            }
                        }
                        let index = digits
                            .parse::<usize>()
                            .map_err(|_| fail("index must be a non-negative integer"))?;
                        segments.push(PathSegment::Index(index));
                    }
                }
                '.' => {
                    chars.next();
                    let key = read_key(&mut chars).ok_or_else(|| fail("empty key segment"))?;
                    segments.push(PathSegment::Key(key));
                }
                ']' | '"' => {
                    return Err(fail(&format!("unexpected character '{next}'")));
                }
                _ if first => {
                    let key = read_key(&mut chars).ok_or_else(|| fail("empty key segment"))?;
                    segments.push(PathSegment::Key(key));
                }
                other => {
                    return Err(fail(&format!("unexpected character '{other}'")));
                }
            }
            first = false;
        }

        Ok(Self { segments })
    }
}

/// Consume a bare key up to the next delimiter.
fn read_key(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut key = String::new();
    while let Some(&ch) = chars.peek() {
        if matches!(ch, '.' | '[' | ']' | '"') {
            break;
        }
        key.push(ch);
        chars.next();
    }
    (!key.is_empty()).then_some(key)
}

impl Serialize for TreePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TreePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn rooted_paths_split_off_their_field() {
        let (field, rest) = TreePath::parse_rooted("response.body[0].id").unwrap();
        assert_eq!(field, RecordField::Response);
        assert_eq!(rest, TreePath::root().key("body").index(0).key("id"));

        let (field, rest) = TreePath::parse_rooted("request").unwrap();
        assert_eq!(field, RecordField::Request);
        assert_eq!(rest, TreePath::root());
    }

    #[rstest]
    #[case("kind")]
    #[case("body.id")]
    #[case("[0].request")]
    #[case("$")]
    fn rooted_paths_need_a_payload_field(#[case] input: &str) {
        let err = TreePath::parse_rooted(input).unwrap_err();
        assert_eq!(err.reason, "must start with 'request' or 'response'");
    }

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(TreePath::root().to_string(), "$");
    }

    #[test]
    fn nested_path_renders_keys_and_indices() {
        let path = TreePath::root().key("items").index(2).key("price");
        assert_eq!(path.to_string(), "items[2].price");
    }

    #[test]
    fn leading_index_renders_without_dot() {
        let path = TreePath::root().index(0).key("id");
        assert_eq!(path.to_string(), "[0].id");
    }

    #[test]
    fn awkward_keys_are_quoted() {
        let path = TreePath::root().key("headers").key("x.request-id");
        assert_eq!(path.to_string(), r#"headers["x.request-id"]"#);

        let path = TreePath::root().key(r#"say "hi""#);
        assert_eq!(path.to_string(), r#"["say \"hi\""]"#);
    }

    #[rstest]
    #[case("$")]
    #[case("status")]
    #[case("items[2].price")]
    #[case("[0].id")]
    #[case(r#"headers["x.request-id"].value"#)]
    #[case(r#"["$ref"]"#)]
    #[case(r#"["say \"hi\""]"#)]
    fn parse_inverts_display(#[case] text: &str) {
        let parsed: TreePath = text.parse().expect("path should parse");
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn parse_accepts_dollar_prefix() {
        let parsed: TreePath = "$.body.id".parse().unwrap();
        assert_eq!(parsed, TreePath::root().key("body").key("id"));
    }

    #[rstest]
    #[case("a..b")]
    #[case("a[x]")]
    #[case("a[1")]
    #[case(r#"a["open"#)]
    #[case("$abc")]
    #[case("a.")]
    fn parse_rejects_malformed(#[case] text: &str) {
        assert!(text.parse::<TreePath>().is_err(), "{text} should not parse");
    }

    #[test]
    fn serializes_as_string() {
        let path = TreePath::root().key("status");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"status\"");
        let back: TreePath = serde_json::from_str("\"items[1]\"").unwrap();
        assert_eq!(back, TreePath::root().key("items").index(1));
    }
}
