//! Core type definitions with validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Lexical pattern of a tag: `#`, a letter, then one or more letters, digits or hyphens.
///
/// Unanchored: a string is a valid tag argument if it contains such a token.
pub const TAG_PATTERN: &str = r"#[a-zA-Z][a-zA-Z0-9-]+";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TAG_PATTERN).unwrap());

/// Validation errors for caller-supplied parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string does not follow the tag lexical pattern.
    #[error("not a valid tag: {tag:?}")]
    InvalidTag { tag: String },
}

/// A validated tag such as `#project1`.
///
/// Tags are not extracted from descriptions; they are only used as needles
/// when aggregating, so a `Tag` is only ever built from user input. The whole
/// string is the needle, including anything around the `#token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Creates a new tag after validation.
    pub fn new(tag: impl Into<String>) -> Result<Self, ValidationError> {
        let tag = tag.into();
        if !TAG_RE.is_match(&tag) {
            return Err(ValidationError::InvalidTag { tag });
        }
        Ok(Self(tag))
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `description` contains this tag anywhere.
    ///
    /// Plain substring containment: `#project1` also matches `#project10`.
    pub fn is_in(&self, description: &str) -> bool {
        description.contains(self.0.as_str())
    }
}

impl std::str::FromStr for Tag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_tags() {
        for tag in ["#project1", "#ab", "#work-item-2", "#Z9"] {
            assert!(Tag::new(tag).is_ok(), "{tag} should be valid");
        }
    }

    #[test]
    fn accepts_strings_containing_a_tag() {
        for tag in ["x #ab", "#ab ", "meeting #ab today"] {
            let parsed: Tag = tag.parse().unwrap();
            assert_eq!(parsed.as_str(), tag, "the whole string is kept");
        }
    }

    #[test]
    fn rejects_malformed_tags() {
        for tag in ["", "#", "#a", "project1", "#1project", "#-x", "# space"] {
            assert_eq!(
                Tag::new(tag),
                Err(ValidationError::InvalidTag {
                    tag: tag.to_string()
                }),
                "{tag:?} should be rejected"
            );
        }
    }

    #[test]
    fn containment_is_not_boundary_aware() {
        let tag = Tag::new("#project1").unwrap();
        assert!(tag.is_in("Work on #project1"));
        assert!(tag.is_in("Work on #project10"));
        assert!(tag.is_in("Work on #project1x and more"));
        assert!(!tag.is_in("Work on #project2"));
        assert!(!tag.is_in("Work on project1"));
    }
}
