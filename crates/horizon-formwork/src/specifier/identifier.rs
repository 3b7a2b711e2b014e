//! Megawidget identifiers.
//!
//! An identifier is the unique key addressing one megawidget and its state.
//! A colon-joined identifier such as `"range:start:end"` is **composite**: it
//! partitions the megawidget's state into one value per part, each part
//! addressable on its own through the stateful protocol. Kinds that are
//! inherently single-valued reject composite identifiers at construction.

use std::fmt;

use horizon_formwork_core::{ValueError, convert::ConvertResult};

/// The reserved separator joining the parts of a composite identifier.
pub const SEPARATOR: char = ':';

/// A validated megawidget identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    raw: String,
    parts: Vec<String>,
}

impl Identifier {
    /// Parse and validate a raw identifier string.
    ///
    /// Fails on an empty string, an empty part (`"a::b"`), or a repeated
    /// part (`"a:b:a"`).
    pub fn parse(raw: &str) -> ConvertResult<Self> {
        if raw.is_empty() {
            return Err(ValueError::new(raw, "must be a non-empty identifier"));
        }
        let parts: Vec<String> = raw.split(SEPARATOR).map(str::to_string).collect();
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(ValueError::new(
                    raw,
                    "composite identifier must not contain empty parts",
                ));
            }
            if parts[..i].contains(part) {
                return Err(ValueError::new(
                    raw,
                    format!("composite identifier repeats part \"{part}\""),
                ));
            }
        }
        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    /// The full identifier string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The colon-separated parts, in order. A scalar identifier has exactly
    /// one part (itself).
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns `true` if the identifier has more than one part.
    pub fn is_composite(&self) -> bool {
        self.parts.len() > 1
    }

    /// Returns `true` if `state_identifier` addresses state owned by this
    /// identifier (i.e. it is one of the parts).
    pub fn owns(&self, state_identifier: &str) -> bool {
        self.parts.iter().any(|part| part == state_identifier)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_identifier() {
        let id = Identifier::parse("severity").unwrap();
        assert_eq!(id.as_str(), "severity");
        assert_eq!(id.parts(), ["severity"]);
        assert!(!id.is_composite());
        assert!(id.owns("severity"));
        assert!(!id.owns("other"));
    }

    #[test]
    fn test_composite_identifier() {
        let id = Identifier::parse("range:start:end").unwrap();
        assert!(id.is_composite());
        assert_eq!(id.parts(), ["range", "start", "end"]);
        assert!(id.owns("start"));
        assert!(!id.owns("range:start"));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert!(Identifier::parse("").is_err());
    }

    #[test]
    fn test_empty_part_rejected() {
        assert!(Identifier::parse("a::b").is_err());
        assert!(Identifier::parse(":a").is_err());
        assert!(Identifier::parse("a:").is_err());
    }

    #[test]
    fn test_repeated_part_rejected() {
        let err = Identifier::parse("a:b:a").unwrap_err();
        assert!(err.constraint.contains("repeats part \"a\""));
    }
}
