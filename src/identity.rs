//! Class identities.
//!
//! The identity layer is the prerequisite for everything in classforge.
//! Every base, candidate, and override is referred to by a [`ClassId`],
//! which lets callers set up overrides before the named types exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The name of a registered base or candidate class.
///
/// A `ClassId` is an opaque, immutable token. The registry never validates
/// it structurally; mapping an identity to an instantiable type is the
/// catalog's job.
///
/// # Examples
///
/// ```
/// use classforge::ClassId;
///
/// let id = ClassId::new("Widget");
/// assert_eq!(id.as_str(), "Widget");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Creates an identity from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identity, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClassId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<ClassId> for String {
    fn from(id: ClassId) -> Self {
        id.0
    }
}

impl PartialEq<str> for ClassId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ClassId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_creation() {
        let id = ClassId::new("Base");
        assert_eq!(id.as_str(), "Base");
        assert_eq!(id, "Base");
    }

    #[test]
    fn test_class_id_from_conversions() {
        let a = ClassId::from("Widget");
        let b = ClassId::from("Widget".to_string());
        assert_eq!(a, b);

        let s: String = a.into();
        assert_eq!(s, "Widget");
    }

    #[test]
    fn test_class_id_display() {
        let id = ClassId::new("C1");
        assert_eq!(format!("{id}"), "C1");
    }

    #[test]
    fn test_class_id_ordering() {
        let mut ids = vec![ClassId::new("C2"), ClassId::new("Base"), ClassId::new("C1")];
        ids.sort();
        assert_eq!(ids, vec![ClassId::new("Base"), ClassId::new("C1"), ClassId::new("C2")]);
    }

    #[test]
    fn test_class_id_serialization() {
        let id = ClassId::new("Base");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Base\"");
        let back: ClassId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
