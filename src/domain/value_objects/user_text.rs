//! User Text Value Object
//!
//! Free-form human-readable text carried by manifests (issuer, annotation,
//! original file name). Kept as a newtype so manifest fields don't degrade
//! into bare strings throughout the model.

use std::fmt;

/// Human-readable manifest text (issuer, annotation, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UserText(String);

impl UserText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for UserText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(UserText::default().is_empty());
    }

    #[test]
    fn from_str_round_trips() {
        let text = UserText::from("Acme Pictures");
        assert_eq!(text.as_str(), "Acme Pictures");
        assert_eq!(text.to_string(), "Acme Pictures");
    }
}
