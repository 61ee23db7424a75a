//! Header lookup by multi-substring match.

use std::fmt;

/// Substrings that must all occur in a header for it to match.
///
/// Matching is case-sensitive substring containment, AND-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPattern {
    parts: Vec<String>,
}

impl HeaderPattern {
    pub fn new<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, header: &str) -> bool {
        self.parts.iter().all(|p| header.contains(p.as_str()))
    }
}

impl fmt::Display for HeaderPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.parts.join(" & "))
    }
}

/// Index of the first header (in source order) matching `pattern`.
///
/// Non-text headers never match.
pub fn find_header<'a>(headers: impl IntoIterator<Item = Option<&'a str>>, pattern: &HeaderPattern) -> Option<usize> {
    headers
        .into_iter()
        .position(|h| h.is_some_and(|h| pattern.matches(h)))
}
