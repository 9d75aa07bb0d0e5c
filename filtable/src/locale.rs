//! Locale-aware case folding for substring matching.

/// Case-folding locale used when matching cell text against filter values.
///
/// Both sides of a substring comparison are folded before the containment
/// check, so matching is case-insensitive. Only a generic ("en"-style)
/// fold is implemented; the tag is kept so configuration can record the
/// host's intent, but tailored per-locale collation is out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Create a locale from a BCP 47-style tag, e.g. `"en"` or `"en-US"`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// The configured locale tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Case-fold a string for matching.
    pub fn fold(&self, s: &str) -> String {
        s.to_lowercase()
    }

    /// Case-insensitive substring containment.
    pub fn contains(&self, haystack: &str, needle: &str) -> bool {
        self.fold(haystack).contains(&self.fold(needle))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}
