//! Required-skill normalization.

use std::collections::HashSet;

/// The skills a project needs, trimmed and de-duplicated.
///
/// First occurrence wins, so the order of the parsed list is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSkills {
    names: Vec<String>,
}

impl RequiredSkills {
    /// Normalize a raw skill list: trim whitespace, drop blanks and duplicates.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = raw
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();
        Self { names }
    }

    /// Skill names in first-seen order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a skill in [`names`](Self::names).
    #[must_use]
    pub fn position(&self, skill: &str) -> Option<usize> {
        self.names.iter().position(|name| name == skill)
    }

    #[must_use]
    pub fn contains(&self, skill: &str) -> bool {
        self.position(skill).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RequiredSkills {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
