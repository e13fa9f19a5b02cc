//! Profile types.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered rating of how well a freelancer masters a skill.
pub type ProficiencyLevel = u32;

/// Reviews one company has left for a freelancer, keyed by skill name.
///
/// Skills keep document order; each list is append-only and kept in
/// submission order.
pub type SkillReviews = IndexMap<String, Vec<String>>;

/// A freelancer's identity, skills and review history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,

    /// Profession or job title.
    pub profession: String,

    /// Skill name to proficiency level, in document order.
    #[serde(default)]
    pub skills: IndexMap<String, ProficiencyLevel>,

    /// Company identifier to per-skill review lists.
    #[serde(default)]
    pub reviews: IndexMap<String, SkillReviews>,

    /// Fields this crate does not interpret, carried through load and save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Create a profile with no skills and no reviews.
    #[must_use]
    pub fn new(name: impl Into<String>, profession: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profession: profession.into(),
            skills: IndexMap::new(),
            reviews: IndexMap::new(),
            extra: Map::new(),
        }
    }

    /// Add or replace a skill, returning the profile for chaining.
    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>, level: ProficiencyLevel) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    /// Whether the profile lists the given skill.
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }

    /// Iterate over the profile's skill names.
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    /// Skills of this profile that also appear in `wanted`, in document order.
    #[must_use]
    pub fn relevant_skills<'a>(&'a self, wanted: &HashSet<String>) -> Vec<&'a str> {
        self.skill_names()
            .filter(|skill| wanted.contains(*skill))
            .collect()
    }

    /// Reviews left by `company`, if it has ever reviewed this freelancer.
    #[must_use]
    pub fn reviews_for(&self, company: &str) -> Option<&SkillReviews> {
        self.reviews.get(company)
    }

    /// Review list for `company` and `skill`, created empty if absent.
    pub fn review_list_mut(&mut self, company: &str, skill: &str) -> &mut Vec<String> {
        self.reviews
            .entry(company.to_string())
            .or_default()
            .entry(skill.to_string())
            .or_default()
    }

    /// Append a review under `company` and `skill`. Prior reviews are kept.
    pub fn append_review(&mut self, company: &str, skill: &str, review: impl Into<String>) {
        self.review_list_mut(company, skill).push(review.into());
    }
}
