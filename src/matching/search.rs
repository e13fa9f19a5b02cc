//! Depth-first backtracking search for covering combinations.
//!
//! Profiles are visited in store order. A path stops growing as soon as the
//! chosen profiles cover every required skill, and a profile that offers
//! none of the required skills is never added. Results are therefore not
//! minimal: the same skills may be covered by many different groups.
//!
//! The search is exponential in the number of useful profiles. Use
//! [`CombinationSearch::max_combinations`] to bound it.

use serde::Serialize;

use crate::profile::ProfileStore;

use super::skills::RequiredSkills;

/// Profile identifiers proposed together, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Combination {
    ids: Vec<String>,
}

impl Combination {
    /// Profile identifiers in store order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<String>> for Combination {
    fn from(ids: Vec<String>) -> Self {
        Self { ids }
    }
}

/// Result of a [`CombinationSearch`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Covering combinations in discovery order.
    pub combinations: Vec<Combination>,
    /// True when the search stopped early at the configured limit.
    pub truncated: bool,
}

/// Find every combination of profiles covering `required`.
///
/// Unbounded; see [`CombinationSearch`] for a capped variant. An empty
/// requirement is covered by the empty combination, so the result is then
/// a single empty combination.
#[must_use]
pub fn find_combinations(store: &ProfileStore, required: &RequiredSkills) -> Vec<Combination> {
    CombinationSearch::new(store, required).run().combinations
}

/// Configurable covering-combination search.
#[derive(Debug, Clone)]
pub struct CombinationSearch<'a> {
    store: &'a ProfileStore,
    required: &'a RequiredSkills,
    limit: Option<usize>,
}

impl<'a> CombinationSearch<'a> {
    #[must_use]
    pub fn new(store: &'a ProfileStore, required: &'a RequiredSkills) -> Self {
        Self {
            store,
            required,
            limit: None,
        }
    }

    /// Stop after `limit` combinations have been found.
    #[must_use]
    pub fn max_combinations(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Like [`max_combinations`](Self::max_combinations), but `None` removes the cap.
    #[must_use]
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Run the search.
    #[must_use]
    pub fn run(&self) -> SearchOutcome {
        // For each profile, the positions of the required skills it offers.
        let offers: Vec<Vec<usize>> = self
            .store
            .entries()
            .iter()
            .map(|entry| {
                entry
                    .profile
                    .skill_names()
                    .filter_map(|skill| self.required.position(skill))
                    .collect()
            })
            .collect();

        tracing::debug!(
            profiles = self.store.len(),
            useful = offers.iter().filter(|o| !o.is_empty()).count(),
            required = ?self.required.names(),
            limit = ?self.limit,
            "Starting combination search"
        );

        let mut walker = Walker {
            store: self.store,
            offers: &offers,
            coverage: Coverage::new(self.required.len()),
            chosen: Vec::new(),
            found: Vec::new(),
            limit: self.limit,
            truncated: false,
        };
        walker.backtrack(0);

        if walker.truncated {
            tracing::warn!(
                limit = ?self.limit,
                "Combination search stopped at limit; results are incomplete"
            );
        }
        tracing::debug!(found = walker.found.len(), "Combination search finished");

        SearchOutcome {
            combinations: walker.found,
            truncated: walker.truncated,
        }
    }
}

/// How many chosen profiles offer each required skill.
struct Coverage {
    counts: Vec<usize>,
    missing: usize,
}

impl Coverage {
    fn new(required: usize) -> Self {
        Self {
            counts: vec![0; required],
            missing: required,
        }
    }

    fn is_complete(&self) -> bool {
        self.missing == 0
    }

    fn add(&mut self, offered: &[usize]) {
        for &skill in offered {
            if self.counts[skill] == 0 {
                self.missing -= 1;
            }
            self.counts[skill] += 1;
        }
    }

    fn remove(&mut self, offered: &[usize]) {
        for &skill in offered {
            self.counts[skill] -= 1;
            if self.counts[skill] == 0 {
                self.missing += 1;
            }
        }
    }
}

struct Walker<'s> {
    store: &'s ProfileStore,
    offers: &'s [Vec<usize>],
    coverage: Coverage,
    chosen: Vec<usize>,
    found: Vec<Combination>,
    limit: Option<usize>,
    truncated: bool,
}

impl Walker<'_> {
    fn backtrack(&mut self, start: usize) {
        if self.coverage.is_complete() {
            self.record();
            return;
        }

        let offers = self.offers;
        for (pos, offered) in offers.iter().enumerate().skip(start) {
            if self.truncated {
                return;
            }
            if offered.is_empty() {
                continue;
            }

            self.coverage.add(offered);
            self.chosen.push(pos);

            self.backtrack(pos + 1);

            self.chosen.pop();
            self.coverage.remove(offered);
        }
    }

    fn record(&mut self) {
        if self.limit.is_some_and(|limit| self.found.len() >= limit) {
            self.truncated = true;
            return;
        }

        let ids = self
            .chosen
            .iter()
            .filter_map(|&pos| self.store.entry_at(pos))
            .map(|entry| entry.id.clone())
            .collect::<Vec<_>>();
        self.found.push(Combination::from(ids));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn store(profiles: &[(&str, &[(&str, u32)])]) -> ProfileStore {
        profiles
            .iter()
            .map(|(id, skills)| {
                let profile = skills
                    .iter()
                    .fold(Profile::new(*id, "Freelancer"), |p, (skill, level)| {
                        p.with_skill(*skill, *level)
                    });
                ((*id).to_string(), profile)
            })
            .collect()
    }

    fn ids(combinations: &[Combination]) -> Vec<Vec<&str>> {
        combinations
            .iter()
            .map(|c| c.ids().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_two_complementary_profiles() {
        let store = store(&[("f1", &[("python", 3)]), ("f2", &[("go", 2)])]);
        let required = RequiredSkills::new(["python", "go"]);

        let result = find_combinations(&store, &required);
        assert_eq!(ids(&result), vec![vec!["f1", "f2"]]);
    }

    #[test]
    fn test_single_profile_covers() {
        let store = store(&[("f1", &[("python", 3), ("go", 2)])]);
        let required = RequiredSkills::new(["python"]);

        let result = find_combinations(&store, &required);
        assert_eq!(ids(&result), vec![vec!["f1"]]);
    }

    #[test]
    fn test_unknown_skill_yields_nothing() {
        let store = store(&[("f1", &[("python", 3)]), ("f2", &[("go", 2)])]);
        let required = RequiredSkills::new(["rust"]);

        assert!(find_combinations(&store, &required).is_empty());
    }

    #[test]
    fn test_empty_requirement_yields_empty_combination() {
        let store = store(&[("f1", &[("python", 3)])]);
        let required = RequiredSkills::new(Vec::<&str>::new());

        let result = find_combinations(&store, &required);
        assert_eq!(result.len(), 1);
        assert!(result[0].is_empty());
    }

    #[test]
    fn test_empty_store_yields_nothing() {
        let required = RequiredSkills::new(["python"]);
        assert!(find_combinations(&ProfileStore::new(), &required).is_empty());
    }

    #[test]
    fn test_over_generates_non_minimal_groups() {
        // f1 covers alone, but f2+f3 also cover, and f1 is not extended once covered.
        let store = store(&[
            ("f1", &[("python", 3), ("go", 2)]),
            ("f2", &[("python", 1)]),
            ("f3", &[("go", 4)]),
        ]);
        let required = RequiredSkills::new(["python", "go"]);

        let result = find_combinations(&store, &required);
        assert_eq!(ids(&result), vec![vec!["f1"], vec!["f2", "f3"]]);
    }

    #[test]
    fn test_redundant_member_is_kept() {
        // f1 and f2 both offer python; f1+f2 does not cover, f1+f2+f3 does.
        let store = store(&[
            ("f1", &[("python", 3)]),
            ("f2", &[("python", 1)]),
            ("f3", &[("go", 4)]),
        ]);
        let required = RequiredSkills::new(["python", "go"]);

        let result = find_combinations(&store, &required);
        assert_eq!(
            ids(&result),
            vec![vec!["f1", "f2", "f3"], vec!["f1", "f3"], vec!["f2", "f3"]]
        );
    }

    #[test]
    fn test_useless_profile_never_included() {
        let store = store(&[
            ("f1", &[("python", 3)]),
            ("painter", &[("watercolor", 5)]),
            ("f2", &[("go", 2)]),
        ]);
        let required = RequiredSkills::new(["python", "go"]);

        let result = find_combinations(&store, &required);
        assert_eq!(ids(&result), vec![vec!["f1", "f2"]]);
        assert!(result.iter().all(|c| !c.contains("painter")));
    }

    #[test]
    fn test_limit_truncates() {
        let store = store(&[
            ("a", &[("python", 1)]),
            ("b", &[("python", 2)]),
            ("c", &[("python", 3)]),
        ]);
        let required = RequiredSkills::new(["python"]);

        let outcome = CombinationSearch::new(&store, &required)
            .max_combinations(2)
            .run();
        assert_eq!(ids(&outcome.combinations), vec![vec!["a"], vec!["b"]]);
        assert!(outcome.truncated);

        let full = CombinationSearch::new(&store, &required).limit(None).run();
        assert_eq!(full.combinations.len(), 3);
        assert!(!full.truncated);
    }

    #[test]
    fn test_limit_not_reached_is_not_truncated() {
        let store = store(&[("a", &[("python", 1)])]);
        let required = RequiredSkills::new(["python"]);

        let outcome = CombinationSearch::new(&store, &required)
            .max_combinations(5)
            .run();
        assert_eq!(outcome.combinations.len(), 1);
        assert!(!outcome.truncated);
    }
}
