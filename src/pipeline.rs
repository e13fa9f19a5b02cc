//! Description-to-report matching pipeline.
//!
//! ```text
//! description ──▶ SkillParser ──▶ RequiredSkills ──▶ CombinationSearch ──▶ report
//! ```

use crate::ai::{AiError, SkillParser};
use crate::matching::{format_combinations, CombinationSearch, RequiredSkills, SearchOutcome};
use crate::profile::ProfileStore;

/// Everything a match request produces.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Skill text as produced upstream (model reply, or the joined list).
    pub skills_text: String,
    /// Normalized skills the search ran against.
    pub required: RequiredSkills,
    pub outcome: SearchOutcome,
    /// Rendered combinations.
    pub report: String,
}

/// Matches projects against one profile store on behalf of one company.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    store: &'a ProfileStore,
    company: &'a str,
    limit: Option<usize>,
}

impl<'a> Matcher<'a> {
    #[must_use]
    pub fn new(store: &'a ProfileStore, company: &'a str) -> Self {
        Self {
            store,
            company,
            limit: None,
        }
    }

    /// Cap the number of combinations per request.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Match an explicit skill list.
    #[must_use]
    pub fn match_skills<S: AsRef<str>>(&self, skills: &[S]) -> MatchReport {
        let skills_text = skills
            .iter()
            .map(|s| format!("- {}", s.as_ref().trim()))
            .collect::<Vec<_>>()
            .join("\n");
        self.run(skills_text, RequiredSkills::new(skills))
    }

    /// Parse a project description into skills, then match them.
    ///
    /// # Errors
    ///
    /// Returns an error if the skill parser fails.
    pub async fn match_description(
        &self,
        parser: &dyn SkillParser,
        description: &str,
    ) -> Result<MatchReport, AiError> {
        let parsed = parser.parse(description).await?;
        let required = RequiredSkills::new(&parsed.skills);
        Ok(self.run(parsed.raw, required))
    }

    fn run(&self, skills_text: String, required: RequiredSkills) -> MatchReport {
        let outcome = CombinationSearch::new(self.store, &required)
            .limit(self.limit)
            .run();
        let report = format_combinations(self.store, &outcome.combinations, self.company);
        MatchReport {
            skills_text,
            required,
            outcome,
            report,
        }
    }
}
