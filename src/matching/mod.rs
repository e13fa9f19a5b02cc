//! Skill-set covering search over the profile store.
//!
//! Given the skills a project needs, [`find_combinations`] enumerates every
//! group of freelancers whose combined skills cover the requirement, and
//! [`format_combinations`] renders the groups as a plain-text report.

mod format;
mod search;
mod skills;

pub use format::{format_combinations, format_profile, NO_REVIEWS};
pub use search::{find_combinations, Combination, CombinationSearch, SearchOutcome};
pub use skills::RequiredSkills;
