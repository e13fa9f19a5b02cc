//! Freelancer profiles and the whole-document profile store.
//!
//! The store keeps profiles in the order they appear in the persisted
//! document. That order is the enumeration order used by the combination
//! search, so it is part of the store's contract.

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::{ProfileEntry, ProfileStore};
pub use types::{Profile, ProficiencyLevel, SkillReviews};
