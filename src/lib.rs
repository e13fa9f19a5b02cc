//! Talent Match - staff projects from complementary freelancers.
//!
//! A project description is reduced to the skills it needs, and every group
//! of freelancer profiles whose combined skills cover that requirement is
//! reported together with the requesting company's past reviews.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`profile`] | Profiles and the whole-document profile store |
//! | [`matching`] | Covering-combination search and report rendering |
//! | [`review`] | Filing reviews against transactions, optional notarization |
//! | [`ai`] | LLM-backed skill parser |
//! | [`pipeline`] | Description to report |
//! | [`config`] | TOML configuration |

pub mod ai;
pub mod config;
pub mod display;
pub mod matching;
pub mod pipeline;
pub mod profile;
pub mod review;
