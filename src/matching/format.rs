//! Plain-text rendering of matched combinations.

use std::fmt::Write;

use crate::profile::{Profile, ProfileStore};

use super::search::Combination;

/// Marker rendered when the requesting company has no reviews for a profile.
pub const NO_REVIEWS: &str = "none";

/// Render combinations as a report, one numbered block per combination.
///
/// Reviews are shown only for `company`. Blocks are separated by a blank
/// line; zero combinations render as an empty string.
#[must_use]
pub fn format_combinations(
    store: &ProfileStore,
    combinations: &[Combination],
    company: &str,
) -> String {
    combinations
        .iter()
        .enumerate()
        .map(|(i, combination)| {
            let mut block = format!("Combination ({}):\n", i + 1);
            for id in combination.ids() {
                match store.get(id) {
                    Some(profile) => block.push_str(&format_profile(id, profile, company)),
                    None => {
                        let _ = writeln!(block, "- ID: {id} (profile not found)");
                    }
                }
                block.push('\n');
            }
            block.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one profile: identity line, skills, and `company`'s reviews.
#[must_use]
pub fn format_profile(id: &str, profile: &Profile, company: &str) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "- ID: {id}, Name: {}, Profession: {}",
        profile.name, profile.profession
    );

    text.push_str("  Skills:\n");
    for (skill, level) in &profile.skills {
        let _ = writeln!(text, "    - {skill}: Level {level}");
    }

    match profile.reviews_for(company).filter(|r| !r.is_empty()) {
        None => {
            let _ = writeln!(text, "  Reviews: {NO_REVIEWS}");
        }
        Some(reviews) => {
            text.push_str("  Reviews:\n");
            for (skill, entries) in reviews {
                let _ = writeln!(text, "    - {skill}:");
                for entry in entries {
                    let _ = writeln!(text, "      - {entry}");
                }
            }
        }
    }
    text
}
