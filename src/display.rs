//! Colored CLI display utilities.
//!
//! Reports themselves are plain text (see [`crate::matching::format_combinations`]);
//! this module only adds the colored status lines around them.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Truncate a string to at most `max_len` characters, adding an ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// One-line summary of a skill list.
#[must_use]
pub fn format_skill_summary(skills: &[String]) -> String {
    if skills.is_empty() {
        "(none)".to_string()
    } else {
        skills.join(", ")
    }
}

/// Non-blank lines of the skill text, trimmed.
#[must_use]
pub fn skill_text_lines(skills_text: &str) -> Vec<&str> {
    skills_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Print the skill text as produced upstream, then the skills searched.
pub fn print_skills(skills_text: &str, required: &[String]) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[SKILLS]".blue().bold(),
        format_skill_summary(required).cyan()
    );
    for line in skill_text_lines(skills_text) {
        println!("  {}", line.dimmed());
    }
    let _ = io::stdout().flush();
}

/// Print a match report with a count header.
pub fn print_report(report: &str, combinations: usize, truncated: bool) {
    let header = if truncated {
        format!("{combinations} combinations (limit reached)")
    } else {
        format!("{combinations} combinations")
    };
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[MATCH]".green().bold(),
        header
    );
    if !report.is_empty() {
        println!("\n{report}");
    }
    let _ = io::stdout().flush();
}

/// Print one line of the review form.
pub fn print_review_prompt(index: usize, name: &str, freelancer_id: &str) {
    println!(
        "{} Review for {} ({})",
        format!("[{}]", index + 1).magenta().bold(),
        name,
        freelancer_id.dimmed()
    );
}

/// Print a submission confirmation.
pub fn print_confirmation(message: &str) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[REVIEW]".green().bold(),
        message
    );
    let _ = io::stdout().flush();
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), truncate(message, 200));
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
