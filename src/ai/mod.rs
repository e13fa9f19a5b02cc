//! Language-model collaborators.
//!
//! The model turns a free-text project description into a hyphen-bulleted
//! list of skills. Everything downstream only sees the parsed list.

mod client;
mod parser;
mod prompts;

pub use client::*;
pub use parser::{parse_skill_list, LlmSkillParser, ParsedSkills, SkillParser};
pub use prompts::{format_skill_request, SKILL_PARSER_SYSTEM_PROMPT, SKILL_QUESTION};
