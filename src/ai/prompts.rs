//! Prompts for the skill parser.

/// Question appended to every project description.
pub const SKILL_QUESTION: &str = "What is the skill set required for completing this project?";

/// System prompt for the skill parser.
pub const SKILL_PARSER_SYSTEM_PROMPT: &str = r"You are a staffing assistant for a freelance marketplace.

Given a project description, list the skills a team needs to complete it.

Rules:
- One skill per line, each line starting with '- '
- Use short, conventional skill names (e.g. 'python', 'unity', 'ui design')
- No explanations, headings or numbering
";

/// Build the user message for a project description.
#[must_use]
pub fn format_skill_request(description: &str) -> String {
    format!("{description}\n\n{SKILL_QUESTION}")
}
