//! Project description to skill list.

use async_trait::async_trait;

use super::client::{AiError, AiProvider};
use super::prompts::{format_skill_request, SKILL_PARSER_SYSTEM_PROMPT};

/// Model reply together with the skills extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSkills {
    /// Reply text as returned by the model.
    pub raw: String,
    /// Trimmed skill names, in reply order.
    pub skills: Vec<String>,
}

/// Turns a project description into the skills it needs.
#[async_trait]
pub trait SkillParser: Send + Sync {
    async fn parse(&self, description: &str) -> Result<ParsedSkills, AiError>;
}

/// Split a hyphen-bulleted reply into skill names.
///
/// Text before the first hyphen is discarded, every entry is trimmed and
/// blank entries are dropped. The format is not otherwise validated.
#[must_use]
pub fn parse_skill_list(text: &str) -> Vec<String> {
    text.split('-')
        .skip(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// [`SkillParser`] backed by an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmSkillParser<P> {
    provider: P,
}

impl<P: AiProvider> LlmSkillParser<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: AiProvider> SkillParser for LlmSkillParser<P> {
    async fn parse(&self, description: &str) -> Result<ParsedSkills, AiError> {
        let raw = self
            .provider
            .generate(SKILL_PARSER_SYSTEM_PROMPT, &format_skill_request(description))
            .await?;
        let skills = parse_skill_list(&raw);
        tracing::debug!(skills = ?skills, "Parsed skills from model reply");
        Ok(ParsedSkills { raw, skills })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl AiProvider for CannedProvider {
        async fn generate(&self, _system: &str, user: &str) -> Result<String, AiError> {
            assert!(user.ends_with("What is the skill set required for completing this project?"));
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_parse_bulleted_list() {
        let reply = "Skills:\n- Unity\n- C#\n-  3D modeling  \n";
        assert_eq!(parse_skill_list(reply), vec!["Unity", "C#", "3D modeling"]);
    }

    #[test]
    fn test_parse_drops_preamble_and_blanks() {
        assert_eq!(parse_skill_list("- python --go"), vec!["python", "go"]);
        assert!(parse_skill_list("no bullets here").is_empty());
    }

    #[tokio::test]
    async fn test_llm_parser_uses_provider_reply() {
        let parser = LlmSkillParser::new(CannedProvider("\n- solidity\n- react\n"));
        let parsed = parser.parse("Project Description: NFT gallery").await.unwrap();
        assert_eq!(parsed.skills, vec!["solidity", "react"]);
        assert_eq!(parsed.raw, "\n- solidity\n- react\n");
    }
}
