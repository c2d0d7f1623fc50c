//! Keyword Matcher — role-specific ATS keywords checked against the resume text.
//!
//! Keywords come from the generation capability; matching is pure Rust:
//! case-insensitive, regex-escaped, with word boundaries at both ends.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{GenerationParams, TextGenerator};
use crate::review::prompts::KEYWORDS_PROMPT_TEMPLATE;

/// Keywords split into those found in the resume and those not found.
/// Both lists keep the order the keywords were produced in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.present.is_empty() && self.missing.is_empty()
    }

    /// Share of keywords present, 0 – 100. Zero when there are no keywords.
    pub fn coverage_percent(&self) -> u32 {
        let total = self.present.len() + self.missing.len();
        if total == 0 {
            return 0;
        }
        ((self.present.len() as f32 / total as f32) * 100.0).round() as u32
    }
}

/// Asks the generator for 10–15 keywords for `role`.
/// An empty role returns no keywords and makes no call.
pub async fn get_role_keywords(
    role: &str,
    generator: &dyn TextGenerator,
    max_tokens: u32,
) -> Result<Vec<String>, AppError> {
    let role = role.trim();
    if role.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = KEYWORDS_PROMPT_TEMPLATE.replace("{role}", role);
    let response = generator
        .generate(&prompt, &GenerationParams::bounded(max_tokens))
        .await
        .map_err(|e| AppError::Llm(format!("Keyword generation failed: {e}")))?;

    let keywords = parse_keywords(&response);
    info!(role = %role, count = keywords.len(), "Role keywords generated");
    Ok(keywords)
}

/// Comma-separated response → trimmed, non-empty, deduplicated keywords in order.
/// Deduplication is case-sensitive.
pub fn parse_keywords(response: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in response.split(',') {
        let token = token.trim();
        if token.is_empty() || keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
    }
    keywords
}

/// Partitions `keywords` by whether each occurs in `text`.
pub fn check_ats_keywords(text: &str, keywords: &[String]) -> MatchResult {
    let mut result = MatchResult::default();
    for keyword in keywords {
        if keyword_present(text, keyword) {
            result.present.push(keyword.clone());
        } else {
            result.missing.push(keyword.clone());
        }
    }
    debug!(
        present = result.present.len(),
        missing = result.missing.len(),
        "ATS keyword check complete"
    );
    result
}

/// Case-insensitive phrase search: no word character directly before or after
/// the keyword, any whitespace run between its words.
pub fn keyword_present(text: &str, keyword: &str) -> bool {
    match keyword_regex(keyword) {
        Some(re) => re.is_match(text),
        None => false,
    }
}

fn keyword_regex(keyword: &str) -> Option<Regex> {
    let words: Vec<String> = keyword.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", words.join(r"\s+"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    fn kws(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let result = check_ats_keywords("I use python daily", &kws(&["Python", "SQL"]));
        assert_eq!(result.present, kws(&["Python"]));
        assert_eq!(result.missing, kws(&["SQL"]));
    }

    #[test]
    fn test_upper_case_resume_matches() {
        assert!(keyword_present("PYTHON, RUST", "Python"));
    }

    #[test]
    fn test_word_boundary_rejects_longer_word() {
        assert!(!keyword_present("Writes pythonic code", "Python"));
        assert!(!keyword_present("MySQLite", "SQL"));
    }

    #[test]
    fn test_multi_word_phrase_must_be_contiguous() {
        assert!(keyword_present("Owned CI/CD and machine learning pipelines", "Machine Learning"));
        assert!(keyword_present("machine\nlearning", "machine learning"));
        assert!(!keyword_present("machine vision and learning", "machine learning"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(keyword_present("Expert in C++ and Go", "C++"));
        assert!(!keyword_present("Expert in C and Go", "C++"));
        assert!(keyword_present("Built on Node.js", "Node.js"));
        assert!(!keyword_present("Built on Nodexjs", "Node.js"));
    }

    #[test]
    fn test_empty_keyword_list_gives_empty_result() {
        let result = check_ats_keywords("anything", &[]);
        assert!(result.is_empty());
        assert_eq!(result.coverage_percent(), 0);
    }

    #[test]
    fn test_present_and_missing_preserve_order() {
        let keywords = kws(&["Docker", "AWS", "Kubernetes", "Terraform"]);
        let result = check_ats_keywords("Terraform on AWS, deployed with Docker", &keywords);
        assert_eq!(result.present, kws(&["Docker", "AWS", "Terraform"]));
        assert_eq!(result.missing, kws(&["Kubernetes"]));
        assert_eq!(result.coverage_percent(), 75);
    }

    #[test]
    fn test_parse_keywords_trims_drops_empty_and_dedups() {
        let parsed = parse_keywords(" Rust, SQL,, Docker ,Rust, rust ,");
        assert_eq!(parsed, kws(&["Rust", "SQL", "Docker", "rust"]));
    }

    #[tokio::test]
    async fn test_empty_role_skips_model() {
        let generator = ScriptedGenerator::new(vec![]);
        let keywords = get_role_keywords("  ", &generator, 60).await.unwrap();
        assert!(keywords.is_empty());
        assert_eq!(generator.calls(), 0);
        assert!(check_ats_keywords("text", &keywords).is_empty());
    }

    #[tokio::test]
    async fn test_role_keywords_prompt_and_parse() {
        let generator = ScriptedGenerator::new(vec![Ok("Python, SQL, Airflow")]);
        let keywords = get_role_keywords("Data Engineer", &generator, 60).await.unwrap();
        assert_eq!(keywords, kws(&["Python", "SQL", "Airflow"]));
        assert!(generator.prompts()[0].contains("for a Data Engineer role"));
        assert_eq!(generator.params()[0].max_tokens, 60);
    }

    #[tokio::test]
    async fn test_keyword_generation_failure_is_llm_error() {
        let generator = ScriptedGenerator::new(vec![Err("bad gateway")]);
        let err = get_role_keywords("Designer", &generator, 60).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
