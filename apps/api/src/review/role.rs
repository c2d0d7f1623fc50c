//! Role inference — guesses the target job title from the top of the resume.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{GenerationParams, TextGenerator};
use crate::review::prompts::ROLE_INFERENCE_PROMPT_TEMPLATE;

/// Only the leading part of the resume is sent; titles and summaries live there.
pub const ROLE_INFERENCE_CHARS: usize = 1000;

/// Infers the most likely role with deterministic decoding.
/// A blank resume yields an empty role without calling the model.
pub async fn infer_role(
    resume_text: &str,
    generator: &dyn TextGenerator,
    max_tokens: u32,
) -> Result<String, AppError> {
    let head = leading_chars(resume_text.trim(), ROLE_INFERENCE_CHARS);
    if head.is_empty() {
        return Ok(String::new());
    }

    let prompt = ROLE_INFERENCE_PROMPT_TEMPLATE.replace("{resume_head}", head);
    let answer = generator
        .generate(&prompt, &GenerationParams::deterministic(max_tokens))
        .await
        .map_err(|e| AppError::Llm(format!("Role inference failed: {e}")))?;

    let role = clean_role(&answer);
    info!(role = %role, "Inferred target role");
    Ok(role)
}

/// First `max` characters, cut on a char boundary.
fn leading_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First non-empty line, without wrapping quotes, label or trailing period.
fn clean_role(answer: &str) -> String {
    let line = answer
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let line = line
        .strip_prefix("Job title:")
        .or_else(|| line.strip_prefix("Job Title:"))
        .unwrap_or(line)
        .trim();
    line.trim_matches(|c| c == '"' || c == '\'' || c == '*')
        .trim_end_matches('.')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    #[tokio::test]
    async fn test_infer_role_uses_deterministic_decoding() {
        let generator = ScriptedGenerator::new(vec![Ok("Data Engineer\n")]);
        let role = infer_role("SUMMARY\nBuilt pipelines in Spark.", &generator, 20)
            .await
            .unwrap();
        assert_eq!(role, "Data Engineer");
        assert_eq!(generator.params()[0], GenerationParams::deterministic(20));
    }

    #[tokio::test]
    async fn test_blank_resume_skips_model() {
        let generator = ScriptedGenerator::new(vec![]);
        let role = infer_role("   \n", &generator, 20).await.unwrap();
        assert!(role.is_empty());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_only_leading_text_is_sent() {
        let generator = ScriptedGenerator::new(vec![Ok("Writer")]);
        let long = format!("{}TAIL_MARKER", "a".repeat(ROLE_INFERENCE_CHARS));
        infer_role(&long, &generator, 20).await.unwrap();
        assert!(!generator.prompts()[0].contains("TAIL_MARKER"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_llm_error() {
        let generator = ScriptedGenerator::new(vec![Err("503")]);
        let err = infer_role("Engineer", &generator, 20).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_clean_role_strips_decoration() {
        assert_eq!(clean_role("\n\"Backend Engineer.\"\nbecause..."), "Backend Engineer");
        assert_eq!(clean_role("Job title: **QA Analyst**"), "QA Analyst");
    }

    #[test]
    fn test_leading_chars_respects_char_boundaries() {
        assert_eq!(leading_chars("héllo", 2), "hé");
        assert_eq!(leading_chars("hi", 10), "hi");
    }
}
