//! Feedback/Rewrite Engine — per-section prompts against the generation capability.
//!
//! Sections are processed one at a time, chunks one at a time. A failed call is
//! recorded as `ChunkOutcome::Failed` and never aborts the section; rendering
//! decides how failures read.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::llm_client::prompts::QUALITY_CRITERIA;
use crate::llm_client::{GenerationParams, TextGenerator};
use crate::review::chunker::chunk_words;
use crate::review::prompts::{REVIEW_PROMPT_TEMPLATE, REWRITE_PROMPT_TEMPLATE};
use crate::review::sections::{SectionMap, SectionName};

const REWRITE_TEMPERATURE: f32 = 0.7;
const REWRITE_TOP_P: f32 = 0.9;

/// How each section is sent to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackMode {
    /// Whole section in one call, feedback as output.
    #[default]
    Review,
    /// Section split into word chunks, rewritten text as output.
    Rewrite,
}

impl std::str::FromStr for FeedbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "review" => Ok(FeedbackMode::Review),
            "rewrite" => Ok(FeedbackMode::Rewrite),
            other => Err(format!("unknown mode '{other}', expected 'review' or 'rewrite'")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeedbackSettings {
    pub mode: FeedbackMode,
    pub max_chunk_words: usize,
    pub max_tokens: u32,
}

/// Result of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum ChunkOutcome {
    Generated(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionFeedback {
    /// Blank section; no model call was made.
    Missing,
    Generated(Vec<ChunkOutcome>),
}

impl SectionFeedback {
    pub fn is_missing(&self) -> bool {
        matches!(self, SectionFeedback::Missing)
    }

    pub fn failed_chunks(&self) -> usize {
        match self {
            SectionFeedback::Missing => 0,
            SectionFeedback::Generated(chunks) => chunks
                .iter()
                .filter(|c| matches!(c, ChunkOutcome::Failed(_)))
                .count(),
        }
    }

    /// Display text: the fixed missing message, or chunk outputs in order
    /// separated by a blank line, with failures shown inline.
    pub fn render(&self, section: SectionName) -> String {
        match self {
            SectionFeedback::Missing => format!("{section} is missing or empty."),
            SectionFeedback::Generated(chunks) => chunks
                .iter()
                .map(|chunk| match chunk {
                    ChunkOutcome::Generated(text) => text.trim().to_string(),
                    ChunkOutcome::Failed(reason) => format!("Error analyzing chunk: {reason}"),
                })
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n")
                .trim()
                .to_string(),
        }
    }
}

/// Section name → feedback, same order as the `SectionMap` it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackMap {
    entries: Vec<(SectionName, SectionFeedback)>,
}

impl FeedbackMap {
    pub fn get(&self, name: SectionName) -> Option<&SectionFeedback> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, fb)| fb)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionName, &SectionFeedback)> {
        self.entries.iter().map(|(n, fb)| (*n, fb))
    }

    /// Rendered `(heading, text)` pairs in section order.
    pub fn rendered(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, fb)| (name.to_string(), fb.render(name)))
            .collect()
    }
}

/// Runs every section of `sections` through the generator.
pub async fn generate_feedback(
    sections: &SectionMap,
    generator: &dyn TextGenerator,
    settings: &FeedbackSettings,
) -> FeedbackMap {
    let mut entries = Vec::with_capacity(sections.len());

    for (name, text) in sections.iter() {
        let feedback = analyze_section(name, text, generator, settings).await;
        info!(
            section = %name,
            missing = feedback.is_missing(),
            failed_chunks = feedback.failed_chunks(),
            "Section analyzed"
        );
        entries.push((name, feedback));
    }

    FeedbackMap { entries }
}

/// Feedback for one section. Blank text short-circuits without a model call.
pub async fn analyze_section(
    name: SectionName,
    text: &str,
    generator: &dyn TextGenerator,
    settings: &FeedbackSettings,
) -> SectionFeedback {
    if text.trim().is_empty() {
        return SectionFeedback::Missing;
    }

    let (prompts, params) = match settings.mode {
        FeedbackMode::Review => (
            vec![build_review_prompt(name, text)],
            GenerationParams::bounded(settings.max_tokens),
        ),
        FeedbackMode::Rewrite => (
            chunk_words(text, settings.max_chunk_words)
                .iter()
                .map(|chunk| build_rewrite_prompt(name, chunk))
                .collect(),
            GenerationParams::sampled(settings.max_tokens, REWRITE_TEMPERATURE, REWRITE_TOP_P),
        ),
    };

    let mut outcomes = Vec::with_capacity(prompts.len());
    for (idx, prompt) in prompts.iter().enumerate() {
        debug!(section = %name, chunk = idx, "Requesting generation");
        let outcome = match generator.generate(prompt, &params).await {
            Ok(text) => ChunkOutcome::Generated(text.trim().to_string()),
            Err(e) => {
                warn!(section = %name, chunk = idx, error = %e, "Chunk generation failed");
                ChunkOutcome::Failed(e.to_string())
            }
        };
        outcomes.push(outcome);
    }

    SectionFeedback::Generated(outcomes)
}

fn build_review_prompt(name: SectionName, text: &str) -> String {
    // Resume text goes in last so placeholder-like tokens in it survive.
    REVIEW_PROMPT_TEMPLATE
        .replace("{section}", name.as_str())
        .replace("{criteria}", QUALITY_CRITERIA)
        .replace("{section_text}", text.trim_end())
}

fn build_rewrite_prompt(name: SectionName, chunk: &str) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{section}", name.as_str())
        .replace("{criteria}", QUALITY_CRITERIA)
        .replace("{chunk}", chunk)
}
