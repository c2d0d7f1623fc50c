//! Overall suggestions for sections a resume lacks.

use crate::review::feedback::FeedbackMap;
use crate::review::sections::SectionName;

fn advice(section: SectionName) -> Option<&'static str> {
    match section {
        SectionName::Summary => Some("Add a concise summary with measurable achievements."),
        SectionName::Experience => Some("Include detailed experience bullets with metrics."),
        SectionName::Skills => {
            Some("Clearly list programming languages, tools, and relevant platforms.")
        }
        SectionName::Projects => {
            Some("Consider adding relevant projects to highlight practical skills.")
        }
        SectionName::Education => Some("Include your educational background for completeness."),
        SectionName::Other => None,
    }
}

/// One advice line per header section that is absent or empty, in header order.
pub fn overall_suggestions(feedback: &FeedbackMap) -> Vec<String> {
    SectionName::HEADERS
        .iter()
        .filter(|name| feedback.get(**name).map_or(true, |fb| fb.is_missing()))
        .filter_map(|name| advice(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::EchoGenerator;
    use crate::review::feedback::{generate_feedback, FeedbackMode, FeedbackSettings};
    use crate::review::sections::split_sections;

    async fn feedback_for(text: &str) -> FeedbackMap {
        let settings = FeedbackSettings {
            mode: FeedbackMode::Review,
            max_chunk_words: 400,
            max_tokens: 100,
        };
        generate_feedback(&split_sections(text), &EchoGenerator::default(), &settings).await
    }

    #[tokio::test]
    async fn test_complete_resume_needs_no_suggestions() {
        let map = feedback_for(
            "SUMMARY\ns\nEXPERIENCE\ne\nSKILLS\nk\nPROJECTS\np\nEDUCATION\nd\n",
        )
        .await;
        assert!(overall_suggestions(&map).is_empty());
    }

    #[tokio::test]
    async fn test_absent_and_empty_sections_both_trigger() {
        let map = feedback_for("SUMMARY\n\nEXPERIENCE\nAcme\n").await;
        let suggestions = overall_suggestions(&map);
        assert_eq!(
            suggestions,
            vec![
                "Add a concise summary with measurable achievements.",
                "Clearly list programming languages, tools, and relevant platforms.",
                "Consider adding relevant projects to highlight practical skills.",
                "Include your educational background for completeness.",
            ]
        );
    }

    #[test]
    fn test_empty_feedback_suggests_everything() {
        assert_eq!(overall_suggestions(&FeedbackMap::default()).len(), 5);
    }
}
