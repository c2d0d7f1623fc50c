// Shared prompt constants used across review prompts.
// Each module that calls the generator keeps its own templates in a prompts.rs alongside it.

/// System prompt sent with every generation call.
pub const REVIEWER_SYSTEM: &str = "You are an expert resume reviewer and ATS specialist. \
    Answer with plain text only. \
    Do NOT use markdown code fences. \
    Do NOT include greetings, explanations of your process, or apologies.";

/// Quality criteria every feedback and rewrite prompt states.
pub const QUALITY_CRITERIA: &str = "\
    - impact-oriented language with strong action verbs\n\
    - measurable achievements (numbers, percentages, time or money saved)\n\
    - keyword density for applicant tracking systems\n\
    - logical grouping of related items\n\
    - conciseness: no filler, one idea per line";
