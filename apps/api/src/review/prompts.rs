// All generation prompt templates for the review module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Single-shot section review. Replace: {section_text}, {section}, {criteria}
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"{section_text}

You are an expert resume reviewer. Analyze the {section} section above.
Provide concise, actionable feedback, one suggestion per line.
Judge it against these criteria:
{criteria}
Suggest improvements with measurable achievements, keywords, and impact-oriented language."#;

/// Chunked section rewrite. Replace: {section}, {criteria}, {chunk}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following part of the {section} section of a resume so that it is ATS-friendly.
Apply these criteria:
{criteria}
Keep every fact from the original. Do NOT invent employers, dates, or numbers.
Return only the rewritten text.

ORIGINAL:
{chunk}"#;

/// Role inference from the top of a resume. Replace: {resume_head}
pub const ROLE_INFERENCE_PROMPT_TEMPLATE: &str = r#"Based on the beginning of this resume, what is the single most likely job title the candidate is targeting?
Answer with the job title only, for example: Backend Engineer.

RESUME:
{resume_head}"#;

/// ATS keyword listing. Replace: {role}
pub const KEYWORDS_PROMPT_TEMPLATE: &str =
    "List 10–15 important resume keywords for a {role} role. Provide only keywords, separated by commas.";
