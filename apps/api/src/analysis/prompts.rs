// Resume review prompt template.

pub const RESUME_REVIEW_PROMPT: &str = r#"
You are an expert resume reviewer. Analyze the resume below and return a JSON response with the following keys:

- "score" (0-100)
- "suggestions": [list of things to improve]
- "strengths": [list of strong points]
- "weaknesses": [list of weak points]

Resume:
{resume_text}

Respond only in valid JSON format, without explanation.
"#;

/// Embeds the resume verbatim into the review template.
pub fn build_review_prompt(resume_text: &str) -> String {
    RESUME_REVIEW_PROMPT.replace("{resume_text}", resume_text)
}
