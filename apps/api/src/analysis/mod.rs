// Resume Analyzer: resume text in, model critique out.
// The upstream call goes through llm_client; nothing here talks HTTP directly.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
