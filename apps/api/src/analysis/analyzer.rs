//! Resume analysis: prompt the upstream model and hand back its JSON verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::analysis::prompts::build_review_prompt;
use crate::errors::AppError;
use crate::llm_client::{strip_code_fences, ChatCompletion};

/// Shape the prompt asks the model for. Replies are returned as-is and are
/// not checked against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeAnalysis {
    pub score: u8, // 0-100
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Runs one review of `resume_text` against `llm`.
///
/// The reply is fence-stripped and parsed as JSON. On parse failure the error
/// carries the reply exactly as the model sent it.
pub async fn analyze_resume(llm: &dyn ChatCompletion, resume_text: &str) -> Result<Value, AppError> {
    let prompt = build_review_prompt(resume_text);
    let reply = llm.complete(&prompt).await?;

    let cleaned = strip_code_fences(&reply);
    debug!("Model reply: {} bytes, {} after cleanup", reply.len(), cleaned.len());

    let analysis: Value =
        serde_json::from_str(&cleaned).map_err(|_| AppError::UpstreamDecode { raw: reply })?;

    match ResumeAnalysis::deserialize(&analysis) {
        Ok(review) => debug!(
            "Review score={} ({} suggestions, {} strengths, {} weaknesses)",
            review.score,
            review.suggestions.len(),
            review.strengths.len(),
            review.weaknesses.len()
        ),
        Err(e) => warn!("Model reply does not match the review shape: {e}"),
    }

    Ok(analysis)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Upstream stand-in replaying a fixed outcome and recording prompts.
    pub(crate) struct StubLlm {
        reply: Result<String, (u16, String)>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubLlm {
        pub(crate) fn replying(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for StubLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    struct EmptyLlm;

    #[async_trait]
    impl ChatCompletion for EmptyLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    const FENCED: &str = "```json\n{\"score\": 80, \"suggestions\": [], \"strengths\": [], \"weaknesses\": []}\n```";

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let llm = StubLlm::replying(FENCED);
        let result = analyze_resume(&llm, "resume").await.unwrap();
        assert_eq!(
            result,
            json!({"score": 80, "suggestions": [], "strengths": [], "weaknesses": []})
        );

        let typed: ResumeAnalysis = serde_json::from_value(result).unwrap();
        assert_eq!(typed.score, 80);
    }

    #[tokio::test]
    async fn test_prompt_carries_resume_text() {
        let llm = StubLlm::replying("{}");
        analyze_resume(&llm, "Staff engineer at Acme").await.unwrap();
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Staff engineer at Acme"));
    }

    #[tokio::test]
    async fn test_reply_shape_is_not_validated() {
        let llm = StubLlm::replying("{\"verdict\": \"fine\"}");
        let result = analyze_resume(&llm, "resume").await.unwrap();
        assert_eq!(result, json!({"verdict": "fine"}));
    }

    #[tokio::test]
    async fn test_prose_reply_is_decode_error_with_raw() {
        let prose = "This resume looks great overall!";
        let llm = StubLlm::replying(prose);
        let err = analyze_resume(&llm, "resume").await.unwrap_err();
        match err {
            AppError::UpstreamDecode { raw } => assert_eq!(raw, prose),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_raw_is_unstripped_reply() {
        let reply = "```json\nnot json\n```";
        let llm = StubLlm::replying(reply);
        let err = analyze_resume(&llm, "resume").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamDecode { raw } if raw == reply));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_request_error() {
        let llm = StubLlm::failing(503, "Service Unavailable");
        let err = analyze_resume(&llm, "resume").await.unwrap_err();
        match err {
            AppError::UpstreamRequest(details) => assert!(details.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_unexpected() {
        let err = analyze_resume(&EmptyLlm, "resume").await.unwrap_err();
        assert!(matches!(err, AppError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_identical_calls_identical_output() {
        let llm = StubLlm::replying(FENCED);
        let first = analyze_resume(&llm, "same text").await.unwrap();
        let second = analyze_resume(&llm, "same text").await.unwrap();
        assert_eq!(first, second);
    }
}
