use anyhow::{Context, Result};

const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if `GROQ_API_KEY` is missing.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub groq_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("groq_api_key", &"<redacted>")
            .field("groq_api_url", &self.groq_api_url)
            .field("groq_timeout_secs", &self.groq_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let groq_timeout_secs = optional_env("GROQ_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if groq_timeout_secs == 0 {
            anyhow::bail!("GROQ_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: std::env::var("GROQ_API_URL")
                .unwrap_or_else(|_| DEFAULT_GROQ_API_URL.to_string()),
            groq_timeout_secs,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration with the given key and every other field at its default.
    #[cfg(test)]
    pub fn with_api_key(groq_api_key: impl Into<String>) -> Self {
        Config {
            groq_api_key: groq_api_key.into(),
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            groq_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::with_api_key("gsk_test");
        assert_eq!(config.groq_api_url, DEFAULT_GROQ_API_URL);
        assert_eq!(config.groq_timeout_secs, 60);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::with_api_key("gsk_super_secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("gsk_super_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_optional_env_uses_default_when_unset() {
        let value: u64 = optional_env("RESUME_REVIEW_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
