use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on words per chunk sent to the model in rewrite mode.
    pub max_chunk_words: usize,
    /// Output ceiling for per-section feedback and rewrite calls.
    pub feedback_max_tokens: u32,
    /// Output ceiling for keyword listing and role inference calls.
    pub keyword_max_tokens: u32,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_chunk_words: parse_env("MAX_CHUNK_WORDS", 400)?,
            feedback_max_tokens: parse_env("FEEDBACK_MAX_TOKENS", 512)?,
            keyword_max_tokens: parse_env("KEYWORD_MAX_TOKENS", 200)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
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
    fn test_parse_env_falls_back_to_default_when_unset() {
        let value: usize = parse_env("RESUME_OPTIMIZER_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_OPTIMIZER_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("RESUME_OPTIMIZER_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("RESUME_OPTIMIZER_TEST_BAD_PORT");
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("RESUME_OPTIMIZER_TEST_CHUNK", " 250 ");
        let value: usize = parse_env("RESUME_OPTIMIZER_TEST_CHUNK", 400).unwrap();
        assert_eq!(value, 250);
        std::env::remove_var("RESUME_OPTIMIZER_TEST_CHUNK");
    }
}
