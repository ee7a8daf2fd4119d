use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "history-map", version, about = "Map dashboard for AI-generated historical facts")]
pub struct Cli {
    /// Path to the .env file holding the OpenAI key
    #[arg(long, env = "ENV_PATH")]
    pub env_path: Option<PathBuf>,
}

/// Application configuration loaded from environment variables.
/// Everything except the credential has a default suitable for local use.
#[derive(Clone)]
pub struct Config {
    /// Server-wide default credential. New sessions start with it when present.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub llm_timeout: Duration,
    pub llm_max_tokens: u32,
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_language: String,
    pub geocoder_timeout: Duration,
    pub session_cookie: String,
    pub port: u16,
    pub rust_log: String,
}

// Hand-written so the credential never ends up in a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_timeout", &self.llm_timeout)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("geocoder_url", &self.geocoder_url)
            .field("geocoder_user_agent", &self.geocoder_user_agent)
            .field("geocoder_language", &self.geocoder_language)
            .field("geocoder_timeout", &self.geocoder_timeout)
            .field("session_cookie", &self.session_cookie)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

impl Config {
    /// Loads the env file named on the command line (or `.env` if none was
    /// given), then reads the process environment.
    pub fn from_env(cli: &Cli) -> Result<Self> {
        match &cli.env_path {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load env file '{}'", path.display()))?;
            }
            None => {
                dotenvy::dotenv().ok(); // load .env if present; ignore if missing
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            openai_api_key: get("OPENAI_API_KEY").map(|v| v.trim().to_string()),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            // Slow models may need LLM_TIMEOUT_SECS=60.
            llm_timeout: Duration::from_secs(parse_or(get("LLM_TIMEOUT_SECS"), 9, "LLM_TIMEOUT_SECS")?),
            llm_max_tokens: parse_or(get("LLM_MAX_TOKENS"), 1024, "LLM_MAX_TOKENS")?,
            geocoder_url: get("GEOCODER_URL")
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org".to_string())
                .trim_end_matches('/')
                .to_string(),
            geocoder_user_agent: get("GEOCODER_USER_AGENT")
                .unwrap_or_else(|| format!("history-map/{}", env!("CARGO_PKG_VERSION"))),
            geocoder_language: get("GEOCODER_LANGUAGE").unwrap_or_else(|| "en".to_string()),
            geocoder_timeout: Duration::from_secs(parse_or(
                get("GEOCODER_TIMEOUT_SECS"),
                5,
                "GEOCODER_TIMEOUT_SECS",
            )?),
            session_cookie: get("SESSION_COOKIE").unwrap_or_else(|| "history_map_session".to_string()),
            port: parse_or(get("PORT"), 8080, "PORT")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(value: Option<String>, default: T, key: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
