// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use dotenvy::dotenv;

/// Number of questions requested from the model for every quiz.
pub const QUIZ_QUESTION_COUNT: usize = 5;

/// Length of a minted quiz identifier.
pub const QUIZ_ID_LEN: usize = 8;

/// How many fresh identifiers are tried before giving up on an id collision.
pub const QUIZ_ID_ATTEMPTS: usize = 5;

/// Settings for the external text-generation service.
#[derive(Clone)]
pub struct AiConfig {
    /// Credential read from `API_KEY`. Generation fails without it.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Externally reachable origin embedded in QR access URLs.
    pub public_base_url: String,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    pub ai: AiConfig,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://quiz.db".to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            public_base_url: "https://recall-quiz.onrender.com".to_string(),
            static_dir: PathBuf::from("static"),
            ai: AiConfig {
                api_key: None,
                model: "gemini-2.5-flash".to_string(),
                endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                timeout_secs: 60,
            },
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let bind_addr = parse_var("BIND_ADDR").unwrap_or(defaults.bind_addr);

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.public_base_url);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let api_key = env::var("API_KEY").ok().filter(|key| !key.trim().is_empty());

        let ai = AiConfig {
            api_key,
            model: env::var("GEMINI_MODEL").unwrap_or(defaults.ai.model),
            endpoint: env::var("GEMINI_ENDPOINT").unwrap_or(defaults.ai.endpoint),
            timeout_secs: parse_var("AI_TIMEOUT_SECS").unwrap_or(defaults.ai.timeout_secs),
        };

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        Self {
            database_url,
            bind_addr,
            public_base_url,
            static_dir,
            ai,
            rust_log,
        }
    }

    /// Directory QR images are written to.
    pub fn qr_dir(&self) -> PathBuf {
        self.static_dir.join("qrcodes")
    }
}

/// Reads and parses an env var. Missing vars are silent, malformed ones are logged.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}
