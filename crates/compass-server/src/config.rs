use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// CORS allowed origins; empty means allow all (development mode).
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_tokens: Option<usize>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_ai_model(),
            base_url: default_ai_base_url(),
            timeout_secs: default_ai_timeout_secs(),
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_table")]
    pub table: String,
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: default_store_table(),
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

fn default_http_port() -> u16 {
    8080
}

fn default_ai_model() -> String {
    "gpt-4".to_string()
}

fn default_ai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_timeout_secs() -> u64 {
    120
}

fn default_store_table() -> String {
    "competitors".to_string()
}

fn default_store_timeout_secs() -> u64 {
    30
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Required process secrets, validated eagerly at startup.
#[derive(Clone, Debug)]
pub struct Secrets {
    pub openai_api_key: String,
    pub supabase_url: String,
    pub supabase_key: String,
}

const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const SUPABASE_URL: &str = "SUPABASE_URL";
const SUPABASE_KEY: &str = "SUPABASE_KEY";

impl Secrets {
    /// Read all required secrets from the process environment, failing with
    /// a single error that names every missing variable.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let openai_api_key = get(OPENAI_API_KEY);
        let supabase_url = get(SUPABASE_URL);
        let supabase_key = get(SUPABASE_KEY);

        let missing: Vec<&str> = [
            (OPENAI_API_KEY, &openai_api_key),
            (SUPABASE_URL, &supabase_url),
            (SUPABASE_KEY, &supabase_key),
        ]
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| *k)
        .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            openai_api_key: openai_api_key.unwrap_or_default(),
            supabase_url: supabase_url.unwrap_or_default(),
            supabase_key: supabase_key.unwrap_or_default(),
        })
    }
}
