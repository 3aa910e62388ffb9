use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub ocr: OcrConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// Where blobs live. The filesystem backend stores objects under
/// `root/<session_id>/<name>` and hands out locators prefixed with
/// `public_base_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub root: String,
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub languages: String,
    pub timeout_secs: u64,
}

/// Configuration for the refinement/NER collaborator. Present config
/// marks the provider available; the calls themselves are still
/// pass-through stubs.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("DOCSIFT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("DOCSIFT_PORT", 3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:docsift.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            storage: StorageConfig {
                root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "blobs".to_string()),
                public_base_url: env::var("STORAGE_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "file:///blobs".to_string()),
            },
            ocr: OcrConfig {
                languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT_SECS", 60),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT_SECS", 30),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
