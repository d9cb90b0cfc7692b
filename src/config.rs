use secrecy::SecretString;
use std::env;

/// Candidate model ordering, tried first to last at startup.
pub const DEFAULT_MODEL_CANDIDATES: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-001",
    "gemini-2.0-flash-lite",
    "gemini-2.0-flash-lite-001",
    "gemini-2.0-pro-exp",
    "gemini-flash-latest",
    "gemini-pro-latest",
];

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub gemini_api_key: SecretString,
    pub gemini_api_base: String,
    pub gemini_models: Vec<String>,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub fetch_timeout_secs: u64,
    pub generation_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "wikiquiz-local".to_string()),
            gemini_api_key: SecretString::from(env::var("GEMINI_API_KEY").unwrap_or_default()),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            gemini_models: env::var("GEMINI_MODELS")
                .ok()
                .map(|raw| parse_model_list(&raw))
                .filter(|models| !models.is_empty())
                .unwrap_or_else(default_model_candidates),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(60),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "wikiquiz-test".to_string(),
            gemini_api_key: SecretString::from("test_api_key".to_string()),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            gemini_models: default_model_candidates(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            fetch_timeout_secs: 10,
            generation_timeout_secs: 60,
        }
    }
}

fn default_model_candidates() -> Vec<String> {
    DEFAULT_MODEL_CANDIDATES
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
