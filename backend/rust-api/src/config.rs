use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub const DEFAULT_HISTORY_KEY: &str = "han-domino-attempts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryBackend {
    Redis,
    Memory,
}

impl FromStr for HistoryBackend {
    type Err = config::ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(HistoryBackend::Redis),
            "memory" => Ok(HistoryBackend::Memory),
            other => Err(config::ConfigError::Message(format!(
                "unknown storage.backend '{}' (expected redis or memory)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub history_backend: HistoryBackend,
    pub redis_uri: String,
    pub history_key: String,
    pub max_hints: Option<u32>,
    pub shuffle_seed: Option<u64>,
    pub otlp_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8081".to_string(),
            history_backend: HistoryBackend::Memory,
            redis_uri: "redis://127.0.0.1:6379/0".to_string(),
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            max_hints: None,
            shuffle_seed: None,
            otlp_endpoint: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/{env}.toml is optional; APP__SECTION__KEY overrides it
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or(defaults.bind_addr);

        let history_backend = match settings
            .get_string("storage.backend")
            .or_else(|_| env::var("HISTORY_BACKEND"))
        {
            Ok(value) => value.parse()?,
            Err(_) => defaults.history_backend,
        };

        let redis_uri = settings
            .get_string("redis.uri")
            .or_else(|_| env::var("REDIS_URI"))
            .unwrap_or(defaults.redis_uri);

        let history_key = settings
            .get_string("storage.history_key")
            .unwrap_or(defaults.history_key);

        let max_hints = match settings.get_int("hints.max_per_session") {
            Ok(value) => Some(u32::try_from(value.max(0)).unwrap_or(u32::MAX)),
            Err(_) => None,
        };

        let shuffle_seed = settings
            .get_int("puzzle.seed")
            .ok()
            .map(|seed| seed as u64);

        let otlp_endpoint = settings
            .get_string("telemetry.otlp_endpoint")
            .or_else(|_| env::var("OTEL_EXPORTER_OTLP_ENDPOINT"))
            .ok()
            .filter(|endpoint| !endpoint.is_empty());

        Ok(Config {
            bind_addr,
            history_backend,
            redis_uri,
            history_key,
            max_hints,
            shuffle_seed,
            otlp_endpoint,
        })
    }
}
