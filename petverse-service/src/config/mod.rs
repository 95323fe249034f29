use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Provider endpoint for OpenAI-compatible chat completions.
const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_GROQ_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct PetverseConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub groq: GroqConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" | "test" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    pub api_key: Secret<String>,
    pub api_base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Directory holding the page templates (`index.html`, `pets.html`, ...).
    pub template_dir: String,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// CORS origins; `*` allows any.
    pub allowed_origins: Vec<String>,
}

impl PetverseConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        Ok(PetverseConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("petverse-service"), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", Some("sqlite://pets.db"), false)?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            groq: GroqConfig {
                // Chat degrades to its failure reply without a key, so only
                // production insists on one.
                api_key: Secret::new(get_env("GROQ_API_KEY", Some(""), is_prod)?),
                api_base_url: get_env("GROQ_API_BASE", Some(DEFAULT_GROQ_API_BASE), false)?,
                model: get_env("GROQ_MODEL", Some(DEFAULT_GROQ_MODEL), false)?,
                timeout_secs: parse_env("GROQ_TIMEOUT_SECS", DEFAULT_GROQ_TIMEOUT_SECS)?,
            },
            web: WebConfig {
                template_dir: get_env("TEMPLATE_DIR", Some("templates"), false)?,
                static_dir: get_env("STATIC_DIR", Some("static"), false)?,
                allowed_origins: parse_origins(&get_env("ALLOWED_ORIGINS", Some("*"), false)?),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_required: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !(is_required && val.is_empty()) => Ok(val),
        _ => {
            if is_required {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} is invalid: {}", key, e))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins("http://localhost:5000, http://127.0.0.1:5000,"),
            vec!["http://localhost:5000", "http://127.0.0.1:5000"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Prod));
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Dev));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn parse_env_falls_back_to_default() {
        let value: u64 = parse_env("PETVERSE_TEST_UNSET_TIMEOUT", 30).unwrap();
        assert_eq!(value, 30);
    }
}
