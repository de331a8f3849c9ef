use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::engine::{EngineConfig, PhaseTargets};
use crate::questions::KeyStrategy;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub questionnaire: QuestionnaireConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            questionnaire: QuestionnaireConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the question catalog comes from and how the engine scores it.
#[derive(Debug, Clone, Default)]
pub struct QuestionnaireConfig {
    /// CSV catalog; the service falls back to its built-in demo catalog when unset.
    pub catalog_path: Option<PathBuf>,
    /// Keep only catalog rows in this language.
    pub language: Option<String>,
    pub engine: EngineConfig,
}

impl QuestionnaireConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let questions_count = match non_empty_var("PERSONY_QUESTIONS_COUNT") {
            Some(raw) => parse_questions_count(&raw)?,
            None => defaults.questions_count,
        };

        let question_key = match non_empty_var("PERSONY_QUESTION_KEY") {
            Some(raw) => parse_key_strategy(&raw)?,
            None => defaults.question_key,
        };

        let include_secondary = match non_empty_var("PERSONY_SECONDARY_ANALYTICS") {
            Some(raw) => parse_flag("PERSONY_SECONDARY_ANALYTICS", &raw)?,
            None => defaults.include_secondary,
        };

        let engine = EngineConfig {
            neutral_addition: parse_number("PERSONY_NEUTRAL_ADDITION", defaults.neutral_addition)?,
            questions_count,
            max_questions: parse_number("PERSONY_MAX_QUESTIONS", defaults.max_questions)?,
            bias_exponent: parse_number("PERSONY_BIAS_EXPONENT", defaults.bias_exponent)?,
            question_key,
            include_secondary,
        };

        Ok(Self {
            catalog_path: non_empty_var("PERSONY_CATALOG_PATH").map(PathBuf::from),
            language: non_empty_var("PERSONY_CATALOG_LANGUAGE"),
            engine,
        })
    }
}

fn non_empty_var(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(var) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        None => Ok(default),
    }
}

fn parse_questions_count(raw: &str) -> Result<PhaseTargets, ConfigError> {
    let invalid = || ConfigError::InvalidQuestionsCount {
        value: raw.to_string(),
    };

    let counts = raw
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    match counts.as_slice() {
        [preferences, lifestyle, temperament, attitude] => Ok(PhaseTargets {
            preferences: *preferences,
            lifestyle: *lifestyle,
            temperament: *temperament,
            attitude: *attitude,
        }),
        _ => Err(invalid()),
    }
}

fn parse_key_strategy(raw: &str) -> Result<KeyStrategy, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "id" => Ok(KeyStrategy::Id),
        "category_id" | "category#id" => Ok(KeyStrategy::CategoryAndId),
        _ => Err(ConfigError::InvalidKeyStrategy {
            value: raw.to_string(),
        }),
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str, value: String },
    InvalidQuestionsCount { value: String },
    InvalidKeyStrategy { value: String },
    InvalidFlag { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be a number, got '{value}'")
            }
            ConfigError::InvalidQuestionsCount { value } => write!(
                f,
                "PERSONY_QUESTIONS_COUNT must list four comma-separated targets, got '{value}'"
            ),
            ConfigError::InvalidKeyStrategy { value } => write!(
                f,
                "PERSONY_QUESTION_KEY must be 'id' or 'category_id', got '{value}'"
            ),
            ConfigError::InvalidFlag { var, value } => {
                write!(f, "{var} must be true or false, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "PERSONY_CATALOG_PATH",
            "PERSONY_CATALOG_LANGUAGE",
            "PERSONY_NEUTRAL_ADDITION",
            "PERSONY_MAX_QUESTIONS",
            "PERSONY_BIAS_EXPONENT",
            "PERSONY_QUESTIONS_COUNT",
            "PERSONY_QUESTION_KEY",
            "PERSONY_SECONDARY_ANALYTICS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.questionnaire.catalog_path, None);
        assert_eq!(config.questionnaire.engine, EngineConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_engine_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("PERSONY_CATALOG_PATH", "data/questions.csv");
        env::set_var("PERSONY_CATALOG_LANGUAGE", "fr");
        env::set_var("PERSONY_NEUTRAL_ADDITION", "2");
        env::set_var("PERSONY_MAX_QUESTIONS", "12");
        env::set_var("PERSONY_BIAS_EXPONENT", "3");
        env::set_var("PERSONY_QUESTIONS_COUNT", "16, 8, 8, 4");
        env::set_var("PERSONY_QUESTION_KEY", "category_id");
        env::set_var("PERSONY_SECONDARY_ANALYTICS", "TRUE");

        let config = AppConfig::load().expect("config loads").questionnaire;
        assert_eq!(config.catalog_path, Some(PathBuf::from("data/questions.csv")));
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.engine.neutral_addition, 2);
        assert_eq!(config.engine.max_questions, 12);
        assert_eq!(config.engine.bias_exponent, 3);
        assert_eq!(config.engine.questions_count.total(), 36);
        assert_eq!(config.engine.question_key, KeyStrategy::CategoryAndId);
        assert!(config.engine.include_secondary);
        reset_env();
    }

    #[test]
    fn rejects_malformed_engine_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");

        reset_env();
        env::set_var("PERSONY_MAX_QUESTIONS", "eight");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                var: "PERSONY_MAX_QUESTIONS",
                ..
            })
        ));

        reset_env();
        env::set_var("PERSONY_QUESTIONS_COUNT", "32,16,16");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidQuestionsCount { .. })
        ));

        reset_env();
        env::set_var("PERSONY_QUESTION_KEY", "uuid");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidKeyStrategy { .. })
        ));

        reset_env();
        env::set_var("PERSONY_SECONDARY_ANALYTICS", "maybe");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { .. })
        ));
        reset_env();
    }
}
