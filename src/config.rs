//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The configuration file path defaults to `config.yaml` but can
//! be specified via `-f` flag or the `MIDAS_CONFIG` environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources
//! override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `MIDAS_` override
//!    YAML values; nested values use double underscores
//!    (`MIDAS_PUSH__PROJECT_ID=my-project`)
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port`
//! - **Database**: `database.url`, `database.pool.*`
//! - **Authentication**: `auth.allow_registration`, `auth.password.*`
//! - **Push delivery**: `push.endpoint`, `push.project_id`, `push.auth_token`
//! - **Vision / translation**: `vision.*`, `translation.*`
//! - **Query limits**: `limits.*`

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::auth::password::Argon2Params;
use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "MIDAS_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment
/// variables. All fields have sensible defaults defined in the `Default`
/// implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Special-case `DATABASE_URL` override; folded into `database.url` by
    /// [`Config::load`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// PostgreSQL connection settings
    pub database: DatabaseConfig,
    /// Registration and password rules
    pub auth: AuthConfig,
    /// Push delivery (FCM-style HTTP endpoint) settings
    pub push: PushConfig,
    /// Vision label-detection API settings
    pub vision: VisionConfig,
    /// Label translation API settings
    pub translation: TranslationConfig,
    /// Bounds for position queries
    pub limits: LimitsConfig,
}

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL (postgres://...)
    pub url: String,
    /// Connection pool settings
    pub pool: PoolSettings,
}

/// Connection pool settings controlling SQLx pool behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection (seconds)
    pub acquire_timeout_secs: u64,
    /// Time before idle connections are closed (seconds, 0 = never)
    pub idle_timeout_secs: u64,
    /// Maximum lifetime of a connection (seconds, 0 = never)
    pub max_lifetime_secs: u64,
}

/// Registration and password rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Allow new users to self-register
    pub allow_registration: bool,
    /// Password validation rules and hashing cost
    pub password: PasswordConfig,
}

/// Password validation rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordConfig {
    /// Minimum password length
    pub min_length: usize,
    /// Maximum password length
    pub max_length: usize,
    /// Argon2 memory cost in KiB (default: 19456 KiB = 19 MB)
    pub argon2_memory_kib: u32,
    /// Argon2 iterations (default: 2)
    pub argon2_iterations: u32,
    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl PasswordConfig {
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

/// Push delivery settings. Messages are POSTed per device token to
/// `{endpoint}/v1/projects/{project_id}/messages:send`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushConfig {
    /// Base URL of the delivery endpoint
    pub endpoint: Url,
    /// Cloud project identifier
    pub project_id: String,
    /// Bearer token sent with delivery requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Title used when a notify request omits one
    pub default_title: String,
}

/// Vision label-detection API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisionConfig {
    /// Base URL of the annotate endpoint
    pub endpoint: Url,
    /// API key appended as a query parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// How many label annotations to request from the API
    pub max_results: u32,
}

/// Label translation API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationConfig {
    /// Base URL of the translation endpoint
    pub endpoint: Url,
    /// API key appended as a query parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Language the vision API labels come back in
    pub source_language: String,
    /// Language descriptions are produced in
    pub target_language: String,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

/// Bounds for position queries.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum rows returned by the per-user history query
    pub history_limit: i64,
    /// Default combined-row bound for the guardian dashboard query
    pub dashboard_default_limit: i64,
    /// Maximum combined-row bound for the guardian dashboard query
    pub dashboard_max_limit: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            push: PushConfig::default(),
            vision: VisionConfig::default(),
            translation: TranslationConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/midas".to_string(),
            pool: PoolSettings::default(),
        }
    }
}

impl Default for PoolSettings {
    /// Production defaults: balanced for reliability and resource usage
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,  // 10 minutes
            max_lifetime_secs: 1800, // 30 minutes
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
            password: PasswordConfig::default(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            argon2_memory_kib: 19456,
            argon2_iterations: 2,
            argon2_parallelism: 1,
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("https://fcm.googleapis.com").unwrap(),
            project_id: String::new(),
            auth_token: None,
            timeout: Duration::from_secs(10),
            default_title: "MIDAS notification".to_string(),
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("https://vision.googleapis.com").unwrap(),
            api_key: None,
            timeout: Duration::from_secs(15),
            max_results: 30,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("https://translation.googleapis.com").unwrap(),
            api_key: None,
            source_language: "en".to_string(),
            target_language: "ko".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            dashboard_default_limit: 5,
            dashboard_max_limit: 200,
        }
    }
}

impl Config {
    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("MIDAS_").split("__"))
            // Common DATABASE_URL pattern
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // if database_url is set, use it (preserving existing pool settings)
        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        let password = &self.auth.password;
        if password.min_length > password.max_length {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: Invalid password configuration: min_length ({}) cannot be greater than max_length ({})",
                    password.min_length, password.max_length
                ),
            });
        }
        if password.min_length < 1 {
            return Err(Error::Internal {
                operation: "Config validation: Invalid password configuration: min_length must be at least 1".to_string(),
            });
        }

        if self.limits.history_limit < 1 {
            return Err(Error::Internal {
                operation: "Config validation: limits.history_limit must be at least 1".to_string(),
            });
        }
        if self.limits.dashboard_max_limit < 1 || self.limits.dashboard_default_limit < 1 {
            return Err(Error::Internal {
                operation: "Config validation: dashboard limits must be at least 1".to_string(),
            });
        }
        if self.limits.dashboard_default_limit > self.limits.dashboard_max_limit {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: dashboard_default_limit ({}) cannot exceed dashboard_max_limit ({})",
                    self.limits.dashboard_default_limit, self.limits.dashboard_max_limit
                ),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
