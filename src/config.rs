use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub neo4j: Neo4jSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Connection settings for the Neo4j graph store
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    pub uri: String,
    #[serde(default = "default_neo4j_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_neo4j_database")]
    pub database: String,
}

fn default_neo4j_user() -> String { "neo4j".to_string() }
fn default_neo4j_database() -> String { "neo4j".to_string() }

/// Optional static basic-auth credentials.
///
/// The endpoint is only protected when both user and password are set;
/// otherwise it is open and a warning is logged at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self { strategy: default_strategy() }
    }
}

fn default_strategy() -> String { "weighted".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with MINGLE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with MINGLE_)
            // e.g., MINGLE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MINGLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply the well-known environment variable names
        settings = apply_wellknown_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MINGLE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honor the well-known environment variable names used by deployments:
/// NEO4J_URI, NEO4J_USER, NEO4J_PASSWORD, NEO4J_DATABASE and the
/// BASIC_AUTH_USER / BASIC_AUTH_PASSWORD pair.
fn apply_wellknown_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    // Graph store URI: NEO4J_URI takes precedence over MINGLE_NEO4J__URI
    let neo4j_uri = env::var("NEO4J_URI")
        .or_else(|_| env::var("MINGLE_NEO4J__URI"))
        .unwrap_or_else(|_| "neo4j://localhost:7687".to_string());

    let neo4j_user = env::var("NEO4J_USER").ok();
    let neo4j_password = env::var("NEO4J_PASSWORD").ok();
    let neo4j_database = env::var("NEO4J_DATABASE").ok();
    let basic_auth_user = env::var("BASIC_AUTH_USER").ok();
    let basic_auth_password = env::var("BASIC_AUTH_PASSWORD").ok();

    let mut builder = Config::builder()
        .add_source(settings)
        .set_override("neo4j.uri", neo4j_uri)?;

    if let Some(user) = neo4j_user {
        builder = builder.set_override("neo4j.user", user)?;
    }
    if let Some(password) = neo4j_password {
        builder = builder.set_override("neo4j.password", password)?;
    }
    if let Some(database) = neo4j_database {
        builder = builder.set_override("neo4j.database", database)?;
    }
    if let Some(user) = basic_auth_user {
        builder = builder.set_override("auth.user", user)?;
    }
    if let Some(password) = basic_auth_password {
        builder = builder.set_override("auth.password", password)?;
    }

    builder.build()
}
