use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Operator JWT validation configuration
    pub jwt: JwtAuthConfig,
    /// Q10 certificate portal configuration
    #[serde(default)]
    pub q10: Q10Config,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Per-operator scan rate limit; 0 disables rate limiting.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// RSA public key (PEM) of the external identity system.
    pub public_key: String,

    /// RSA private key (PEM). Only the admin token tool and the test
    /// fixtures sign tokens; the server itself never issues them.
    pub private_key: String,

    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,

    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Q10Config {
    /// Certificate-portal URL prefix accepted for extraction.
    #[serde(default = "default_q10_prefix")]
    pub url_prefix: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_q10_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether the Q10 check-in path is enabled.
    #[serde(default)]
    pub enabled: bool,
}

impl Default for Q10Config {
    fn default() -> Self {
        Self {
            url_prefix: default_q10_prefix(),
            timeout_ms: default_q10_timeout_ms(),
            enabled: false,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_rate_limit() -> u32 {
    120
}
fn default_token_expiry() -> i64 {
    43200
}
fn default_leeway() -> u64 {
    30
}
fn default_q10_prefix() -> String {
    "https://site.q10.com/Certificados".to_string()
}
fn default_q10_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Loads configuration from `config/default.toml` (if present) layered
    /// with `CHECKIN__`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("CHECKIN")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("security.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("invalid host/port configuration")
    }

    /// Database config in the persistence crate's shape.
    pub fn database_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            connect_timeout_secs: self.database.connect_timeout_secs,
            idle_timeout_secs: self.database.idle_timeout_secs,
        }
    }
}
