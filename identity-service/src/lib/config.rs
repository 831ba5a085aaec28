use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Deadline for a single repository call
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// HMAC secret, loaded once at startup
    pub secret: String,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        // Argon2 crate defaults
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_with(&run_mode, environment())
    }

    fn load_with(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

/// Unprefixed variables, `__` between nesting levels.
/// Example: DATABASE__URL=postgres://... overrides database.url
fn environment() -> Environment {
    Environment::default().separator("__")
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/identity"

            [server]
            http_port = 8080

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.password, PasswordConfig::default());
    }

    #[test]
    fn test_password_cost_is_configurable() {
        let config = parse(
            r#"
            [database]
            url = "postgres://localhost/identity"
            query_timeout_ms = 250

            [server]
            http_port = 8080

            [jwt]
            secret = "s"

            [password]
            memory_kib = 8
            iterations = 1
            parallelism = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.database.query_timeout(), Duration::from_millis(250));
        assert_eq!(config.password.memory_kib, 8);
    }

    #[test]
    fn test_environment_overrides_files() {
        let variables = [
            ("JWT__SECRET", "secret-from-the-environment-32-bytes!"),
            ("DATABASE__URL", "postgres://db.internal/identity"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        // Tests run from the crate root, so config/default.toml is read too
        let config = Config::load_with("test", environment().source(Some(variables))).unwrap();

        assert_eq!(config.jwt.secret, "secret-from-the-environment-32-bytes!");
        assert_eq!(config.database.url, "postgres://db.internal/identity");
        assert_eq!(config.server.http_port, 3000);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = parse(
            r#"
            [database]
            url = "postgres://localhost/identity"

            [server]
            http_port = 8080
            "#,
        );
        assert!(result.is_err());
    }
}
