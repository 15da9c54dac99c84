use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    /// Credentials for the admin account seeded on first startup.
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Base URL under which uploaded objects are publicly reachable.
    pub public_base_url: String,
    pub max_upload_size: u64,
    /// UTC hour of day at which the orphan sweep runs.
    pub sweep_hour_utc: u32,
    /// Minimum object age before an unreferenced object may be deleted.
    pub grace_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    pub form_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub relay: RelayConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.token_ttl_secs", 86_400)?
            .set_default("auth.admin_username", "admin")?
            .set_default("auth.admin_password", "admin1234!")?
            .set_default("storage.region", "ap-northeast-2")?
            .set_default("storage.max_upload_size", 10 * 1024 * 1024)?
            .set_default("storage.sweep_hour_utc", 4)?
            .set_default("storage.grace_secs", 86_400)?
            .set_default(
                "relay.form_url",
                "https://docs.google.com/forms/d/e/1FAIpQLSeJ5Jald5tjTEhfZNlQfi7OsaarfgBOXJCr1o2UZwp2KjmhFw/formResponse",
            )?
            .set_default("relay.timeout_secs", 10)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CORECLASS__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CORECLASS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
