use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Flat view of the environment, one field per variable
#[derive(Debug, Deserialize)]
struct EnvSettings {
    bind_address: String,
    port: u16,
    db_host: String,
    db_port: u16,
    db_user: String,
    db_password: String,
    db_name: String,
    db_max_connections: u32,
    storage_backend: StorageBackend,
}

impl From<EnvSettings> for Config {
    fn from(env: EnvSettings) -> Self {
        Self {
            server: ServerConfig {
                bind_address: env.bind_address,
                port: env.port,
            },
            database: DatabaseConfig {
                host: env.db_host,
                port: env.db_port,
                user: env.db_user,
                password: env.db_password,
                name: env.db_name,
                max_connections: env.db_max_connections,
            },
            storage: env.storage_backend,
        }
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

impl Config {
    /// Load from the process environment (and `.env` when present).
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .set_default("bind_address", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("db_host", "localhost")?
            .set_default("db_port", 5432)?
            .set_default("db_user", "root")?
            .set_default("db_password", "")?
            .set_default("db_name", "simple_db")?
            .set_default("db_max_connections", 1)?
            .set_default("storage_backend", "postgres")?
            .build()?;

        let env: EnvSettings = settings.try_deserialize()?;
        Ok(env.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "BIND_ADDRESS",
        "PORT",
        "DB_HOST",
        "DB_PORT",
        "DB_USER",
        "DB_PASSWORD",
        "DB_NAME",
        "DB_MAX_CONNECTIONS",
        "STORAGE_BACKEND",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = Config::load().unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.user, "root");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.name, "simple_db");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.storage, StorageBackend::Postgres);
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        clear_env();
        std::env::set_var("PORT", "8081");
        std::env::set_var("DB_NAME", "decisions");
        std::env::set_var("DB_PASSWORD", "s3cret");
        std::env::set_var("STORAGE_BACKEND", "memory");

        let config = Config::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.name, "decisions");
        assert_eq!(config.database.password, "s3cret");
        assert_eq!(config.storage, StorageBackend::Memory);
    }
}
