// --- File: crates/mobilify_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};

pub mod models;
pub use models::{AdapterConfig, AppConfig, AuthConfig, ServerConfig, TripConfig};

/// Loads the unified configuration.
///
/// Sources, later ones winning: built-in defaults, `config/default.toml`,
/// `config/<RUN_ENV>.toml`, then `APP`-prefixed environment variables with
/// `__` as the section separator (`APP_SERVER__PORT=9090`). A `.env` file is
/// honored so local runs do not have to export anything.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_bare_environment() {
        let config = load_config().expect("defaults alone should deserialize");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn optional_sections_default_to_none() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "host": "0.0.0.0", "port": 9090 }
        }))
        .unwrap();
        assert!(config.adapter.is_none());
        assert!(config.trip.is_none());
        assert!(config.auth.is_none());
    }
}
