//! Process configuration loading

pub use tg_shared::config::AppConfig;

/// Load `.env` if present, then read the configuration from the environment
pub fn load() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}
