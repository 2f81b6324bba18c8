//! Startup configuration loading for the API binary

use aipp_shared::config::{AppConfig, ConfigError, Environment};

/// Load `.env` files and the environment into a validated [`AppConfig`]
///
/// `.env` is read first, then the environment-specific file (for example
/// `.env.production`). Variables already set in the process win over both.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    dotenvy::from_filename(Environment::from_env().env_file()).ok();

    let config = AppConfig::from_env();
    config.validate()?;
    Ok(config)
}
