use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://fr.wiktionary.org";
pub const DEFAULT_RANDOM_URL: &str = "https://tools.wmflabs.org/anagrimes/hasard.php";
pub const DEFAULT_LANGUAGE: &str = "Français";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub random_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub default_language: String,
}

impl Settings {
    /// Defaults, then `wiktionnaire.toml` if present, then `WIKTIONNAIRE_*` variables.
    pub fn load() -> Result<Self> {
        let settings = Self::builder()?
            .add_source(File::with_name("wiktionnaire").required(false))
            .add_source(Environment::with_prefix("WIKTIONNAIRE"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("random_url", DEFAULT_RANDOM_URL)?
            .set_default(
                "user_agent",
                concat!("wiktionnaire_parser/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("timeout_secs", 30_i64)?
            .set_default("default_language", DEFAULT_LANGUAGE)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            random_url: DEFAULT_RANDOM_URL.to_string(),
            user_agent: concat!("wiktionnaire_parser/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}
