use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub strict_catalog: bool,
    pub catalog: Option<Catalog>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::builder()?
            .add_source(File::with_name("timetable").required(false))
            // APP_DEBUG, APP_STRICT_CATALOG; nested keys use "__"
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .checked()
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        let mut slots = self.catalog.iter().flat_map(|c| c.time_slots.iter());
        if let Some(slot) = slots.find(|s| !s.is_ordered()) {
            return Err(ConfigError::Message(format!(
                "time slot {slot} must end after it starts"
            )));
        }
        Ok(self)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("debug", false)?
            .set_default("strict_catalog", false)
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_default()
    }
}
