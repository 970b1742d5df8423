use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::fallback::FallbackStore;
use crate::notify_client::NotifyClient;
use crate::social::SocialConfig;

/// Global configuration, loaded from the `configuration/` directory. See
/// `get_configuration`.
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub notify: NotifySettings,
    pub fallback: FallbackSettings,
    pub social: SocialSettings,
}

/// Notify API configuration
#[derive(Clone, Deserialize)]
pub struct NotifySettings {
    /// Scheme and host only; the endpoint path is fixed in code.
    pub base_url: String,

    /// Upper bound on a single delivery attempt.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl NotifySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// Build the API client described by this configuration.
    pub fn client(&self) -> NotifyClient {
        NotifyClient::new(self.base_url.clone(), self.timeout())
    }
}

/// Fallback store configuration
#[derive(Clone, Deserialize)]
pub struct FallbackSettings {
    /// Directory the queue file lives in; created on first use.
    pub dir: PathBuf,
}

impl FallbackSettings {
    pub fn store(&self) -> FallbackStore {
        FallbackStore::new(self.dir.clone())
    }
}

/// Social links configuration
#[derive(Clone, Deserialize)]
pub struct SocialSettings {
    /// The JSON document holding the `socialMedia` section. Missing or
    /// malformed files are tolerated at load time.
    pub config_path: PathBuf,
}

impl SocialSettings {
    pub fn load(&self) -> SocialConfig {
        SocialConfig::load(&self.config_path)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )?;
        Ok(())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`.
///
/// All fields must be present in these files, otherwise initialisation fails
/// immediately and the program does not start. `APP_`-prefixed env vars
/// override single fields, e.g. `APP_NOTIFY__BASE_URL`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .expect("could not get current dir")
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or("local".to_string())
        .try_into()
        .expect("could not initiate Environment struct");

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        .add_source(
            // env vars are always parsed as String; `serde-aux` turns them
            // back into numbers where needed
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
