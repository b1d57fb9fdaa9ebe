// ABOUTME: Configuration types and parsing for scmpush.yml.
// ABOUTME: Handles YAML parsing, secret interpolation, and slot overrides.

mod deserialize;
mod env_value;
mod init;

pub use env_value::EnvValue;
pub use init::init_config;

use crate::credentials::PublishingCredentials;
use crate::error::{Error, Result};
use crate::site::SiteIdentity;
use crate::types::{AppName, ScmUri, SlotName};
use deserialize::{deserialize_app_name, deserialize_scm_uri};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "scmpush.yml";
pub const CONFIG_FILENAME_ALT: &str = "scmpush.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".scmpush/config.yml";

/// Environment variable the generated template reads the password from.
pub const PASSWORD_ENV_VAR: &str = "SCMPUSH_PASSWORD";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_app_name")]
    pub app: AppName,

    #[serde(default)]
    pub resource_group: Option<String>,

    #[serde(deserialize_with = "deserialize_scm_uri")]
    pub scm_uri: ScmUri,

    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub slots: HashMap<String, SlotConfig>,

    /// Slot selected through `for_slot`; `None` targets the production app.
    #[serde(skip)]
    pub slot: Option<SlotName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    pub username: EnvValue,
    pub password: EnvValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotConfig {
    #[serde(deserialize_with = "deserialize_scm_uri")]
    pub scm_uri: ScmUri,

    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Retarget the config at a deployment slot.
    ///
    /// The slot's SCM address replaces the app's. Credentials are replaced only
    /// when the slot declares its own.
    pub fn for_slot(&self, name: &str) -> Result<Config> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| Error::UnknownSlot(name.to_string()))?;
        let slot_name =
            SlotName::new(name).map_err(|e| Error::InvalidConfig(format!("slot {name}: {e}")))?;

        let mut merged = self.clone();
        merged.scm_uri = slot.scm_uri.clone();
        if let Some(ref credentials) = slot.credentials {
            merged.credentials = credentials.clone();
        }
        merged.slot = Some(slot_name);

        Ok(merged)
    }

    /// Resolve the publishing credentials, reading any referenced env vars.
    pub fn resolve_credentials(&self) -> Result<PublishingCredentials> {
        let username = self.credentials.username.resolve()?;
        let password = self.credentials.password.resolve()?;

        if username.is_empty() {
            return Err(Error::InvalidConfig(
                "publishing username cannot be empty".to_string(),
            ));
        }

        Ok(PublishingCredentials::new(
            username,
            password,
            self.scm_uri.clone(),
        ))
    }

    /// Identity of the targeted app (or slot), for the returned descriptor.
    pub fn identity(&self) -> SiteIdentity {
        SiteIdentity {
            app: self.app.clone(),
            slot: self.slot.clone(),
            resource_group: self.resource_group.clone(),
            scm_uri: self.scm_uri.clone(),
        }
    }
}
