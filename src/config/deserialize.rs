// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates app names and SCM addresses while parsing.

use serde::Deserialize;

use crate::types::{AppName, ScmUri};

pub fn deserialize_app_name<'de, D>(deserializer: D) -> Result<AppName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    AppName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_scm_uri<'de, D>(deserializer: D) -> Result<ScmUri, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ScmUri::parse(&s).map_err(serde::de::Error::custom)
}
