// ABOUTME: Web app and deployment slot name validation.
// ABOUTME: Names are host-name labels: ASCII alphanumerics and inner hyphens.

use std::fmt;
use thiserror::Error;

/// Longest site name the hosting platform accepts.
const MAX_APP_NAME_LEN: usize = 60;

/// Slot names end up inside `<app>-<slot>` host names, so they stay shorter.
const MAX_SLOT_NAME_LEN: usize = 59;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name exceeds maximum length of {0} characters")]
    TooLong(usize),

    #[error("name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("invalid character in name: '{0}'")]
    InvalidChar(char),
}

fn validate_label(value: &str, max_len: usize) -> Result<(), NameError> {
    if value.is_empty() {
        return Err(NameError::Empty);
    }

    if value.len() > max_len {
        return Err(NameError::TooLong(max_len));
    }

    if value.starts_with('-') {
        return Err(NameError::StartsWithHyphen);
    }

    if value.ends_with('-') {
        return Err(NameError::EndsWithHyphen);
    }

    match value.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '-') {
        Some(c) => Err(NameError::InvalidChar(c)),
        None => Ok(()),
    }
}

/// Name of a web application on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, NameError> {
        let value = value.trim();
        validate_label(value, MAX_APP_NAME_LEN)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a deployment slot (e.g. `staging`) of a web application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotName(String);

impl SlotName {
    pub fn new(value: &str) -> Result<Self, NameError> {
        let value = value.trim();
        validate_label(value, MAX_SLOT_NAME_LEN)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
