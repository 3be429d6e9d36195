//! Supported content platforms.
//!
//! This is the only place the platform identifiers are spelled out; schemas,
//! prompts and validation all go through [`Platform`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Qiita,
    Zenn,
    Note,
}

impl Platform {
    /// Every supported platform, in the order they are presented to users.
    pub const ALL: [Platform; 3] = [Platform::Qiita, Platform::Zenn, Platform::Note];

    /// Identifier accepted in tool requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Qiita => "qiita",
            Platform::Zenn => "zenn",
            Platform::Note => "note",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Qiita => "Qiita",
            Platform::Zenn => "Zenn",
            Platform::Note => "note",
        }
    }

    /// Exact, case-sensitive lookup of an identifier.
    pub fn parse(identifier: &str) -> Option<Platform> {
        Self::ALL.into_iter().find(|p| p.as_str() == identifier)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::parse(s).ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

/// Is `identifier` a recognized platform?
pub fn is_supported(identifier: &str) -> bool {
    Platform::parse(identifier).is_some()
}

/// All platform identifiers, for schemas and user-facing guidance.
pub fn platform_names() -> Vec<String> {
    Platform::ALL.iter().map(|p| p.as_str().to_string()).collect()
}
