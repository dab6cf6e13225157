//! Toolkit configuration, loaded from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Font defaults and font search locations.
///
/// Every field is optional in JSON; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Preferred default family, tried before `fallback_families`.
    pub default_family: Option<String>,
    /// Default families tried in order.
    pub fallback_families: Vec<String>,
    /// Size used when a font is requested with size 0.
    pub default_font_size: u32,
    /// Extra directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    pub include_system_fonts: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            default_family: None,
            fallback_families: vec!["Segoe UI".to_owned(), "FreeSans".to_owned()],
            default_font_size: 11,
            font_dirs: Vec::new(),
            include_system_fonts: true,
        }
    }
}

impl ToolkitConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_font_size == 0 {
            return Err(Error::Config("default_font_size must be at least 1".into()));
        }
        if self.default_family.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(Error::Config("default_family must not be empty".into()));
        }
        Ok(())
    }

    /// Default family candidates in preference order.
    pub fn family_preferences(&self) -> Vec<&str> {
        self.default_family
            .iter()
            .chain(self.fallback_families.iter())
            .map(String::as_str)
            .collect()
    }
}
