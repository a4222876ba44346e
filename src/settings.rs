//! Site credentials loaded from `settings.yml`.
//!
//! The file maps each site URL to the script credentials used against that
//! site's API. Validation runs at load time so a broken settings file is
//! reported before any connection is attempted.
//!
//! ```yaml
//! https://mystudio.example.com:
//!     script_name: usage_report
//!     script_key: 0123456789abcdef
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Name of the settings file, looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "settings.yml";

/// Script credentials for one site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteCredentials {
    #[serde(default)]
    pub script_name: String,
    #[serde(default)]
    pub script_key: String,
}

/// Validated contents of `settings.yml`.
///
/// Sites are keyed by URL in a `BTreeMap` so every run visits them in the
/// same order regardless of file order.
#[derive(Debug)]
pub struct Settings {
    sites: BTreeMap<String, SiteCredentials>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Did not find settings file {}", path.display()))?;
        let sites: BTreeMap<String, SiteCredentials> = serde_yaml::from_str(&content)
            .with_context(|| format!("Could not parse settings file {}", path.display()))?;
        let settings = Self { sites };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.sites.is_empty() {
            anyhow::bail!("Settings are empty, no sites to report on");
        }
        for (url, credentials) in &self.sites {
            if credentials.script_name.is_empty() || credentials.script_key.is_empty() {
                anyhow::bail!("Bad or missing settings for {} in settings.yml", url);
            }
        }
        Ok(())
    }

    /// Consumes the settings, yielding the site map for connection setup.
    pub fn into_sites(self) -> BTreeMap<String, SiteCredentials> {
        self.sites
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
