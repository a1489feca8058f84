//! Configuration loading and management.

use std::path::{Path, PathBuf};

use al_journal::JournalStore;
use anyhow::bail;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one journal file per day.
    pub journal_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            journal_dir: data_dir.join("journal"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (AL_*)
        figment = figment.merge(Env::prefixed("AL_"));

        figment.extract()
    }

    /// Checks the loaded values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.journal_dir.as_os_str().is_empty() {
            bail!(
                "invalid configuration: journal_dir must be set, e.g. journal_dir = \"/var/lib/al/journal\""
            );
        }
        if self.journal_dir.exists() && !self.journal_dir.is_dir() {
            bail!(
                "invalid configuration: journal_dir {} is not a directory",
                self.journal_dir.display()
            );
        }
        Ok(())
    }

    /// The journal store this configuration points at.
    #[must_use]
    pub fn store(&self) -> JournalStore {
        JournalStore::new(&self.journal_dir)
    }
}

/// Returns the platform-specific config directory for al.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("al"))
}

/// Returns the platform-specific data directory for al.
///
/// On Linux: `~/.local/share/al`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("al"))
}
