use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// On-disk configuration, TOML. Everything is optional; command-line flags
/// override whatever is set here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository metadata directory of the git message store. Unset means
    /// the object-store source is disabled.
    pub git_dir: Option<PathBuf>,
    /// Path of the message database. Its modification time bounds
    /// incremental scans; unset (or absent on disk) means full scans.
    pub database: Option<PathBuf>,
}

impl Config {
    /// Location checked when no `--config` flag is given.
    pub fn default_path() -> PathBuf {
        PathBuf::from(".maildex.toml")
    }

    /// Load and parse the file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("could not parse {}", path.display()))
    }

    /// Configuration for one invocation: an explicitly named file must
    /// exist; the default location may be absent.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
