use std::fs;
use std::io;
use std::path::Path;

use gpgit_merge::{Diff3Driver, DriverKind, MergeDriver, MergeLabels, NativeMergeDriver};
use gpgit_types::DEFAULT_CONTROL_DIR;
use serde::{Deserialize, Serialize};

use crate::error::SdkResult;

/// Per-repository settings, stored as `<control>/config.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Name of the control directory under the working root.
    pub control_dir: String,
    /// Branch `HEAD` points at right after `init`.
    pub default_branch: String,
    pub merge: MergeConfig,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            control_dir: DEFAULT_CONTROL_DIR.into(),
            default_branch: "master".into(),
            merge: MergeConfig::default(),
        }
    }
}

impl RepoConfig {
    /// Read the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> SdkResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> SdkResult<()> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub driver: DriverKind,
    /// Executable used when `driver = "diff3"`.
    pub diff3_program: String,
    pub labels: MergeLabels,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::Native,
            diff3_program: "diff3".into(),
            labels: MergeLabels::default(),
        }
    }
}

impl MergeConfig {
    pub fn build_driver(&self) -> Box<dyn MergeDriver> {
        match self.driver {
            DriverKind::Native => Box::new(NativeMergeDriver),
            DriverKind::Diff3 => Box::new(Diff3Driver::new(&self.diff3_program)),
        }
    }
}
