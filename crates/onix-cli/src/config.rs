//! Run configuration: built-in defaults, an optional TOML file, then flags.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "ONIX_NORMALIZE_CONFIG";
/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "onix-normalize.toml";

/// Input and output locations of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub classification_csv: PathBuf,
    pub subject_headings_csv: PathBuf,
    pub output: PathBuf,
    pub state: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("xml_metadata"),
            classification_csv: PathBuf::from("bisac-codes.csv"),
            subject_headings_csv: PathBuf::from("subject-headings.csv"),
            output: PathBuf::from("output/book-metadata.csv"),
            state: PathBuf::from("data/additional-book-info.json"),
        }
    }
}

/// Optional per-invocation overrides, usually from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub source_dir: Option<PathBuf>,
    pub classification_csv: Option<PathBuf>,
    pub subject_headings_csv: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub state: Option<PathBuf>,
}

impl PipelineConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read configuration {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Load the configuration for this process.
    ///
    /// An explicit path wins over `ONIX_NORMALIZE_CONFIG`, which wins over
    /// `onix-normalize.toml` in the working directory. Only the last one may
    /// be absent; without any file the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = std::env::var_os(CONFIG_ENV_VAR);
        match resolve_config_path(explicit, env, Path::new(DEFAULT_CONFIG_FILE)) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides; unset fields keep the configured value.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            source_dir,
            classification_csv,
            subject_headings_csv,
            output,
            state,
        } = overrides;
        if let Some(value) = source_dir {
            self.source_dir = value;
        }
        if let Some(value) = classification_csv {
            self.classification_csv = value;
        }
        if let Some(value) = subject_headings_csv {
            self.subject_headings_csv = value;
        }
        if let Some(value) = output {
            self.output = value;
        }
        if let Some(value) = state {
            self.state = value;
        }
        self
    }
}

/// Pick the configuration file to read, if any.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env: Option<OsString>,
    working_dir_default: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(value));
    }
    working_dir_default
        .is_file()
        .then(|| working_dir_default.to_path_buf())
}
