//! Batch configuration (`glbpress.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize::{NormalizeOptions, ReferencePolicy};

/// Conventional config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "glbpress.toml";

fn default_input_dir() -> PathBuf {
    PathBuf::from("json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_extension() -> String {
    "json".to_string()
}

/// Where to find sources, where to write containers, and how strictly to
/// resolve references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Source file extension, without the dot. Matched case-insensitively.
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub references: ReferencePolicy,
    /// Directory buffer URIs resolve against. Defaults to each source
    /// file's own directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_dir: Option<PathBuf>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            recursive: false,
            references: ReferencePolicy::default(),
            resource_dir: None,
        }
    }
}

impl ConvertConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file. Relative directories in it are taken relative to
    /// the file's own directory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&fs::read_to_string(path)?)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.input_dir = base.join(&config.input_dir);
            config.output_dir = base.join(&config.output_dir);
            config.resource_dir = config.resource_dir.map(|dir| base.join(dir));
        }

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            references: self.references,
        }
    }

    /// Directory buffer URIs of `source` resolve against.
    #[must_use]
    pub fn resource_dir_for(&self, source: &Path) -> PathBuf {
        self.resource_dir.clone().unwrap_or_else(|| {
            source
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        })
    }
}
