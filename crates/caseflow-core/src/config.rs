use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency tag shown next to order totals when the config does not
/// override it.
pub const DEFAULT_CURRENCY: &str = "MXN";

/// Optional user configuration. Missing file means defaults; an
/// invalid file is an error the CLI surfaces with instructions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaseflowConfig {
    pub version: u32,
    pub storage: Option<StorageSection>,
    pub storefront: Option<StorefrontSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSection {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontSection {
    pub currency: Option<String>,
}

impl CaseflowConfig {
    pub fn storage_dir(&self) -> Option<&str> {
        self.storage.as_ref().and_then(|section| section.dir.as_deref())
    }

    pub fn currency(&self) -> &str {
        self.storefront
            .as_ref()
            .and_then(|section| section.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("caseflow")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<CaseflowConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: CaseflowConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn validate_config(config: &CaseflowConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    if let Some(dir) = config.storage_dir()
        && dir.trim().is_empty()
    {
        return Err(ConfigError::Validation {
            message: "storage.dir must be non-empty when present".to_string(),
        });
    }

    if let Some(section) = &config.storefront
        && let Some(currency) = &section.currency
        && currency.trim().is_empty()
    {
        return Err(ConfigError::Validation {
            message: "storefront.currency must be non-empty when present".to_string(),
        });
    }

    Ok(())
}
