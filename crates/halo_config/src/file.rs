use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while reading or writing a toml run file.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
}

/// Deserialize data from a toml file.
pub fn import_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ImportError> {
    let string = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&string).map_err(|source| ImportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize data to a toml file.
pub fn export_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), ImportError> {
    let string = toml::to_string_pretty(value).map_err(|source| ImportError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, string).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
