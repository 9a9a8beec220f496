use super::ConfigError;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub dotenv_path: PathBuf,
}

impl ConfigPaths {
    /// `~/.ternrc` unless `custom` names another file, plus `./.env`.
    pub fn new(custom: Option<&Path>) -> Result<Self, ConfigError> {
        let rc_path = match custom {
            Some(path) => path.to_path_buf(),
            None => dirs::home_dir()
                .ok_or(ConfigError::HomeDirNotFound)?
                .join(".ternrc"),
        };

        Ok(ConfigPaths {
            rc_path,
            dotenv_path: env::current_dir()?.join(".env"),
        })
    }

    pub fn at(rc_path: impl Into<PathBuf>, dotenv_path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: rc_path.into(),
            dotenv_path: dotenv_path.into(),
        }
    }
}
