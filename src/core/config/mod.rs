use std::{collections::BTreeMap, env, path::Path, str::FromStr, time::Duration};

mod loader;
mod paths;

use loader::ConfigLoader;
pub use paths::ConfigPaths;

/// Keys picked up from the process environment.
const ENV_KEYS: &[&str] = &[
    "OPENAI_API_KEY",
    "LLM_API_KEY",
    "API_KEY",
    "TERN_PROVIDER",
    "TERN_MODEL",
    "TERN_API_URL",
    "TERN_MAX_TOKENS",
    "TERN_TEMPERATURE",
    "TERN_TIMEOUT_SECS",
];

/// First present key wins.
const API_KEY_NAMES: &[&str] = &["OPENAI_API_KEY", "LLM_API_KEY", "API_KEY"];

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GOOGLE_MODEL: &str = "gemini-1.5-flash";
const GOOGLE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Google,
}

impl FromStr for Provider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "google" | "gemini" => Ok(Provider::Google),
            _ => Err(()),
        }
    }
}

/// Everything the model-backed interpreter needs. `api_key == None` means
/// the model is never called.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub provider: Provider,
    pub model: String,
    pub api_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl AiSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

pub struct Config {
    paths: ConfigPaths,
    values: BTreeMap<String, String>,
}

impl Config {
    pub fn new(custom_rc: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::with_paths(ConfigPaths::new(custom_rc)?))
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Config {
            paths,
            values: BTreeMap::new(),
        }
    }

    /// Reads the settings files, then overlays the process environment.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        self.load_files()?;
        self.overlay(env::vars());
        Ok(())
    }

    pub fn load_files(&mut self) -> Result<(), ConfigError> {
        let paths = self.paths.clone();
        ConfigLoader::new(&paths).load_configs(self)
    }

    /// Applies known keys from `vars`, overriding file values.
    pub fn overlay<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if ENV_KEYS.contains(&key.as_str()) && !value.trim().is_empty() {
                self.values.insert(key, value);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    fn parsed<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            }),
            None => Ok(default),
        }
    }

    pub fn ai_settings(&self) -> Result<AiSettings, ConfigError> {
        let api_key = API_KEY_NAMES
            .iter()
            .find_map(|name| self.get(name))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let provider = match self.get("TERN_PROVIDER") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TERN_PROVIDER".to_string(),
                value: raw.to_string(),
            })?,
            None if api_key.as_deref().is_some_and(|k| k.starts_with("AIza")) => Provider::Google,
            None => Provider::OpenAi,
        };

        let (default_model, default_url) = match provider {
            Provider::OpenAi => (OPENAI_MODEL, OPENAI_URL),
            Provider::Google => (GOOGLE_MODEL, GOOGLE_URL),
        };

        Ok(AiSettings {
            api_key,
            provider,
            model: self.get("TERN_MODEL").unwrap_or(default_model).to_string(),
            api_url: self.get("TERN_API_URL").unwrap_or(default_url).to_string(),
            max_tokens: self.parsed("TERN_MAX_TOKENS", 500)?,
            temperature: self.parsed("TERN_TEMPERATURE", 0.1)?,
            timeout: Duration::from_secs(self.parsed("TERN_TIMEOUT_SECS", 10)?),
        })
    }
}
