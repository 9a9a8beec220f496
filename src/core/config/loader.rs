use std::{fs, path::Path};

use log::debug;

use super::{Config, ConfigError, ConfigPaths};

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    /// Later sources win: rc file, then `.env`.
    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        self.source_if_exists(&self.paths.rc_path, config)?;
        self.source_if_exists(&self.paths.dotenv_path, config)?;
        Ok(())
    }

    fn source_if_exists(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        if path.is_file() {
            debug!("reading settings from {}", path.display());
            let content = fs::read_to_string(path)?;
            for line in content.lines() {
                self.process_line(line, config);
            }
        }
        Ok(())
    }

    fn process_line(&self, line: &str, config: &mut Config) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let assignment = line.strip_prefix("export ").unwrap_or(line);
        if let Some((name, value)) = assignment.split_once('=') {
            let name = name.trim();
            let value = unquote(value.trim());
            if !name.is_empty() {
                config.set(name, value);
            }
        }
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_process_line_forms() {
        let paths = ConfigPaths::at("/nonexistent/rc", "/nonexistent/.env");
        let loader = ConfigLoader::new(&paths);
        let mut config = Config::with_paths(paths.clone());

        loader.process_line("export TERN_MODEL=\"gpt-4o-mini\"", &mut config);
        loader.process_line("API_KEY='abc123'", &mut config);
        loader.process_line("# API_KEY=commented", &mut config);
        loader.process_line("garbage line", &mut config);

        assert_eq!(config.get("TERN_MODEL"), Some("gpt-4o-mini"));
        assert_eq!(config.get("API_KEY"), Some("abc123"));
    }

    #[test]
    fn test_dotenv_overrides_rc() {
        let dir = TempDir::new().unwrap();
        let rc = dir.path().join("ternrc");
        let dotenv = dir.path().join(".env");
        fs::write(&rc, "TERN_MODEL=from-rc\nTERN_MAX_TOKENS=100\n").unwrap();
        fs::write(&dotenv, "TERN_MODEL=from-dotenv\n").unwrap();

        let paths = ConfigPaths::at(&rc, &dotenv);
        let mut config = Config::with_paths(paths.clone());
        ConfigLoader::new(&paths).load_configs(&mut config).unwrap();

        assert_eq!(config.get("TERN_MODEL"), Some("from-dotenv"));
        assert_eq!(config.get("TERN_MAX_TOKENS"), Some("100"));
    }

    #[test]
    fn test_missing_files_are_fine() {
        let paths = ConfigPaths::at("/nonexistent/rc", "/nonexistent/.env");
        let mut config = Config::with_paths(paths.clone());
        assert!(ConfigLoader::new(&paths).load_configs(&mut config).is_ok());
        assert_eq!(config.get("API_KEY"), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
    }
}
