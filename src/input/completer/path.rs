use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes paths relative to the session's directory rather than the
/// process's.
#[derive(Clone)]
pub struct PathCompleter {
    base: PathBuf,
}

impl PathCompleter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn set_base(&mut self, base: impl Into<PathBuf>) {
        self.base = base.into();
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = Self::parse_path_input(incomplete);
        let dir_to_search = match &typed_dir {
            Some(dir) => self.base.join(dir),
            None => self.base.clone(),
        };

        self.get_path_matches(&dir_to_search, typed_dir.as_deref(), &file_prefix)
    }

    /// Splits input into the directory as typed and the partial file name.
    fn parse_path_input(incomplete: &str) -> (Option<PathBuf>, String) {
        if incomplete.is_empty() {
            return (None, String::new());
        }
        if incomplete.ends_with('/') {
            return (Some(PathBuf::from(incomplete)), String::new());
        }

        let path = Path::new(incomplete);
        let prefix = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => (Some(parent.to_path_buf()), prefix),
            _ => (None, prefix),
        }
    }

    fn get_path_matches(
        &self,
        dir_to_search: &Path,
        typed_dir: Option<&Path>,
        file_prefix: &str,
    ) -> Vec<Pair> {
        let Ok(entries) = fs::read_dir(dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let hidden = name.starts_with('.') && !file_prefix.starts_with('.');
                if !name.starts_with(file_prefix) || hidden {
                    return None;
                }
                Some(Self::create_completion_pair(&name, &entry.path(), typed_dir))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn create_completion_pair(name: &str, path: &Path, typed_dir: Option<&Path>) -> Pair {
        let shown = match typed_dir {
            Some(dir) => dir.join(name).to_string_lossy().into_owned(),
            None => name.to_string(),
        };

        if path.is_dir() {
            Pair {
                display: format!("{}/", shown),
                replacement: format!("{}/", shown),
            }
        } else {
            Pair {
                display: shown.clone(),
                replacement: format!("{} ", shown),
            }
        }
    }
}
