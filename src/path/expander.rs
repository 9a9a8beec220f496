use std::path::{Component, Path, PathBuf};

#[derive(Clone)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Resolves `path` against `base`, expanding a leading `~`. The result is
    /// lexically normalized but not checked against the filesystem.
    pub fn resolve(&self, base: &Path, path: &str) -> PathBuf {
        let expanded = self.expand_tilde(path);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            base.join(expanded)
        };
        normalize(&joined)
    }

    fn expand_tilde(&self, path: &str) -> PathBuf {
        let Some(home) = &self.home else {
            return PathBuf::from(path);
        };

        if path == "~" {
            home.clone()
        } else if let Some(stripped) = path.strip_prefix("~/") {
            let mut home_path = home.clone();
            for part in stripped.split('/') {
                if !part.is_empty() {
                    home_path.push(part);
                }
            }
            home_path
        } else {
            // "~username/path" is left alone
            PathBuf::from(path)
        }
    }
}

/// Removes `.` and folds `..` without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
