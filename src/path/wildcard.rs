//! Simple `*` / `?` wildcards in the last path component.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

#[derive(Debug, thiserror::Error)]
pub enum WildcardError {
    #[error("invalid pattern '{0}'")]
    Pattern(String),
    #[error("wildcards are only supported in the last path component: '{0}'")]
    NotLastComponent(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn has_wildcard(arg: &str) -> bool {
    arg.contains(['*', '?'])
}

/// Expands `path` when its file name holds a wildcard. Matches are sorted;
/// hidden entries only match patterns that start with a dot. A path without
/// wildcards is returned as-is, whether it exists or not.
pub fn expand(path: &Path) -> Result<Vec<PathBuf>, WildcardError> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(vec![path.to_path_buf()]);
    };
    if !has_wildcard(name) {
        if path.to_str().is_some_and(has_wildcard) {
            return Err(WildcardError::NotLastComponent(path.display().to_string()));
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if parent.to_str().is_some_and(has_wildcard) {
        return Err(WildcardError::NotLastComponent(path.display().to_string()));
    }

    let pattern = Pattern::new(name).map_err(|_| WildcardError::Pattern(name.to_string()))?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut matches = Vec::new();
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        if let Some(entry_name) = entry.file_name().to_str() {
            if pattern.matches_with(entry_name, options) {
                matches.push(entry.path());
            }
        }
    }
    matches.sort();
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_expand_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.py");
        touch(dir.path(), "a.py");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), ".hidden.py");

        let found = expand(&dir.path().join("*.py")).unwrap();
        assert_eq!(found, vec![dir.path().join("a.py"), dir.path().join("b.py")]);
    }

    #[test]
    fn test_question_mark() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "log1");
        touch(dir.path(), "log22");

        let found = expand(&dir.path().join("log?")).unwrap();
        assert_eq!(found, vec![dir.path().join("log1")]);
    }

    #[test]
    fn test_literal_path_passes_through() {
        let path = Path::new("/does/not/exist.txt");
        assert_eq!(expand(path).unwrap(), vec![path.to_path_buf()]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(expand(&dir.path().join("*.rs")).unwrap().is_empty());
    }

    #[test]
    fn test_wildcard_in_directory_rejected() {
        assert!(matches!(
            expand(Path::new("/tmp/*/file.txt")),
            Err(WildcardError::NotLastComponent(_))
        ));
    }
}
