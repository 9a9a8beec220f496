use super::{Command, CommandError, CommandOutput};
use crate::core::context::ExecutionContext;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let target = match args.first() {
            Some(path) => ctx.resolve(path),
            None => ctx
                .home_dir()
                .map(|home| home.to_path_buf())
                .ok_or_else(|| CommandError::ExecutionFailure("cd: HOME not set".to_string()))?,
        };

        ctx.change_dir(&target)?;
        Ok(CommandOutput::applied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::ErrorKind;
    use crate::path::PathExpander;
    use std::fs;
    use tempfile::TempDir;

    fn context(root: &TempDir) -> ExecutionContext {
        let home = root.path().join("home");
        fs::create_dir_all(&home).unwrap();
        ExecutionContext::with_expander(root.path(), PathExpander::with_home(home)).unwrap()
    }

    #[test]
    fn test_cd_home() {
        let root = TempDir::new().unwrap();
        let mut ctx = context(&root);
        assert!(CdCommand::new().execute(&[], &mut ctx).is_ok());
        assert!(ctx.current_dir().ends_with("home"));
    }

    #[test]
    fn test_cd_relative_and_parent() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("a/b")).unwrap();
        let mut ctx = context(&root);
        let cmd = CdCommand::new();

        cmd.execute(&["a/b".to_string()], &mut ctx).unwrap();
        assert!(ctx.current_dir().ends_with("a/b"));

        cmd.execute(&["..".to_string()], &mut ctx).unwrap();
        assert!(ctx.current_dir().ends_with("a"));
    }

    #[test]
    fn test_cd_invalid() {
        let root = TempDir::new().unwrap();
        let mut ctx = context(&root);
        let before = ctx.current_dir().to_path_buf();

        let err = CdCommand::new()
            .execute(&["/nonexistent/path".to_string()], &mut ctx)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
        assert_eq!(err.to_string(), "cd: /nonexistent/path: No such file or directory");
        assert_eq!(ctx.current_dir(), before);
    }
}
