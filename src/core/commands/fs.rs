use std::fs::{self, File, Metadata};
use std::io;
use std::os::unix::fs::{symlink, MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use super::{Command, CommandError, CommandOutput};
use crate::core::context::ExecutionContext;
use crate::path::wildcard::{self, WildcardError};

/// Splits leading `-xyz` options from operands. Every option letter must be
/// in `allowed`.
fn split_options<'a>(
    cmd: &str,
    args: &'a [String],
    allowed: &str,
) -> Result<(Vec<char>, &'a [String]), CommandError> {
    let mut letters = Vec::new();
    let mut index = 0;
    while let Some(arg) = args.get(index) {
        let Some(options) = arg.strip_prefix('-').filter(|o| !o.is_empty()) else {
            break;
        };
        for letter in options.chars() {
            if !allowed.contains(letter) {
                return Err(CommandError::InvalidArguments(format!(
                    "{}: invalid option -- '{}'",
                    cmd, letter
                )));
            }
            letters.push(letter);
        }
        index += 1;
    }
    Ok((letters, &args[index..]))
}

/// Resolves an operand and expands simple wildcards. A wildcard matching
/// nothing is reported as a missing path.
fn expand_operand(
    cmd: &str,
    ctx: &ExecutionContext,
    arg: &str,
) -> Result<Vec<PathBuf>, CommandError> {
    let paths = wildcard::expand(&ctx.resolve(arg)).map_err(|e| match e {
        WildcardError::Io(err) => {
            CommandError::from_io(format!("{}: cannot access '{}'", cmd, arg), err)
        }
        other => CommandError::InvalidArguments(format!("{}: {}", cmd, other)),
    })?;

    if paths.is_empty() {
        return Err(CommandError::PathNotFound(format!(
            "{}: cannot access '{}'",
            cmd, arg
        )));
    }
    Ok(paths)
}

/// Refuses to delete or move anything that contains the current directory.
fn guard_current_dir(
    cmd: &str,
    ctx: &ExecutionContext,
    path: &Path,
    shown: &str,
) -> Result<(), CommandError> {
    if ctx.current_dir().starts_with(path) || path.parent().is_none() {
        return Err(CommandError::InvalidArguments(format!(
            "{}: refusing to touch '{}': it contains the current directory",
            cmd, shown
        )));
    }
    Ok(())
}

fn shown(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn mode_string(meta: &Metadata) -> String {
    let file_type = meta.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else {
        '-'
    };

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            symlink(fs::read_link(entry.path())?, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Where `source` lands: inside `dest` when it is a directory.
fn landing_path(source: &Path, dest: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) if dest.is_dir() => dest.join(name),
        _ => dest.to_path_buf(),
    }
}

/// True when `target` exists and is the same inode as `source`.
fn same_file(source: &Metadata, target: &Path) -> bool {
    fs::metadata(target)
        .map(|meta| meta.dev() == source.dev() && meta.ino() == source.ino())
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let (options, operands) = split_options("ls", args, "al")?;
        if operands.len() > 1 {
            return Err(CommandError::InvalidArguments(
                "ls: only one path may be listed at a time".to_string(),
            ));
        }
        let show_hidden = options.contains(&'a');

        let (path, label) = match operands.first() {
            Some(arg) => (ctx.resolve(arg), arg.clone()),
            None => (ctx.current_dir().to_path_buf(), ".".to_string()),
        };
        let context = format!("ls: cannot access '{}'", label);

        let meta = fs::metadata(&path).map_err(|e| CommandError::from_io(context.clone(), e))?;
        if !meta.is_dir() {
            return Err(CommandError::NotADirectory(context));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&path).map_err(|e| CommandError::from_io(context.clone(), e))? {
            let entry = entry.map_err(|e| CommandError::from_io(context.clone(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if show_hidden || !name.starts_with('.') {
                entries.push((name, entry.path()));
            }
        }
        entries.sort();

        let lines: Vec<String> = entries
            .into_iter()
            .map(|(name, entry_path)| match fs::symlink_metadata(&entry_path) {
                Ok(meta) => format!("{} {:8} {}", mode_string(&meta), meta.len(), name),
                Err(_) => format!("?????????? {:>8} {}", "?", name),
            })
            .collect();

        Ok(CommandOutput::text(lines.join("\n")))
    }
}

#[derive(Clone)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::text(ctx.current_dir().display().to_string()))
    }
}

#[derive(Clone)]
pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        for name in args {
            let path = ctx.resolve(name);
            let context = format!("mkdir: cannot create directory '{}'", name);

            if fs::symlink_metadata(&path).is_ok() {
                return Err(CommandError::AlreadyExists(context));
            }
            fs::create_dir_all(&path).map_err(|e| CommandError::from_io(context, e))?;
        }
        Ok(CommandOutput::applied())
    }
}

#[derive(Clone)]
pub struct RmdirCommand;

impl Command for RmdirCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        for name in args {
            let path = ctx.resolve(name);
            let context = format!("rmdir: failed to remove '{}'", name);

            let meta = fs::symlink_metadata(&path)
                .map_err(|e| CommandError::from_io(context.clone(), e))?;
            if !meta.is_dir() {
                return Err(CommandError::NotADirectory(context));
            }
            guard_current_dir("rmdir", ctx, &path, name)?;

            let mut listing =
                fs::read_dir(&path).map_err(|e| CommandError::from_io(context.clone(), e))?;
            if listing.next().is_some() {
                return Err(CommandError::DirectoryNotEmpty(context));
            }
            fs::remove_dir(&path).map_err(|e| CommandError::from_io(context, e))?;
        }
        Ok(CommandOutput::applied())
    }
}

#[derive(Clone)]
pub struct RmCommand;

impl RmCommand {
    fn remove(
        ctx: &ExecutionContext,
        path: &Path,
        recursive: bool,
    ) -> Result<(), CommandError> {
        let name = shown(path);
        let context = format!("rm: cannot remove '{}'", name);
        let meta =
            fs::symlink_metadata(path).map_err(|e| CommandError::from_io(context.clone(), e))?;

        if !meta.is_dir() {
            return fs::remove_file(path).map_err(|e| CommandError::from_io(context, e));
        }

        guard_current_dir("rm", ctx, path, &name)?;
        if recursive {
            return fs::remove_dir_all(path).map_err(|e| CommandError::from_io(context, e));
        }

        let mut listing =
            fs::read_dir(path).map_err(|e| CommandError::from_io(context.clone(), e))?;
        if listing.next().is_some() {
            return Err(CommandError::DirectoryNotEmpty(format!(
                "{} (use 'rm -r')",
                context
            )));
        }
        fs::remove_dir(path).map_err(|e| CommandError::from_io(context, e))
    }
}

impl Command for RmCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let (options, operands) = split_options("rm", args, "rRf")?;
        if operands.is_empty() {
            return Err(CommandError::InvalidArguments("rm: missing operand".to_string()));
        }
        let recursive = options.iter().any(|o| matches!(o, 'r' | 'R'));
        let force = options.contains(&'f');

        for operand in operands {
            let paths = match expand_operand("rm", ctx, operand) {
                Ok(paths) => paths,
                Err(CommandError::PathNotFound(_)) if force => continue,
                Err(e) => return Err(e),
            };
            for path in paths {
                match Self::remove(ctx, &path, recursive) {
                    Err(CommandError::PathNotFound(_)) if force => {}
                    other => other?,
                }
            }
        }
        Ok(CommandOutput::applied())
    }
}

#[derive(Clone)]
pub struct CatCommand;

impl Command for CatCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let mut output = String::new();
        for arg in args {
            for path in expand_operand("cat", ctx, arg)? {
                let context = format!("cat: {}", arg);
                let meta =
                    fs::metadata(&path).map_err(|e| CommandError::from_io(context.clone(), e))?;
                if meta.is_dir() {
                    return Err(CommandError::IsADirectory(context));
                }
                let content =
                    fs::read_to_string(&path).map_err(|e| CommandError::from_io(context, e))?;
                output.push_str(&content);
            }
        }
        Ok(CommandOutput::text(output))
    }
}

#[derive(Clone)]
pub struct TouchCommand;

impl Command for TouchCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        for name in args {
            let path = ctx.resolve(name);
            let context = format!("touch: cannot touch '{}'", name);

            let result = if path.exists() {
                File::options()
                    .append(true)
                    .open(&path)
                    .and_then(|file| file.set_modified(SystemTime::now()))
            } else {
                File::create(&path).map(|_| ())
            };
            result.map_err(|e| CommandError::from_io(context, e))?;
        }
        Ok(CommandOutput::applied())
    }
}

#[derive(Clone)]
pub struct CpCommand;

impl CpCommand {
    fn copy_one(source: &Path, dest: &Path) -> Result<(), CommandError> {
        let name = shown(source);
        let meta = fs::metadata(source)
            .map_err(|e| CommandError::from_io(format!("cp: cannot stat '{}'", name), e))?;
        let target = landing_path(source, dest);
        let context = format!("cp: cannot copy '{}'", name);

        if meta.is_dir() {
            if target.starts_with(source) {
                return Err(CommandError::InvalidArguments(format!(
                    "cp: cannot copy a directory, '{}', into itself",
                    name
                )));
            }
            if target.exists() {
                return Err(CommandError::AlreadyExists(format!(
                    "cp: cannot create directory '{}'",
                    target.display()
                )));
            }
            return copy_tree(source, &target).map_err(|e| CommandError::from_io(context, e));
        }
        if same_file(&meta, &target) {
            return Err(CommandError::InvalidArguments(format!(
                "cp: '{}' and '{}' are the same file",
                name,
                target.display()
            )));
        }

        fs::copy(source, &target)
            .map(|_| ())
            .map_err(|e| CommandError::from_io(context, e))
    }
}

impl Command for CpCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let sources = expand_operand("cp", ctx, &args[0])?;
        let dest = ctx.resolve(&args[1]);

        if sources.len() > 1 && !dest.is_dir() {
            return Err(CommandError::NotADirectory(format!("cp: target '{}'", args[1])));
        }
        for source in &sources {
            Self::copy_one(source, &dest)?;
        }
        Ok(CommandOutput::applied())
    }
}

#[derive(Clone)]
pub struct MvCommand;

impl MvCommand {
    fn move_one(ctx: &ExecutionContext, source: &Path, dest: &Path) -> Result<(), CommandError> {
        let name = shown(source);
        fs::symlink_metadata(source)
            .map_err(|e| CommandError::from_io(format!("mv: cannot stat '{}'", name), e))?;
        guard_current_dir("mv", ctx, source, &name)?;

        let target = landing_path(source, dest);
        if target == source {
            return Ok(());
        }
        if target.starts_with(source) {
            return Err(CommandError::InvalidArguments(format!(
                "mv: cannot move '{}' to a subdirectory of itself",
                name
            )));
        }

        let context = format!("mv: cannot move '{}'", name);
        match fs::rename(source, &target) {
            Ok(()) => Ok(()),
            Err(e) if e.raw_os_error() == Some(libc::EXDEV) => {
                // different filesystem: copy then delete
                let copied = if source.is_dir() {
                    copy_tree(source, &target).and_then(|_| fs::remove_dir_all(source))
                } else {
                    fs::copy(source, &target).and_then(|_| fs::remove_file(source))
                };
                copied.map_err(|e| CommandError::from_io(context, e))
            }
            Err(e) => Err(CommandError::from_io(context, e)),
        }
    }
}

impl Command for MvCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let sources = expand_operand("mv", ctx, &args[0])?;
        let dest = ctx.resolve(&args[1]);

        if sources.len() > 1 && !dest.is_dir() {
            return Err(CommandError::NotADirectory(format!("mv: target '{}'", args[1])));
        }
        for source in &sources {
            Self::move_one(ctx, source, &dest)?;
        }
        Ok(CommandOutput::applied())
    }
}

#[derive(Clone)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::text(args.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::ErrorKind;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ExecutionContext) {
        let dir = TempDir::new().unwrap();
        let ctx = ExecutionContext::in_dir(dir.path()).unwrap();
        (dir, ctx)
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ls_sorted_and_hidden() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("b.txt"), "12345").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join(".secret"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let out = LsCommand.execute(&[], &mut ctx).unwrap().message;
        let names: Vec<&str> = out.lines().map(|l| l.rsplit(' ').next().unwrap()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "sub"]);
        assert!(out.lines().nth(1).unwrap().contains("       5 b.txt"));
        assert!(out.lines().nth(2).unwrap().starts_with('d'));

        let all = LsCommand.execute(&args(&["-a"]), &mut ctx).unwrap().message;
        assert!(all.contains(".secret"));
    }

    #[test]
    fn test_ls_errors() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("file"), "").unwrap();

        let missing = LsCommand.execute(&args(&["nope"]), &mut ctx).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::PathNotFound);

        let file = LsCommand.execute(&args(&["file"]), &mut ctx).unwrap_err();
        assert_eq!(file.kind(), ErrorKind::NotADirectory);

        let bad = LsCommand.execute(&args(&["-z"]), &mut ctx).unwrap_err();
        assert_eq!(bad.kind(), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_mkdir_nested_and_existing() {
        let (dir, mut ctx) = setup();

        let out = MkdirCommand.execute(&args(&["a/b/c"]), &mut ctx).unwrap();
        assert!(out.side_effects_applied);
        assert!(dir.path().join("a/b/c").is_dir());

        let err = MkdirCommand.execute(&args(&["a"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(err.to_string(), "mkdir: cannot create directory 'a': File exists");
    }

    #[test]
    fn test_rmdir() {
        let (dir, mut ctx) = setup();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::create_dir(dir.path().join("full")).unwrap();
        fs::write(dir.path().join("full/x"), "").unwrap();

        RmdirCommand.execute(&args(&["empty"]), &mut ctx).unwrap();
        assert!(!dir.path().join("empty").exists());

        let err = RmdirCommand.execute(&args(&["full"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryNotEmpty);

        let err = RmdirCommand.execute(&args(&["full/x"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_rm_files_dirs_and_wildcards() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("a.log"), "").unwrap();
        fs::write(dir.path().join("b.log"), "").unwrap();
        fs::write(dir.path().join("keep.txt"), "").unwrap();
        fs::create_dir_all(dir.path().join("tree/inner")).unwrap();

        RmCommand.execute(&args(&["*.log"]), &mut ctx).unwrap();
        assert!(!dir.path().join("a.log").exists());
        assert!(!dir.path().join("b.log").exists());
        assert!(dir.path().join("keep.txt").exists());

        let err = RmCommand.execute(&args(&["tree"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryNotEmpty);

        RmCommand.execute(&args(&["-r", "tree"]), &mut ctx).unwrap();
        assert!(!dir.path().join("tree").exists());

        let err = RmCommand.execute(&args(&["ghost"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
        assert!(RmCommand.execute(&args(&["-f", "ghost"]), &mut ctx).is_ok());
    }

    #[test]
    fn test_rm_refuses_current_directory() {
        let (dir, mut ctx) = setup();
        fs::create_dir(dir.path().join("here")).unwrap();
        ctx.change_dir(&dir.path().join("here")).unwrap();

        let err = RmCommand.execute(&args(&["-r", "."]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
        let err = RmCommand.execute(&args(&["-r", ".."]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
        assert!(ctx.current_dir().is_dir());
    }

    #[test]
    fn test_cat() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("one.txt"), "first\n").unwrap();
        fs::write(dir.path().join("two.txt"), "second\n").unwrap();
        fs::create_dir(dir.path().join("folder")).unwrap();

        let out = CatCommand
            .execute(&args(&["one.txt", "two.txt"]), &mut ctx)
            .unwrap();
        assert_eq!(out.message, "first\nsecond\n");
        assert!(!out.side_effects_applied);

        let err = CatCommand.execute(&args(&["folder"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IsADirectory);
        let err = CatCommand.execute(&args(&["none.txt"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
    }

    #[test]
    fn test_touch_creates_and_keeps_content() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("old.txt"), "data").unwrap();

        TouchCommand
            .execute(&args(&["new.txt", "old.txt"]), &mut ctx)
            .unwrap();
        assert!(dir.path().join("new.txt").is_file());
        assert_eq!(fs::read_to_string(dir.path().join("old.txt")).unwrap(), "data");

        let err = TouchCommand
            .execute(&args(&["missing/dir/file"]), &mut ctx)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
    }

    #[test]
    fn test_cp_file_and_tree() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("src.txt"), "payload").unwrap();
        fs::create_dir_all(dir.path().join("proj/sub")).unwrap();
        fs::write(dir.path().join("proj/sub/f"), "deep").unwrap();
        fs::create_dir(dir.path().join("dest")).unwrap();

        CpCommand.execute(&args(&["src.txt", "copy.txt"]), &mut ctx).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("copy.txt")).unwrap(), "payload");

        CpCommand.execute(&args(&["src.txt", "dest"]), &mut ctx).unwrap();
        assert!(dir.path().join("dest/src.txt").is_file());

        CpCommand.execute(&args(&["proj", "proj2"]), &mut ctx).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("proj2/sub/f")).unwrap(), "deep");

        let err = CpCommand.execute(&args(&["proj", "proj/sub"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);

        let err = CpCommand.execute(&args(&["nothing", "x"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
    }

    #[test]
    fn test_cp_onto_itself_keeps_content() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("a.txt"), "payload").unwrap();

        let err = CpCommand.execute(&args(&["a.txt", "."]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
        assert!(err.to_string().contains("are the same file"));

        let err = CpCommand.execute(&args(&["a.txt", "a.txt"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "payload");
    }

    #[test]
    fn test_mv_rename_into_dir_and_wildcard() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("demo.txt"), "d").unwrap();
        fs::write(dir.path().join("a.py"), "").unwrap();
        fs::write(dir.path().join("b.py"), "").unwrap();
        fs::create_dir(dir.path().join("backup")).unwrap();

        MvCommand.execute(&args(&["demo.txt", "backup"]), &mut ctx).unwrap();
        assert!(dir.path().join("backup/demo.txt").is_file());
        assert!(!dir.path().join("demo.txt").exists());

        MvCommand.execute(&args(&["*.py", "backup"]), &mut ctx).unwrap();
        assert!(dir.path().join("backup/a.py").is_file());
        assert!(dir.path().join("backup/b.py").is_file());

        MvCommand
            .execute(&args(&["backup/demo.txt", "renamed.txt"]), &mut ctx)
            .unwrap();
        assert!(dir.path().join("renamed.txt").is_file());
    }

    #[test]
    fn test_mv_wildcard_needs_directory_target() {
        let (dir, mut ctx) = setup();
        fs::write(dir.path().join("a.py"), "").unwrap();
        fs::write(dir.path().join("b.py"), "").unwrap();

        let err = MvCommand.execute(&args(&["*.py", "single.py"]), &mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert!(dir.path().join("a.py").exists());
    }

    #[test]
    fn test_echo() {
        let (_dir, mut ctx) = setup();
        let out = EchoCommand.execute(&args(&["hello", "world"]), &mut ctx).unwrap();
        assert_eq!(out.message, "hello world");
        assert_eq!(EchoCommand.execute(&[], &mut ctx).unwrap().message, "");
    }
}
