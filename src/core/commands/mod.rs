use std::fmt;
use std::io;

mod builtin;
mod cd;
mod executor;
mod fs;
mod history;
mod parse;
mod registry;
mod system;

pub use builtin::{ClearCommand, ExitCommand, HelpCommand};
pub use cd::CdCommand;
pub use executor::CommandExecutor;
pub use fs::{
    CatCommand, CpCommand, EchoCommand, LsCommand, MkdirCommand, MvCommand, PwdCommand,
    RmCommand, RmdirCommand, TouchCommand,
};
pub use history::HistoryCommand;
pub use parse::ParsedCommand;
pub use registry::{CommandRegistry, CommandSpec, CommandSummary};
pub use system::{CpuCommand, DiskCommand, MemCommand, PsCommand};

use super::context::ExecutionContext;

/// Machine-distinguishable failure category carried by every failed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownCommand,
    InvalidArguments,
    PathNotFound,
    PermissionDenied,
    AlreadyExists,
    NotADirectory,
    IsADirectory,
    DirectoryNotEmpty,
    Io,
    ExecutionFailure,
    DuplicateCommand,
    InterpretationUnavailable,
    ExternalServiceFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}: command not found. Type 'help' for available commands.")]
    UnknownCommand(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}: No such file or directory")]
    PathNotFound(String),
    #[error("{0}: Permission denied")]
    PermissionDenied(String),
    #[error("{0}: File exists")]
    AlreadyExists(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
    #[error("{0}: Is a directory")]
    IsADirectory(String),
    #[error("{0}: Directory not empty")]
    DirectoryNotEmpty(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    ExecutionFailure(String),
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            CommandError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            CommandError::PathNotFound(_) => ErrorKind::PathNotFound,
            CommandError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            CommandError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            CommandError::NotADirectory(_) => ErrorKind::NotADirectory,
            CommandError::IsADirectory(_) => ErrorKind::IsADirectory,
            CommandError::DirectoryNotEmpty(_) => ErrorKind::DirectoryNotEmpty,
            CommandError::Io { .. } => ErrorKind::Io,
            CommandError::ExecutionFailure(_) => ErrorKind::ExecutionFailure,
            CommandError::DuplicateCommand(_) => ErrorKind::DuplicateCommand,
        }
    }

    /// Maps an OS error onto the matching kind. `context` is the message
    /// prefix, e.g. `"mkdir: cannot create directory 'x'"`.
    pub fn from_io(context: impl Into<String>, err: io::Error) -> Self {
        let context = context.into();
        match err.kind() {
            io::ErrorKind::NotFound => CommandError::PathNotFound(context),
            io::ErrorKind::PermissionDenied => CommandError::PermissionDenied(context),
            io::ErrorKind::AlreadyExists => CommandError::AlreadyExists(context),
            _ => CommandError::Io {
                context,
                source: err,
            },
        }
    }
}

/// Requests the shell loop acts on; the core never exits or draws itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Exit,
    ClearScreen,
}

/// What a handler reports back on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub message: String,
    pub side_effects_applied: bool,
    pub action: Option<ShellAction>,
}

impl CommandOutput {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn applied() -> Self {
        Self {
            side_effects_applied: true,
            ..Self::default()
        }
    }

    pub fn action(action: ShellAction) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    pub side_effects_applied: bool,
    pub kind: Option<ErrorKind>,
    pub action: Option<ShellAction>,
}

impl ExecutionResult {
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            side_effects_applied: false,
            kind: Some(kind),
            action: None,
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == Some(kind)
    }
}

impl From<CommandOutput> for ExecutionResult {
    fn from(output: CommandOutput) -> Self {
        Self {
            success: true,
            message: output.message,
            side_effects_applied: output.side_effects_applied,
            kind: None,
            action: output.action,
        }
    }
}

impl From<CommandError> for ExecutionResult {
    fn from(err: CommandError) -> Self {
        ExecutionResult::failure(err.kind(), err.to_string())
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub trait Command {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError>;
}

/// Registry holding every command the shell exposes.
pub fn default_registry() -> Result<CommandRegistry, CommandError> {
    let mut registry = CommandRegistry::new();

    let specs = vec![
        CommandSpec::new("ls", LsCommand, 0, Some(2))
            .describe("ls [-a] [path]", "List files and directories"),
        CommandSpec::new("cd", CdCommand::new(), 0, Some(1))
            .describe("cd [path]", "Change directory"),
        CommandSpec::new("pwd", PwdCommand, 0, Some(0))
            .describe("pwd", "Print current directory"),
        CommandSpec::new("mkdir", MkdirCommand, 1, None)
            .describe("mkdir <dir>...", "Create directory"),
        CommandSpec::new("rmdir", RmdirCommand, 1, None)
            .describe("rmdir <dir>...", "Remove empty directory"),
        CommandSpec::new("rm", RmCommand, 1, None)
            .describe("rm [-r] <path>...", "Remove file or directory"),
        CommandSpec::new("cat", CatCommand, 1, None)
            .describe("cat <file>...", "Display file contents"),
        CommandSpec::new("touch", TouchCommand, 1, None)
            .describe("touch <file>...", "Create empty file"),
        CommandSpec::new("cp", CpCommand, 2, Some(2))
            .describe("cp <src> <dest>", "Copy file or directory"),
        CommandSpec::new("mv", MvCommand, 2, Some(2))
            .describe("mv <src> <dest>", "Move/rename file or directory"),
        CommandSpec::new("echo", EchoCommand, 0, None)
            .describe("echo [text]...", "Display text"),
        CommandSpec::new("cpu", CpuCommand, 0, Some(0))
            .describe("cpu", "Show CPU usage"),
        CommandSpec::new("mem", MemCommand, 0, Some(0))
            .describe("mem", "Show memory usage"),
        CommandSpec::new("ps", PsCommand, 0, Some(1))
            .describe("ps [limit]", "List running processes"),
        CommandSpec::new("disk", DiskCommand, 0, Some(0))
            .describe("disk", "Show disk usage"),
        CommandSpec::new("history", HistoryCommand, 0, Some(1))
            .describe("history [n]", "Show command history"),
        CommandSpec::new("clear", ClearCommand, 0, Some(0))
            .describe("clear", "Clear screen"),
        CommandSpec::new("exit", ExitCommand, 0, Some(0))
            .describe("exit", "Exit the shell"),
    ];
    for spec in specs {
        registry.register(spec)?;
    }

    let help_summary = CommandSummary {
        name: "help".to_string(),
        usage: "help [command]".to_string(),
        summary: "Show help".to_string(),
    };
    let mut summaries = registry.summaries();
    summaries.push(help_summary.clone());
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    registry.register(
        CommandSpec::new("help", HelpCommand::new(summaries), 0, Some(1))
            .describe(&help_summary.usage, &help_summary.summary),
    )?;

    Ok(registry)
}
