use super::{Command, CommandError, CommandOutput, CommandSummary, ShellAction};
use crate::core::context::ExecutionContext;

#[derive(Clone)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::action(ShellAction::Exit))
    }
}

#[derive(Clone)]
pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        Ok(CommandOutput::action(ShellAction::ClearScreen))
    }
}

#[derive(Clone)]
pub struct HelpCommand {
    commands: Vec<CommandSummary>,
}

impl HelpCommand {
    pub fn new(commands: Vec<CommandSummary>) -> Self {
        Self { commands }
    }

    fn overview(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|c| c.usage.len())
            .max()
            .unwrap_or(0)
            .max("ai <request>".len());

        let mut lines = vec!["Available commands:".to_string()];
        for command in &self.commands {
            lines.push(format!("  {:<width$}  {}", command.usage, command.summary));
        }
        lines.push(format!(
            "  {:<width$}  {}",
            "ai <request>", "Translate a natural-language request into commands"
        ));
        lines.push(String::new());
        lines.push(
            "Example: ai create a folder called test and move notes.txt into it".to_string(),
        );
        lines.join("\n")
    }
}

impl Command for HelpCommand {
    fn execute(
        &self,
        args: &[String],
        _ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let Some(topic) = args.first() else {
            return Ok(CommandOutput::text(self.overview()));
        };

        if topic == "ai" {
            return Ok(CommandOutput::text(
                "ai <request> - translate a natural-language request into commands",
            ));
        }

        self.commands
            .iter()
            .find(|c| &c.name == topic)
            .map(|c| CommandOutput::text(format!("{} - {}", c.usage, c.summary)))
            .ok_or_else(|| CommandError::UnknownCommand(topic.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::{default_registry, CommandExecutor, ErrorKind, ParsedCommand};
    use tempfile::TempDir;

    fn setup() -> (CommandExecutor, ExecutionContext, TempDir) {
        let dir = TempDir::new().unwrap();
        let ctx = ExecutionContext::in_dir(dir.path()).unwrap();
        (CommandExecutor::new(default_registry().unwrap()), ctx, dir)
    }

    #[test]
    fn test_exit_requests_action() {
        let (executor, mut ctx, _dir) = setup();
        let result = executor.execute(&ParsedCommand::new("exit", Vec::<String>::new()), &mut ctx);
        assert!(result.success);
        assert_eq!(result.action, Some(ShellAction::Exit));
    }

    #[test]
    fn test_clear_requests_action() {
        let (executor, mut ctx, _dir) = setup();
        let result = executor.execute_line("clear", &mut ctx).unwrap();
        assert_eq!(result.action, Some(ShellAction::ClearScreen));
    }

    #[test]
    fn test_help_lists_every_command() {
        let (executor, mut ctx, _dir) = setup();
        let result = executor.execute_line("help", &mut ctx).unwrap();
        for name in executor.registry().names() {
            assert!(result.message.contains(&name), "help misses {}", name);
        }
        assert!(result.message.contains("ai <request>"));
    }

    #[test]
    fn test_help_topic() {
        let (executor, mut ctx, _dir) = setup();
        let result = executor.execute_line("help cp", &mut ctx).unwrap();
        assert_eq!(result.message, "cp <src> <dest> - Copy file or directory");

        let result = executor.execute_line("help nothing", &mut ctx).unwrap();
        assert!(result.is_kind(ErrorKind::UnknownCommand));
    }
}
