use super::{Command, CommandError, CommandOutput};
use crate::core::context::ExecutionContext;

#[derive(Clone)]
pub struct HistoryCommand;

impl HistoryCommand {
    fn format_entries(history: &[String], count: usize) -> String {
        let start = history.len().saturating_sub(count);
        history[start..]
            .iter()
            .enumerate()
            .map(|(offset, line)| format!("{:4}  {}", start + offset + 1, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Command for HistoryCommand {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
    ) -> Result<CommandOutput, CommandError> {
        let history = ctx.history();
        let count = match args.first() {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                CommandError::InvalidArguments(format!("history: invalid count '{}'", raw))
            })?,
            None => history.len(),
        };

        if history.is_empty() {
            return Ok(CommandOutput::text("No history available"));
        }
        Ok(CommandOutput::text(Self::format_entries(history, count)))
    }
}
