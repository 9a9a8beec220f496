use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};

use super::{CommandError, CommandRegistry, ErrorKind, ExecutionResult, ParsedCommand};
use crate::core::context::ExecutionContext;

pub struct CommandExecutor {
    registry: CommandRegistry,
}

impl CommandExecutor {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.registry.contains(command)
    }

    /// Runs one command and records it in the history, whatever the outcome.
    pub fn execute(&self, parsed: &ParsedCommand, ctx: &mut ExecutionContext) -> ExecutionResult {
        let result = self.dispatch(parsed, ctx);
        ctx.record(parsed.to_string());
        result
    }

    /// Tokenizes and runs a literal line, recording the raw line once.
    /// Blank lines are ignored and not recorded.
    pub fn execute_line(&self, line: &str, ctx: &mut ExecutionContext) -> Option<ExecutionResult> {
        if line.trim().is_empty() {
            return None;
        }

        let result = match ParsedCommand::parse(line) {
            Ok(Some(parsed)) => self.dispatch(&parsed, ctx),
            Ok(None) => return None,
            Err(e) => e.into(),
        };
        ctx.record(line.trim());
        Some(result)
    }

    /// Lookup, arity check and handler call. Never panics and never touches
    /// the history.
    pub fn dispatch(&self, parsed: &ParsedCommand, ctx: &mut ExecutionContext) -> ExecutionResult {
        let Some(spec) = self.registry.lookup(parsed.name()) else {
            debug!("unknown command '{}'", parsed.name());
            return CommandError::UnknownCommand(parsed.name().to_string()).into();
        };

        let args = parsed.args();
        if !spec.accepts(args.len()) {
            return ExecutionResult::failure(
                ErrorKind::InvalidArguments,
                spec.arity_message(args.len()),
            );
        }

        debug!("dispatching {}", parsed);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| spec.handler.execute(args, ctx)));

        match outcome {
            Ok(Ok(output)) => output.into(),
            Ok(Err(e)) => {
                debug!("{} failed: {:?}", parsed.name(), e.kind());
                e.into()
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown fault".to_string());
                warn!("handler for '{}' panicked: {}", parsed.name(), reason);
                ExecutionResult::failure(
                    ErrorKind::ExecutionFailure,
                    format!("Error executing '{}': {}", parsed.name(), reason),
                )
            }
        }
    }
}
