use log::debug;

use super::commands::{CommandExecutor, ErrorKind, ExecutionResult, ParsedCommand};
use super::context::ExecutionContext;
use crate::interpreter::Interpreter;

/// Prefix that routes a line to the natural-language interpreter.
pub const AI_PREFIX: &str = "ai";

/// One executed (or refused) command produced by a submitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// `None` when nothing was dispatched, e.g. an uninterpretable request.
    pub command: Option<ParsedCommand>,
    pub result: ExecutionResult,
}

impl Step {
    fn refused(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            command: None,
            result: ExecutionResult::failure(kind, message),
        }
    }
}

pub struct Session {
    executor: CommandExecutor,
    interpreter: Interpreter,
    context: ExecutionContext,
}

impl Session {
    pub fn new(
        executor: CommandExecutor,
        interpreter: Interpreter,
        context: ExecutionContext,
    ) -> Self {
        Self {
            executor,
            interpreter,
            context,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    /// Handles one input line. Blank input yields no steps and is not
    /// recorded; every other line is recorded exactly once.
    pub fn submit(&mut self, line: &str) -> Vec<Step> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        match natural_language(line) {
            Some(request) => {
                self.context.record(line);
                self.run_request(request)
            }
            None => self
                .executor
                .execute_line(line, &mut self.context)
                .map(|result| {
                    let command = ParsedCommand::parse(line).ok().flatten();
                    vec![Step { command, result }]
                })
                .unwrap_or_default(),
        }
    }

    fn run_request(&mut self, request: &str) -> Vec<Step> {
        if request.is_empty() {
            return vec![Step::refused(
                ErrorKind::InvalidArguments,
                "ai: describe what you want to do, e.g. 'ai create a folder called notes'",
            )];
        }

        let commands = match self.interpreter.interpret(request, &self.context) {
            Ok(commands) => commands,
            Err(e) => return vec![Step::refused(e.kind(), format!("ai: {}", e))],
        };

        if commands.is_empty() {
            return vec![Step::refused(
                ErrorKind::InterpretationUnavailable,
                format!("ai: could not interpret '{}'", request),
            )];
        }

        debug!("'{}' expands to {} command(s)", request, commands.len());
        commands
            .into_iter()
            .map(|command| {
                let result = self.executor.dispatch(&command, &mut self.context);
                Step {
                    command: Some(command),
                    result,
                }
            })
            .collect()
    }
}

/// The request text when `line` starts with the `ai` keyword.
pub fn natural_language(line: &str) -> Option<&str> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    head.eq_ignore_ascii_case(AI_PREFIX).then_some(rest)
}
