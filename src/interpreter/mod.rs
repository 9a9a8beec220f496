//! Natural-language front-end: turns free text into an ordered list of
//! commands by trying each strategy in turn.

use std::path::Path;

use log::{debug, warn};

mod model;
mod patterns;
mod providers;

pub use model::{parse_reply, LanguageModel, ModelError, ModelStrategy};
pub use patterns::{default_rules, sanitize, PatternRule, PatternStrategy, Phrase, Utterance};
pub use providers::{client_for, GeminiClient, OpenAiClient};

use crate::core::commands::{CommandSummary, ErrorKind, ParsedCommand};
use crate::core::config::AiSettings;
use crate::core::context::ExecutionContext;

pub struct InterpretationRequest<'a> {
    pub text: &'a str,
    pub current_dir: &'a Path,
    pub available_commands: &'a [CommandSummary],
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("language model unavailable: {0}")]
    ExternalService(#[from] ModelError),
    #[error("refusing to use '{0}' taken from the request")]
    UnsafeArgument(String),
}

impl InterpretError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpretError::ExternalService(_) => ErrorKind::ExternalServiceFailure,
            InterpretError::UnsafeArgument(_) => ErrorKind::InvalidArguments,
        }
    }
}

pub trait InterpretationStrategy {
    fn name(&self) -> &str;

    /// An empty list means "no match"; the next strategy gets a turn.
    fn try_interpret(
        &self,
        request: &InterpretationRequest<'_>,
    ) -> Result<Vec<ParsedCommand>, InterpretError>;
}

pub struct Interpreter {
    strategies: Vec<Box<dyn InterpretationStrategy>>,
    commands: Vec<CommandSummary>,
}

impl Interpreter {
    pub fn new(commands: Vec<CommandSummary>) -> Self {
        Self {
            strategies: Vec::new(),
            commands,
        }
    }

    pub fn with_strategy(mut self, strategy: impl InterpretationStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Model first when a key is configured and `use_model` holds, pattern
    /// rules always.
    pub fn from_settings(
        settings: &AiSettings,
        commands: Vec<CommandSummary>,
        use_model: bool,
    ) -> Self {
        let mut interpreter = Self::new(commands);
        if use_model && settings.is_configured() {
            match client_for(settings) {
                Ok(client) => {
                    interpreter = interpreter.with_strategy(ModelStrategy::new(client));
                }
                Err(e) => warn!("language model disabled: {}", e),
            }
        } else {
            debug!("language model not configured; using pattern rules only");
        }
        interpreter.with_strategy(PatternStrategy::default())
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn interpret(
        &self,
        text: &str,
        ctx: &ExecutionContext,
    ) -> Result<Vec<ParsedCommand>, InterpretError> {
        let request = InterpretationRequest {
            text: text.trim(),
            current_dir: ctx.current_dir(),
            available_commands: &self.commands,
        };

        for strategy in &self.strategies {
            match strategy.try_interpret(&request) {
                Ok(commands) if !commands.is_empty() => {
                    debug!("'{}' interpreted by {}", request.text, strategy.name());
                    return Ok(commands);
                }
                Ok(_) => debug!("{} found no interpretation", strategy.name()),
                Err(InterpretError::ExternalService(e)) => {
                    warn!("{} failed, falling back: {}", strategy.name(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Vec::new())
    }
}
