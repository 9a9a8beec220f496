use std::fmt::Write as _;

use super::{InterpretError, InterpretationRequest, InterpretationStrategy};
use crate::core::commands::{CommandSummary, ParsedCommand};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("no API key configured")]
    Unconfigured,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed reply: {0}")]
    MalformedReply(String),
    #[error("model declined: {0}")]
    Declined(String),
}

impl From<ureq::Error> for ModelError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let mut body = response.into_string().unwrap_or_default();
                body.truncate(200);
                ModelError::Status { status, body }
            }
            ureq::Error::Transport(transport) => ModelError::Transport(transport.to_string()),
        }
    }
}

/// A single-shot text completion backend.
pub trait LanguageModel {
    fn complete(&self, instructions: &str, user_text: &str) -> Result<String, ModelError>;
}

pub struct ModelStrategy {
    model: Box<dyn LanguageModel>,
}

impl ModelStrategy {
    pub fn new(model: Box<dyn LanguageModel>) -> Self {
        Self { model }
    }
}

impl InterpretationStrategy for ModelStrategy {
    fn name(&self) -> &str {
        "model"
    }

    fn try_interpret(
        &self,
        request: &InterpretationRequest<'_>,
    ) -> Result<Vec<ParsedCommand>, InterpretError> {
        let instructions = build_instructions(request.available_commands);
        let user_text = format!(
            "Current directory: {}\nConvert this request to shell commands: '{}'",
            request.current_dir.display(),
            request.text
        );

        let reply = self.model.complete(&instructions, &user_text)?;
        Ok(parse_reply(&reply, request.available_commands)?)
    }
}

pub(crate) fn build_instructions(commands: &[CommandSummary]) -> String {
    let mut out = String::from(
        "You convert natural language requests into commands for a small command shell.\n\n\
         Available commands:\n",
    );
    for command in commands {
        let _ = writeln!(out, "  {}: {}", command.usage, command.summary);
    }
    out.push_str(
        "\nRules:\n\
         1. Return ONLY the commands, one per line\n\
         2. Do not include explanations or additional text\n\
         3. Use exact command names from the available commands\n\
         4. Break complex requests into several commands, in execution order\n\
         5. Quote arguments that contain spaces\n\
         6. If the request is unclear or impossible, return \"ERROR: <reason>\"\n\n\
         Examples:\n\
         User: \"create a folder called test\"\n\
         Assistant: mkdir test\n\n\
         User: \"create a folder called backup and move file.txt into it\"\n\
         Assistant: mkdir backup\n\
         mv file.txt backup\n\n\
         User: \"what's my CPU usage\"\n\
         Assistant: cpu\n",
    );
    out
}

/// Extracts commands from a model reply. Prose, comments, code fences and
/// lines naming unknown commands are skipped; a reply with nothing usable
/// is malformed.
pub fn parse_reply(
    reply: &str,
    available: &[CommandSummary],
) -> Result<Vec<ParsedCommand>, ModelError> {
    let reply = reply.trim();
    if let Some(reason) = reply.strip_prefix("ERROR:") {
        return Err(ModelError::Declined(reason.trim().to_string()));
    }

    let mut commands = Vec::new();
    for line in reply.lines() {
        let line = line.trim();
        let line = line.strip_prefix("$ ").unwrap_or(line);
        let comment = line.starts_with('#') || line.starts_with("//");
        if line.is_empty() || comment || line.starts_with("```") {
            continue;
        }

        if let Ok(Some(parsed)) = ParsedCommand::parse(line) {
            if available.iter().any(|c| c.name == parsed.name()) {
                commands.push(parsed);
            }
        }
    }

    if commands.is_empty() {
        let mut preview = reply.to_string();
        preview.truncate(80);
        return Err(ModelError::MalformedReply(format!(
            "no usable commands in '{}'",
            preview
        )));
    }
    Ok(commands)
}
