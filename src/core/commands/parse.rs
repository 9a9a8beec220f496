use std::fmt;

use super::CommandError;

/// A command name plus its ordered arguments, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    name: String,
    args: Vec<String>,
}

impl ParsedCommand {
    pub fn new<I, S>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_lowercase(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Tokenizes a literal line with shell-like quoting. Blank input yields
    /// `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let words = shell_words::split(line).map_err(|e| {
            CommandError::InvalidArguments(format!("cannot parse '{}': {}", line.trim(), e))
        })?;

        let mut words = words.into_iter();
        Ok(words.next().map(|name| Self::new(&name, words)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.name.as_str()).chain(self.args.iter().map(String::as_str));
        f.write_str(&shell_words::join(words))
    }
}
