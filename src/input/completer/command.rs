use std::collections::BTreeSet;

use rustyline::completion::Pair;

use crate::core::session::AI_PREFIX;

#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut completer = Self::default();
        completer.refresh_commands(commands);
        completer
    }

    /// Replaces the known names; the `ai` keyword is always offered.
    pub fn refresh_commands<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self.commands.insert(AI_PREFIX.to_string());
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_command() {
        let completer = CommandCompleter::new(["cat", "cd", "cp", "ls"]);
        let names: Vec<String> = completer
            .complete_command("c")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(names, ["cat", "cd", "cp"]);

        let ai = completer.complete_command("a");
        assert_eq!(ai.len(), 1);
        assert_eq!(ai[0].replacement, "ai ");
    }
}
