use std::collections::BTreeMap;

use super::{Command, CommandError};

pub struct CommandSpec {
    pub name: String,
    pub handler: Box<dyn Command>,
    pub min_args: usize,
    /// `None` means no upper bound.
    pub max_args: Option<usize>,
    pub usage: String,
    pub summary: String,
}

impl CommandSpec {
    pub fn new(
        name: &str,
        handler: impl Command + 'static,
        min_args: usize,
        max_args: Option<usize>,
    ) -> Self {
        Self {
            name: name.to_string(),
            handler: Box::new(handler),
            min_args,
            max_args,
            usage: name.to_string(),
            summary: String::new(),
        }
    }

    pub fn describe(mut self, usage: &str, summary: &str) -> Self {
        self.usage = usage.to_string();
        self.summary = summary.to_string();
        self
    }

    pub fn accepts(&self, arg_count: usize) -> bool {
        arg_count >= self.min_args && self.max_args.map_or(true, |max| arg_count <= max)
    }

    pub fn arity_message(&self, arg_count: usize) -> String {
        let expected = match self.max_args {
            Some(max) if max == self.min_args => format!("exactly {}", max),
            Some(max) => format!("{} to {}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        };
        format!(
            "{}: expected {} argument(s), got {} (usage: {})",
            self.name, expected, arg_count, self.usage
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandSummary {
    pub name: String,
    pub usage: String,
    pub summary: String,
}

/// Name → spec lookup. Filled once at startup, read-only afterwards.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: CommandSpec) -> Result<(), CommandError> {
        if self.commands.contains_key(&spec.name) {
            return Err(CommandError::DuplicateCommand(spec.name));
        }
        self.commands.insert(spec.name.clone(), spec);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn summaries(&self) -> Vec<CommandSummary> {
        self.commands
            .values()
            .map(|spec| CommandSummary {
                name: spec.name.clone(),
                usage: spec.usage.clone(),
                summary: spec.summary.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
