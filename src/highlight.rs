use std::collections::BTreeSet;

use inksac::prelude::*;

use crate::core::session::AI_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Command,
    Natural,
    Unknown,
    Flag,
    Plain,
}

#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    commands: BTreeSet<String>,
}

impl SyntaxHighlighter {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self::with_support(support, commands)
    }

    pub fn with_support<I, S>(color_support: ColorSupport, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            color_support,
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    fn plain(&self) -> bool {
        matches!(self.color_support, ColorSupport::NoColor)
    }

    /// How the word at `index` of a line is shown.
    pub fn classify(&self, index: usize, word: &str, natural: bool) -> WordClass {
        if index == 0 {
            if word.eq_ignore_ascii_case(AI_PREFIX) {
                WordClass::Natural
            } else if self.commands.contains(&word.to_lowercase()) {
                WordClass::Command
            } else {
                WordClass::Unknown
            }
        } else if !natural && word.starts_with('-') {
            WordClass::Flag
        } else {
            WordClass::Plain
        }
    }

    /// Colors a line in place; spacing is kept so the cursor stays aligned.
    pub fn highlight_command(&self, input: &str) -> String {
        if self.plain() {
            return input.to_string();
        }

        let mut natural = false;
        let mut index = 0;
        let mut out = Vec::new();
        for part in input.split(' ') {
            if part.is_empty() {
                out.push(String::new());
                continue;
            }
            let class = self.classify(index, part, natural);
            natural |= class == WordClass::Natural;
            index += 1;

            let style = match class {
                WordClass::Command => Style::builder().foreground(Color::Cyan).bold().build(),
                WordClass::Natural => Style::builder().foreground(Color::Magenta).bold().build(),
                WordClass::Unknown => Style::builder().foreground(Color::Red).build(),
                WordClass::Flag => Style::builder().foreground(Color::Yellow).build(),
                WordClass::Plain => {
                    out.push(part.to_string());
                    continue;
                }
            };
            out.push(part.style(style).to_string());
        }
        out.join(" ")
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if self.plain() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_success(&self, message: &str) -> String {
        if self.plain() {
            return message.to_string();
        }

        let success_style = Style::builder().foreground(Color::Green).build();
        message.style(success_style).to_string()
    }

    /// Echo of a command derived from a natural-language request.
    pub fn highlight_step(&self, command: &str) -> String {
        if self.plain() {
            return format!("$ {}", command);
        }

        let step_style = Style::builder().foreground(Color::Cyan).build();
        format!("$ {}", command).style(step_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if self.plain() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}
