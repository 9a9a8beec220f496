use std::io::{self, Write};

use crate::core::commands::ShellAction;
use crate::core::session::Step;
use crate::highlight::SyntaxHighlighter;

pub(crate) const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Writes the outcome of one submitted line. Derived commands are echoed
/// as `$ <command>` when `echo` holds. Returns the last action requested.
pub(crate) fn render_steps(
    highlighter: &SyntaxHighlighter,
    steps: &[Step],
    echo: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Option<ShellAction>> {
    let mut action = None;

    for step in steps {
        if echo {
            if let Some(command) = &step.command {
                writeln!(out, "{}", highlighter.highlight_step(&command.to_string()))?;
            }
        }

        let result = &step.result;
        if !result.success {
            writeln!(err, "{}", highlighter.highlight_error(&result.message))?;
            continue;
        }
        if !result.message.is_empty() {
            writeln!(out, "{}", result.message)?;
        }

        match result.action {
            Some(ShellAction::ClearScreen) => {
                write!(out, "{}", CLEAR_SCREEN)?;
                out.flush()?;
            }
            Some(ShellAction::Exit) => action = Some(ShellAction::Exit),
            None => {}
        }
    }

    Ok(action)
}
