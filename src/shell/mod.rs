use std::io::{self, Write};

use log::warn;
use rustyline::{
    config::Configurer, error::ReadlineError, history::MemHistory, Config as EditorConfig, Editor,
};

mod render;

use crate::{
    core::{
        commands::ShellAction,
        session::{natural_language, Session},
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellCompleter,
};

use render::render_steps;

pub struct Shell {
    editor: Editor<ShellCompleter, MemHistory>,
    session: Session,
    highlighter: SyntaxHighlighter,
    flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags, session: Session) -> Result<Self, ShellError> {
        let commands = session.executor().registry().names();
        let completer = ShellCompleter::new(commands.clone(), session.context().current_dir());

        let mut editor = Editor::<ShellCompleter, MemHistory>::with_history(
            EditorConfig::default(),
            MemHistory::new(),
        )?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        // Only reached while a command runs; readline handles its own ^C.
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            editor,
            session,
            highlighter: SyntaxHighlighter::new(commands),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = format!("{} > ", self.session.context().current_dir().display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if self.execute_line(&line)? == Some(ShellAction::Exit) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-C");
                    }
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    if !self.flags.is_set("quiet") {
                        println!("CTRL-D");
                    }
                    break;
                }
                Err(e) => {
                    warn!("readline failed: {}", e);
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }
        Ok(())
    }

    /// Submits one line and prints its steps.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<ShellAction>, ShellError> {
        let (action, _) = run_and_render(&mut self.session, &self.highlighter, line)?;

        let dir = self.session.context().current_dir().to_path_buf();
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_current_dir(dir);
        }
        Ok(action)
    }
}

/// Runs a single line without the line editor. Returns whether every step
/// succeeded.
pub fn run_once(session: &mut Session, line: &str) -> Result<bool, ShellError> {
    let commands = session.executor().registry().names();
    let highlighter = SyntaxHighlighter::new(commands);
    let (_, succeeded) = run_and_render(session, &highlighter, line)?;
    Ok(succeeded)
}

fn run_and_render(
    session: &mut Session,
    highlighter: &SyntaxHighlighter,
    line: &str,
) -> Result<(Option<ShellAction>, bool), ShellError> {
    let echo = natural_language(line.trim()).is_some();
    let steps = session.submit(line);
    let succeeded = steps.iter().all(|s| s.result.success);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let action = render_steps(
        highlighter,
        &steps,
        echo,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;
    io::stdout().flush()?;
    Ok((action, succeeded))
}
