use std::env;
use std::path::Path;
use std::process;

use log::{debug, LevelFilter};
use tern::core::commands::{default_registry, CommandExecutor};
use tern::core::config::Config;
use tern::core::context::ExecutionContext;
use tern::core::session::Session;
use tern::error::ShellError;
use tern::flags::Flags;
use tern::interpreter::Interpreter;
use tern::shell::{run_once, Shell};

fn init_logging(flags: &Flags) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if flags.is_set("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    builder.parse_env("RUST_LOG");
    builder.init();
}

fn main() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("tern {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(&flags);

    let mut config = Config::new(flags.get_value("config").map(Path::new))?;
    config.load()?;
    let settings = config.ai_settings()?;
    debug!(
        "provider {:?}, model {}, key configured: {}",
        settings.provider,
        settings.model,
        settings.is_configured()
    );

    let registry = default_registry()?;
    let use_model = !flags.is_set("no-ai");
    let interpreter = Interpreter::from_settings(&settings, registry.summaries(), use_model);
    let mut session = Session::new(
        CommandExecutor::new(registry),
        interpreter,
        ExecutionContext::new()?,
    );

    if let Some(line) = flags.get_value("exec").cloned() {
        if !run_once(&mut session, &line)? {
            process::exit(1);
        }
        return Ok(());
    }

    if !flags.is_set("quiet") {
        println!(
            "tern {}: type 'help' for commands, 'ai <request>' to ask in plain English",
            env!("CARGO_PKG_VERSION")
        );
        if !use_model || !settings.is_configured() {
            println!("No language model configured; 'ai' requests use built-in patterns.");
        }
    }

    let mut shell = Shell::new(flags, session)?;
    shell.run()
}
