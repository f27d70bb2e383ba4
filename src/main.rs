//! Floatybox terminal runner (default binary).
//!
//! Parses flags, sets up logging, then hands the terminal to the event loop.
//! Drawing goes through a custom framebuffer renderer on crossterm.

use std::fs::File;
use std::io;
use std::process;

use anyhow::{bail, Context, Result};
use crossterm::tty::IsTty;

use floatybox::app::{build_keymap, App};
use floatybox::config::{parse_args, Config, EnvConfig, LICENSE};
use floatybox::term::TerminalRenderer;

fn main() -> Result<()> {
    // The environment comes first so `--help` shows overridden bindings.
    let env = EnvConfig::from_env();
    let keymap = build_keymap(env.keymap.as_deref());
    let args = match parse_args(std::env::args_os(), &keymap) {
        Ok(args) => args,
        Err(err) => {
            // Help and version are not errors.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if args.license {
        print!("{LICENSE}");
        return Ok(());
    }

    let is_tty = io::stdout().is_tty();
    let config = Config::resolve(&args, env, is_tty);
    init_logger(&config)?;

    if !is_tty {
        bail!("stdout is not a tty");
    }

    log::info!(
        "starting: colour={} fps={} seed={:?} size={:?}",
        config.color,
        config.fps,
        config.seed,
        config.size
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = App::new(config).and_then(|mut app| app.run(&mut term));

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}

/// Logging is off unless `RUST_LOG` asks for it; stdout belongs to the game,
/// so `FLOATYBOX_LOG_PATH` can send records to a file instead of stderr.
fn init_logger(config: &Config) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"));

    if let Some(path) = &config.log_path {
        let file = File::create(path).with_context(|| format!("opening log file {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
