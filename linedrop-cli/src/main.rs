//! linedrop CLI - move pasted lines into empty slots, one line at a time
//!
//! This is the command-line entry point:
//! - One-shot dispatch of a single line (`dispatch` subcommand)
//! - Filling a whole slot row from a pasted block (`drain` subcommand)
//! - Config file management (`config` subcommand)
//! - Shell completions (`completions` subcommand)
//!
//! The interactive paste box lives in the `linedrop-tui` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use linedrop_core::LinedropConfig;
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "linedrop",
    author,
    version,
    about = "Drop pasted lines into the next empty slot, one line per dispatch",
    long_about = "Takes a multi-line paste buffer and moves one line at a time into the first \
                  empty slot of a row of single-line fields. Use `drain` to fill a whole row."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.linedrop/config.toml
    #[arg(long, global = true, value_name = "PATH", env = "LINEDROP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch a single line from the buffer into the first empty slot
    Dispatch(commands::dispatch::DispatchArgs),
    /// Dispatch repeatedly until the buffer or the slots run out
    Drain(commands::dispatch::DrainArgs),
    /// Manage linedrop configuration (init, get, list, validate, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        Commands::Dispatch(args) => {
            let cfg = load_config(cli.config.as_ref())?;
            commands::run_dispatch(args, &cfg)?
        }
        Commands::Drain(args) => {
            let cfg = load_config(cli.config.as_ref())?;
            commands::run_drain(args, &cfg)?
        }
        Commands::Config(args) => config::run_config(args, cli.config)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

/// Load the config named on the command line, or the default location.
/// A config file that does not exist yet means defaults.
fn load_config(path: Option<&PathBuf>) -> Result<LinedropConfig> {
    let cfg = match path {
        Some(path) if !path.exists() => {
            debug!("no config at {:?}, using defaults", path);
            LinedropConfig::default()
        }
        Some(path) => LinedropConfig::load_from(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => LinedropConfig::load().context("Failed to load config")?,
    };
    debug!(variant = %cfg.dispatch.variant, rows = cfg.table.rows, "config loaded");
    Ok(cfg)
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
