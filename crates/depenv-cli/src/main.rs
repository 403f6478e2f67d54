//! depenv - dependency environment manifests CLI

use anyhow::Result;
use clap::Parser;
use crossterm::style::Stylize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use depenv_cli::cmd;
use depenv_cli::ui::Theme;
use depenv_cli::{Cli, Commands, Config};

/// Exit status for any failure, distinct from `has` reporting absence.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            let theme = Theme::default();
            eprintln!(
                "{} {}",
                theme.icons.error.with(theme.colors.error),
                format!("{err:#}").with(theme.colors.error)
            );
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    // Merge and completions don't read the configured manifest
    let config = || -> Result<Config> {
        let cwd = std::env::current_dir()?;
        Config::resolve(cli.manifest.as_deref(), &cli.prefix, &cwd)
    };

    match &cli.command {
        Commands::Check => cmd::check::check(&config()?)?,
        Commands::Has { name } => {
            if !cmd::has::has(&config()?, name)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Version { name, require } => {
            cmd::version::version(&config()?, name, require.as_deref())?;
        }
        Commands::List { json } => cmd::list::list(&config()?, *json)?,
        Commands::Merge {
            files,
            output,
            format,
        } => cmd::merge::merge(files, output.as_deref(), *format, &cli.prefix)?,
        Commands::Convert { to, output } => {
            cmd::convert::convert(&config()?, *to, output.as_deref())?;
        }
        Commands::Cargo {
            cfg_name,
            env_prefix,
        } => cmd::cargo::cargo(&config()?, cfg_name, env_prefix)?,
        Commands::Completions { shell } => cmd::completions::completions(*shell),
    }

    Ok(ExitCode::SUCCESS)
}
