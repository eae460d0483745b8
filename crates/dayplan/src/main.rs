mod command;
mod session;

use std::io::{BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dayplan_config::AppConfig;

use crate::session::{Outcome, Session};

/// Build a day schedule from line commands, with undo and redo.
#[derive(Parser, Debug)]
#[command(name = "dayplan", version, about)]
struct Cli {
    /// Template to start from (replaces the configured default template).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Read commands from this file instead of standard input.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Configuration file (defaults to `dayplan.json` next to the executable).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let (config, config_problem) = load_config(&config_path);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting dayplan (config: {})", config_path.display());
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}");
    }

    let template = cli.template.or_else(|| config.default_template_path());
    let mut session = Session::new(config);
    if let Some(path) = template {
        println!("{}", session.load(&path)?);
    }

    match cli.script {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("failed to open script: {}", path.display()))?;
            run(&mut session, BufReader::new(file), false)
        }
        None => {
            let interactive = std::io::stdin().is_terminal();
            run(&mut session, std::io::stdin().lock(), interactive)
        }
    }
}

/// Loads the config, creating a default file when none exists.
///
/// Runs before logging is initialised, so any failure is returned as a
/// message for the caller to log once the subscriber is installed.
fn load_config(path: &Path) -> (AppConfig, Option<String>) {
    match AppConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            let problem = config.save(path).err().map(|e| {
                format!("Failed to create default config at {}: {e}", path.display())
            });
            (config, problem)
        }
        Err(e) => (
            AppConfig::default(),
            Some(format!(
                "Failed to load config at {}: {e}; using defaults",
                path.display()
            )),
        ),
    }
}

/// Feeds every non-empty, non-comment line to the session until `quit` or EOF.
fn run(session: &mut Session, input: impl BufRead, interactive: bool) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush().context("failed to flush stdout")?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match session.run_line(line) {
            Ok(Outcome::Continue(message)) => println!("{message}"),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                tracing::debug!("command rejected: {line}");
                eprintln!("error: {e:#}");
            }
        }
    }
    tracing::debug!(
        "Session finished with {} undo step(s)",
        session.history().undo_depth()
    );
    Ok(())
}
