mod cli;
mod render;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use cra_core::{Cra, init_logging};
use log::info;
use render::{RenderOptions, Renderer};
use shell::Shell;
use std::{
    fs::File,
    io::{self, BufReader, IsTerminal},
    process::ExitCode,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cra: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut cra = Cra::new()?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| cra.config().log_level.clone());
    init_logging(&level, cra.config().log_dir.as_deref())?;

    if let Some(token) = &cli.month {
        let day = cra.parse_day(token)?;
        cra.set_reference_date(day);
    }
    info!(
        "event=session_start reference_date={}",
        cra.reference_date()
    );

    let config = cra.config();
    let renderer = Renderer::new(Some(RenderOptions {
        use_color: cli.color.use_color(),
        date_format: config.display_date_format.clone(),
        month_format: config.month_format.clone(),
        currency_symbol: config.currency_symbol.clone(),
    }));
    let mut shell = Shell::new(cra, renderer);

    match &cli.script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            shell.run(BufReader::new(file), false)
        }
        None => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            shell.run(stdin.lock(), prompt)
        }
    }
}
