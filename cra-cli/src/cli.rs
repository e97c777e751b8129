use clap::Parser;
use std::path::PathBuf;

use crate::render::ColorMode;

/// cra: freelance activity report: missions, monthly timesheet and expenses
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Month to open, as any day in it (e.g., `cra --month 2025-03-01`, `cra --month yesterday`)
    #[arg(long)]
    pub month: Option<String>,
    /// Log level: trace, debug, info, warn or error. Overrides `log_level` from the config file.
    #[arg(long, env = "CRA_LOG")]
    pub log_level: Option<String>,
    /// Reads commands from this file instead of the standard input.
    #[arg(long)]
    pub script: Option<PathBuf>,
}
