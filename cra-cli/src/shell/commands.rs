use clap::{Parser, Subcommand};
use cra_core::{
    expenses::{GeneralExpenseCategory, MissionExpenseCategory},
    timesheet::parse_decimal,
};
use rust_decimal::Decimal;

/// One line typed in the shell.
#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]",
    help_template = "{usage-heading} {usage}\n\n{all-args}"
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Add or list clients
    #[command(subcommand)]
    Client(ClientCommand),
    /// Add or list missions
    #[command(subcommand)]
    Mission(MissionCommand),
    /// Set the time spent on a mission, as a fraction of a day (e.g., `set today 1 0,5`)
    Set {
        day: String,
        mission: u32,
        duration: String,
    },
    /// Grid shortcut: `0` clears, `1` is a full day, `.` is half a day
    Key { day: String, mission: u32, key: char },
    /// Empty a cell of the grid
    Clear { day: String, mission: u32 },
    /// Show the timesheet of the current month
    Grid,
    /// Move to the month of the given day (e.g., `month 2025-04-01`)
    Month { day: String },
    /// Record, delete or list expenses
    #[command(subcommand)]
    Expense(ExpenseCommand),
    /// Days, billable amounts and expenses of the current month
    Summary,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ClientCommand {
    /// Add a client (e.g., `client add Acme Corp`)
    Add {
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// List clients
    List,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum MissionCommand {
    /// Add a time-and-materials mission
    Regie {
        client: u32,
        #[arg(value_parser = parse_decimal)]
        daily_rate: Decimal,
        max_days: u32,
        start: String,
        deadline: String,
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Add a fixed-price mission
    Forfait {
        client: u32,
        #[arg(value_parser = parse_decimal)]
        amount: Decimal,
        start: String,
        deadline: String,
        #[arg(required = true, trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// List missions
    List,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ExpenseCommand {
    /// Record an expense on a mission (transport, restaurant, materiel, hebergement, autres)
    Mission {
        mission: u32,
        category: MissionExpenseCategory,
        #[arg(value_parser = parse_decimal)]
        amount: Decimal,
        /// Day of the expense. Defaults to today.
        #[arg(long)]
        on: Option<String>,
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Record a general expense (bureau, logiciel, formation, comptabilite, assurance, autres)
    General {
        category: GeneralExpenseCategory,
        #[arg(value_parser = parse_decimal)]
        amount: Decimal,
        /// Day of the expense. Defaults to today.
        #[arg(long)]
        on: Option<String>,
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Delete an expense by its number
    Delete { id: u32 },
    /// List expenses with their totals
    List,
}

impl Line {
    /// Parses a line split on whitespace. Help requests come back as errors, as clap reports them.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}
