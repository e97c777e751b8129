mod commands;

use crate::render::Renderer;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use commands::{ClientCommand, Command, ExpenseCommand, Line, MissionCommand};
use cra_core::{
    Cra, CraError,
    clients::ClientId,
    expenses::{ExpenseId, ExpenseKind, NewExpense},
    missions::{MissionId, MissionKind, NewMission},
    timesheet::Allocation,
};
use log::debug;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands line by line and applies them to one session.
pub struct Shell {
    cra: Cra,
    renderer: Renderer,
}

impl Shell {
    pub fn new(cra: Cra, renderer: Renderer) -> Self {
        Self { cra, renderer }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Cra {
        &self.cra
    }

    /// Runs until `quit` or the end of `input`. A failing command is reported
    /// and the session goes on; only I/O errors end the loop early.
    pub fn run(&mut self, input: impl BufRead, prompt: bool) -> Result<()> {
        if prompt {
            self.renderer
                .print_info("cra: type `help` for the list of commands, `quit` to leave.");
            show_prompt()?;
        }
        for line in input.lines() {
            let line = line.context("reading command")?;
            if self.execute(&line) == Flow::Quit {
                break;
            }
            if prompt {
                show_prompt()?;
            }
        }
        Ok(())
    }

    /// Executes a single line. Errors are printed, never returned.
    pub fn execute(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Flow::Continue;
        }
        debug!("event=shell_command line={line:?}");

        let parsed = match Line::parse_line(line) {
            Ok(parsed) => parsed,
            Err(e) => {
                match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => print!("{e}"),
                    _ => self.renderer.print_error(e.to_string().trim_end()),
                }
                return Flow::Continue;
            }
        };

        match self.apply(parsed.command) {
            Ok(flow) => flow,
            Err(e) => {
                self.renderer.print_error(&e.to_string());
                Flow::Continue
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Flow, CraError> {
        match command {
            Command::Client(ClientCommand::Add { name }) => {
                let client = self.cra.add_client(&name.join(" "))?;
                let message = format!("Added client #{} {}", client.id, client.name);
                self.renderer.print_info(&message);
            }
            Command::Client(ClientCommand::List) => {
                self.renderer.print_clients(self.cra.clients());
            }
            Command::Mission(MissionCommand::Regie {
                client,
                daily_rate,
                max_days,
                start,
                deadline,
                name,
            }) => {
                let kind = MissionKind::Regie {
                    daily_rate,
                    max_days,
                };
                self.add_mission(client, kind, &start, &deadline, &name)?;
            }
            Command::Mission(MissionCommand::Forfait {
                client,
                amount,
                start,
                deadline,
                name,
            }) => {
                let kind = MissionKind::Forfait { amount };
                self.add_mission(client, kind, &start, &deadline, &name)?;
            }
            Command::Mission(MissionCommand::List) => {
                self.renderer
                    .print_missions(self.cra.missions(), self.cra.clients());
            }
            Command::Set {
                day,
                mission,
                duration,
            } => {
                let day = self.cra.parse_day(&day)?;
                let allocation = self.cra.enter_cell(day, MissionId(mission), &duration)?;
                self.show_allocation(&allocation);
            }
            Command::Key { day, mission, key } => {
                let day = self.cra.parse_day(&day)?;
                match self.cra.press_key(day, MissionId(mission), key)? {
                    Some(allocation) => self.show_allocation(&allocation),
                    None => self
                        .renderer
                        .print_error(&format!("`{key}` is not a grid key; use 0, 1 or .")),
                }
            }
            Command::Clear { day, mission } => {
                let day = self.cra.parse_day(&day)?;
                let allocation = self.cra.clear(day, MissionId(mission))?;
                self.show_allocation(&allocation);
            }
            Command::Grid => {
                self.renderer
                    .print_grid(&self.cra.grid(), self.cra.reference_date());
            }
            Command::Month { day } => {
                let day = self.cra.parse_day(&day)?;
                self.cra.set_reference_date(day);
                self.renderer
                    .print_grid(&self.cra.grid(), self.cra.reference_date());
            }
            Command::Expense(ExpenseCommand::Mission {
                mission,
                category,
                amount,
                on,
                description,
            }) => {
                let kind = ExpenseKind::Mission {
                    mission: MissionId(mission),
                    category,
                };
                self.add_expense(kind, amount, on.as_deref(), &description)?;
            }
            Command::Expense(ExpenseCommand::General {
                category,
                amount,
                on,
                description,
            }) => {
                let kind = ExpenseKind::General { category };
                self.add_expense(kind, amount, on.as_deref(), &description)?;
            }
            Command::Expense(ExpenseCommand::Delete { id }) => {
                self.cra.delete_expense(ExpenseId(id))?;
                self.renderer.print_info(&format!("Deleted expense #{id}"));
            }
            Command::Expense(ExpenseCommand::List) => {
                self.renderer
                    .print_expenses(self.cra.expenses(), self.cra.missions());
            }
            Command::Summary => {
                self.renderer.print_report(&self.cra.month_report());
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn add_mission(
        &mut self,
        client: u32,
        kind: MissionKind,
        start: &str,
        deadline: &str,
        name: &[String],
    ) -> Result<(), CraError> {
        let start_date = self.cra.parse_day(start)?;
        let deadline = self.cra.parse_day(deadline)?;
        let mission = self.cra.add_mission(NewMission {
            name: name.join(" "),
            client: ClientId(client),
            kind,
            start_date,
            deadline,
        })?;
        let message = format!(
            "Added mission #{} {} ({})",
            mission.id,
            mission.name,
            mission.kind.label()
        );
        self.renderer.print_info(&message);
        Ok(())
    }

    fn add_expense(
        &mut self,
        kind: ExpenseKind,
        amount: Decimal,
        on: Option<&str>,
        description: &[String],
    ) -> Result<(), CraError> {
        let date: NaiveDate = match on {
            Some(token) => self.cra.parse_day(token)?,
            None => self.cra.reference_date(),
        };
        let expense = self.cra.add_expense(NewExpense {
            date,
            kind,
            amount,
            description: description.join(" "),
        })?;
        let message = format!(
            "Added expense #{} ({})",
            expense.id,
            expense.kind.category_label()
        );
        self.renderer.print_info(&message);
        Ok(())
    }

    fn show_allocation(&self, allocation: &Allocation) {
        let label = self
            .cra
            .missions()
            .get(allocation.mission)
            .map(|m| format!("#{} {}", m.id, m.name))
            .unwrap_or_else(|| format!("#{}", allocation.mission));
        self.renderer.print_allocation(allocation, &label);
    }
}

fn show_prompt() -> Result<()> {
    print!("cra> ");
    std::io::stdout().flush().context("flushing prompt")
}
