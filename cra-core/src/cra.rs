use crate::{
    Config,
    clients::{Client, ClientRegistry},
    dates::{first_day_of_month, last_day_of_month, month_days},
    day_token::{ParseOptions, parse_day_token},
    error::{CraError, DayTokenError, ValidationError},
    expenses::{Expense, ExpenseId, ExpenseLedger, NewExpense},
    missions::{Mission, MissionId, MissionRegistry, NewMission},
    report::PeriodReport,
    timesheet::{
        Allocation, DayAllocationLedger, FULL_DAY, TimesheetGrid, parse_cell_input, quick_key,
    },
};
use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

/// A working session: the registries and the timesheet, owned in one place.
///
/// The session is the only caller of the ledger. It checks what the ledger
/// does not (mission references, single-cell bounds) and swaps in the new
/// ledger after every write.
#[derive(Debug)]
pub struct Cra {
    config: Config,
    clients: ClientRegistry,
    missions: MissionRegistry,
    timesheet: DayAllocationLedger,
    expenses: ExpenseLedger,
}

impl Cra {
    /// Creates a new session, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Creates an empty session with a specific `Config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            clients: ClientRegistry::new(),
            missions: MissionRegistry::new(),
            timesheet: DayAllocationLedger::new(),
            expenses: ExpenseLedger::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    pub fn missions(&self) -> &MissionRegistry {
        &self.missions
    }

    pub fn timesheet(&self) -> &DayAllocationLedger {
        &self.timesheet
    }

    pub fn expenses(&self) -> &ExpenseLedger {
        &self.expenses
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.config.reference_date
    }

    /// Moves "today", and with it the month shown by [`grid`](Self::grid).
    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.config.reference_date = date;
    }

    pub fn add_client(&mut self, name: &str) -> Result<&Client, CraError> {
        Ok(self.clients.add(name)?)
    }

    pub fn add_mission(&mut self, input: NewMission) -> Result<&Mission, CraError> {
        Ok(self.missions.add(input, &self.clients)?)
    }

    pub fn add_expense(&mut self, input: NewExpense) -> Result<&Expense, CraError> {
        Ok(self.expenses.add(input, &self.missions)?)
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<(), CraError> {
        if self.expenses.delete(id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownExpense(id).into())
        }
    }

    /// Sets the time spent on `mission` during `day`.
    ///
    /// The mission must exist and `requested` must lie in `[0, 1]`; the day
    /// capacity itself is resolved by the ledger, which may store less than
    /// requested.
    pub fn set_time(
        &mut self,
        day: NaiveDate,
        mission: MissionId,
        requested: Decimal,
    ) -> Result<Allocation, CraError> {
        if !self.missions.contains(mission) {
            return Err(ValidationError::UnknownMission(mission).into());
        }
        if requested < Decimal::ZERO || requested > FULL_DAY {
            return Err(ValidationError::DurationOutOfRange(requested).into());
        }
        let allocation = self.timesheet.allocate(day, mission, requested);
        self.timesheet = allocation.ledger.clone();
        Ok(allocation)
    }

    /// Sets a cell from the text typed in it. Empty text clears the cell.
    pub fn enter_cell(
        &mut self,
        day: NaiveDate,
        mission: MissionId,
        text: &str,
    ) -> Result<Allocation, CraError> {
        let requested = parse_cell_input(text)?;
        self.set_time(day, mission, requested)
    }

    /// Applies a grid shortcut key. Returns `None` for keys without a meaning.
    pub fn press_key(
        &mut self,
        day: NaiveDate,
        mission: MissionId,
        key: char,
    ) -> Result<Option<Allocation>, CraError> {
        match quick_key(key) {
            Some(requested) => self.set_time(day, mission, requested).map(Some),
            None => {
                debug!("event=quick_key_ignored key={key:?}");
                Ok(None)
            }
        }
    }

    pub fn clear(&mut self, day: NaiveDate, mission: MissionId) -> Result<Allocation, CraError> {
        self.set_time(day, mission, Decimal::ZERO)
    }

    /// Grid of the reference month, one row per registered mission.
    pub fn grid(&self) -> TimesheetGrid {
        TimesheetGrid::build(
            &self.missions,
            &self.timesheet,
            month_days(self.reference_date()),
        )
    }

    /// Days, billable amount and expenses of every mission between `from` and `to`.
    pub fn report(&self, from: NaiveDate, to: NaiveDate) -> PeriodReport {
        PeriodReport::build(&self.missions, &self.timesheet, &self.expenses, from, to)
    }

    /// Report of the reference month.
    pub fn month_report(&self) -> PeriodReport {
        let reference = self.reference_date();
        self.report(first_day_of_month(reference), last_day_of_month(reference))
    }

    /// Resolves a day typed by the user (`today`, `friday`, `12`, `2025-03-12`…).
    pub fn parse_day(&self, token: &str) -> Result<NaiveDate, CraError> {
        let formats = self.config.input_formats();
        let opts = ParseOptions {
            reference_date: Some(self.reference_date()),
            formats: Some(formats.as_slice()),
        };
        parse_day_token(token, Some(opts))
            .ok_or_else(|| DayTokenError::Unrecognized(token.to_string()).into())
    }
}
