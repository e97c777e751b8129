mod cell_input;
mod grid;
mod ledger;
mod time_entry;

pub use cell_input::{parse_cell_input, parse_decimal, quick_key};
pub use grid::{GridRow, TimesheetGrid};
pub use ledger::{Allocation, DayAllocationLedger, Rescaled};
pub use time_entry::{FULL_DAY, TimeEntry};
