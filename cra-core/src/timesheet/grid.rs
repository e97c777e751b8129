use super::{ledger::DayAllocationLedger, time_entry::FULL_DAY};
use crate::missions::{Mission, MissionId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One mission's line in the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub mission: MissionId,
    pub label: String,
    /// One cell per day of the grid, `None` for an empty cell.
    pub cells: Vec<Option<Decimal>>,
    pub total: Decimal,
}

/// Read-only view of the ledger over a run of days, one row per mission.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetGrid {
    pub days: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
    /// Totals per day over every entry of the ledger, listed missions or not.
    pub day_totals: Vec<Decimal>,
}

impl TimesheetGrid {
    pub fn build<'a>(
        missions: impl IntoIterator<Item = &'a Mission>,
        ledger: &DayAllocationLedger,
        days: Vec<NaiveDate>,
    ) -> Self {
        let rows = missions
            .into_iter()
            .map(|mission| {
                let cells: Vec<Option<Decimal>> = days
                    .iter()
                    .map(|day| ledger.get_duration(*day, mission.id))
                    .collect();
                let total = cells.iter().flatten().copied().sum();
                GridRow {
                    mission: mission.id,
                    label: mission.name.clone(),
                    cells,
                    total,
                }
            })
            .collect();
        let day_totals = days
            .iter()
            .map(|day| ledger.get_day_total(*day, None))
            .collect();

        Self {
            days,
            rows,
            day_totals,
        }
    }

    /// Days whose total exceeds a full day. Empty unless the ledger was loaded
    /// over capacity.
    pub fn over_capacity_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .zip(&self.day_totals)
            .filter(|(_, total)| **total > FULL_DAY)
            .map(|(day, _)| *day)
    }

    pub fn total(&self) -> Decimal {
        self.day_totals.iter().copied().sum()
    }
}
