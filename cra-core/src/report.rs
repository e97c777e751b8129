use crate::{
    expenses::ExpenseLedger,
    missions::{MissionId, MissionRegistry},
    timesheet::DayAllocationLedger,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// What one mission amounts to over a period.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSummary {
    pub mission: MissionId,
    pub name: String,
    pub days: Decimal,
    pub billable: Decimal,
    /// Days logged beyond the maximum of a régie.
    pub days_over_max: Decimal,
    pub expenses: Decimal,
}

/// Totals of a period, across missions.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub missions: Vec<MissionSummary>,
    pub general_expenses: Decimal,
}

impl PeriodReport {
    /// Builds the report of every registered mission between `from` and `to`, both included.
    pub fn build(
        missions: &MissionRegistry,
        timesheet: &DayAllocationLedger,
        expenses: &ExpenseLedger,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Self {
        let expense_totals = expenses.totals_by_mission_between(from, to);
        let missions = missions
            .iter()
            .map(|mission| {
                let days = timesheet.total_for_mission_between(mission.id, from, to);
                MissionSummary {
                    mission: mission.id,
                    name: mission.name.clone(),
                    days,
                    billable: mission.billable_amount(days),
                    days_over_max: mission.days_over_max(days),
                    expenses: expense_totals
                        .get(&mission.id)
                        .copied()
                        .unwrap_or(Decimal::ZERO),
                }
            })
            .collect();

        Self {
            from,
            to,
            missions,
            general_expenses: expenses.general_total_between(from, to),
        }
    }

    pub fn total_days(&self) -> Decimal {
        self.missions.iter().map(|m| m.days).sum()
    }

    pub fn total_billable(&self) -> Decimal {
        self.missions.iter().map(|m| m.billable).sum()
    }

    /// Mission and general expenses together.
    pub fn total_expenses(&self) -> Decimal {
        self.missions.iter().map(|m| m.expenses).sum::<Decimal>() + self.general_expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clients::ClientRegistry,
        missions::{MissionKind, NewMission},
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    #[test]
    fn missions_without_time_still_appear() {
        let mut clients = ClientRegistry::new();
        let client = clients.add("Acme").unwrap().id;
        let mut missions = MissionRegistry::new();
        missions
            .add(
                NewMission {
                    name: "Maintenance".to_string(),
                    client,
                    kind: MissionKind::Regie {
                        daily_rate: Decimal::new(400, 0),
                        max_days: 10,
                    },
                    start_date: date(1),
                    deadline: date(31),
                },
                &clients,
            )
            .unwrap();

        let report = PeriodReport::build(
            &missions,
            &DayAllocationLedger::new(),
            &ExpenseLedger::new(),
            date(1),
            date(31),
        );

        assert_eq!(report.missions.len(), 1);
        assert_eq!(report.missions[0].days, Decimal::ZERO);
        assert_eq!(report.total_billable(), Decimal::ZERO);
        assert_eq!(report.total_expenses(), Decimal::ZERO);
    }
}
