use crate::clients::ClientId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissionId(pub u32);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a mission is billed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionKind {
    /// Time and materials: billed per day worked, up to `max_days`.
    Regie { daily_rate: Decimal, max_days: u32 },
    /// Fixed price, whatever the number of days worked.
    Forfait { amount: Decimal },
}

impl MissionKind {
    pub fn label(&self) -> &'static str {
        match self {
            MissionKind::Regie { .. } => "Régie",
            MissionKind::Forfait { .. } => "Forfait",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub client: ClientId,
    pub kind: MissionKind,
    pub start_date: NaiveDate,
    /// End date planned for a régie, hard deadline for a forfait.
    pub deadline: NaiveDate,
}

impl Mission {
    /// Amount to invoice for `days` worked.
    pub fn billable_amount(&self, days: Decimal) -> Decimal {
        match &self.kind {
            MissionKind::Regie { daily_rate, .. } => days * *daily_rate,
            MissionKind::Forfait { amount } => *amount,
        }
    }

    /// Days worked beyond the maximum of a régie. Always zero for a forfait.
    pub fn days_over_max(&self, days: Decimal) -> Decimal {
        match &self.kind {
            MissionKind::Regie { max_days, .. } => {
                (days - Decimal::from(*max_days)).max(Decimal::ZERO)
            }
            MissionKind::Forfait { .. } => Decimal::ZERO,
        }
    }
}

/// Properties to create a new mission.
#[derive(Debug, Clone)]
pub struct NewMission {
    pub name: String,
    pub client: ClientId,
    pub kind: MissionKind,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
}
