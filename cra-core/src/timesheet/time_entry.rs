use crate::missions::MissionId;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Capacity of a single calendar day, across every mission.
pub const FULL_DAY: Decimal = Decimal::ONE;

/// Time spent on one mission during one calendar day, as a fraction of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEntry {
    pub mission: MissionId,
    pub day: NaiveDate,
    pub duration: Decimal,
}

impl TimeEntry {
    pub fn new(mission: MissionId, day: NaiveDate, duration: Decimal) -> Self {
        Self {
            mission,
            day,
            duration,
        }
    }
}
