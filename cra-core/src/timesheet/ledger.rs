//! The day-allocation ledger.
//!
//! Every calendar day holds at most one full day of work, split across missions.
//! Writes never fail: a request that does not fit is truncated to the room left
//! on that day, and siblings are rescaled if the day ever ends up over capacity.
use super::time_entry::{FULL_DAY, TimeEntry};
use crate::missions::MissionId;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Time entries of a session, keyed by day then mission.
///
/// The ledger is never mutated in place by its users: [`set_entry`](Self::set_entry)
/// returns a new ledger and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAllocationLedger {
    days: BTreeMap<NaiveDate, BTreeMap<MissionId, Decimal>>,
}

/// A sibling entry shrunk to make room on its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rescaled {
    pub mission: MissionId,
    pub from: Decimal,
    pub to: Decimal,
}

/// The outcome of a single write: the new ledger plus what the write did.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub ledger: DayAllocationLedger,
    pub day: NaiveDate,
    pub mission: MissionId,
    pub requested: Decimal,
    /// Duration actually stored, after truncation to the room left on `day`.
    pub effective: Decimal,
    pub rescaled: Vec<Rescaled>,
}

impl Allocation {
    /// `true` when the stored duration is smaller than the requested one.
    pub fn was_truncated(&self) -> bool {
        self.effective < self.requested
    }
}

impl DayAllocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all durations on `day`, optionally leaving one mission out.
    pub fn get_day_total(&self, day: NaiveDate, excluding: Option<MissionId>) -> Decimal {
        self.days
            .get(&day)
            .map(|missions| {
                missions
                    .iter()
                    .filter(|(mission, _)| Some(**mission) != excluding)
                    .map(|(_, duration)| *duration)
                    .sum()
            })
            .unwrap_or(Decimal::ZERO)
    }

    /// Stored duration for `(day, mission)`, `None` when the cell is empty.
    pub fn get_duration(&self, day: NaiveDate, mission: MissionId) -> Option<Decimal> {
        self.days
            .get(&day)
            .and_then(|missions| missions.get(&mission))
            .copied()
    }

    /// Sets the duration of `(day, mission)` and returns the resulting ledger.
    ///
    /// `requested` is expected in `[0, 1]`; bounds of a single cell are the
    /// caller's business. The ledger only resolves the capacity of the day:
    ///
    /// 1. the request is truncated to the room left by the other missions,
    ///    floored at 0;
    /// 2. if the day would still exceed [`FULL_DAY`], the other missions are
    ///    rescaled proportionally (see [`rescale_siblings`](Self::rescale_siblings));
    /// 3. a zero duration removes the entry, anything else upserts it.
    pub fn set_entry(&self, day: NaiveDate, mission: MissionId, requested: Decimal) -> Self {
        self.allocate(day, mission, requested).ledger
    }

    /// Same as [`set_entry`](Self::set_entry), reporting truncation and rescaled siblings.
    pub fn allocate(&self, day: NaiveDate, mission: MissionId, requested: Decimal) -> Allocation {
        let others_total = self.get_day_total(day, Some(mission));
        let effective = requested.min(FULL_DAY - others_total).max(Decimal::ZERO);

        let (mut ledger, rescaled) = self.make_room(day, mission, effective);
        if effective.is_zero() {
            ledger.remove(day, mission);
        } else {
            ledger.upsert(day, mission, effective);
        }

        debug!(
            "event=time_entry_set day={} mission={} requested={} effective={} others_total={}",
            day, mission, requested, effective, others_total
        );
        if effective < requested {
            info!(
                "event=time_entry_truncated day={} mission={} requested={} effective={}",
                day, mission, requested, effective
            );
        }
        if !rescaled.is_empty() {
            info!(
                "event=day_rescaled day={} mission={} siblings={}",
                day,
                mission,
                rescaled.len()
            );
        }

        Allocation {
            ledger,
            day,
            mission,
            requested,
            effective,
            rescaled,
        }
    }

    /// Shrinks every other mission on `day` so that `incoming` fits for `keep`.
    ///
    /// Nothing happens while the other missions plus `incoming` fit in a day.
    /// Otherwise each sibling is multiplied by `max(0, 1 - incoming) / others_total`
    /// and rounded to hundredths, so larger entries give up more time. Rounding
    /// may leave a drift of a few hundredths; it is not corrected.
    pub fn rescale_siblings(&self, day: NaiveDate, keep: MissionId, incoming: Decimal) -> Self {
        self.make_room(day, keep, incoming).0
    }

    /// Sum of all durations logged for `mission`.
    pub fn total_for_mission(&self, mission: MissionId) -> Decimal {
        self.days
            .values()
            .filter_map(|missions| missions.get(&mission))
            .copied()
            .sum()
    }

    /// Sum of durations logged for `mission` between `from` and `to`, both included.
    pub fn total_for_mission_between(
        &self,
        mission: MissionId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Decimal {
        if from > to {
            return Decimal::ZERO;
        }
        self.days
            .range(from..=to)
            .filter_map(|(_, missions)| missions.get(&mission))
            .copied()
            .sum()
    }

    /// All entries, ordered by day then mission.
    pub fn entries(&self) -> impl Iterator<Item = TimeEntry> + '_ {
        self.days.iter().flat_map(|(day, missions)| {
            missions
                .iter()
                .map(move |(mission, duration)| TimeEntry::new(*mission, *day, *duration))
        })
    }

    pub fn entries_on(&self, day: NaiveDate) -> impl Iterator<Item = TimeEntry> + '_ {
        self.days.get(&day).into_iter().flat_map(move |missions| {
            missions
                .iter()
                .map(move |(mission, duration)| TimeEntry::new(*mission, day, *duration))
        })
    }

    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn make_room(
        &self,
        day: NaiveDate,
        keep: MissionId,
        incoming: Decimal,
    ) -> (Self, Vec<Rescaled>) {
        let mut ledger = self.clone();
        let mut rescaled = Vec::new();

        let others_total = self.get_day_total(day, Some(keep));
        if others_total + incoming <= FULL_DAY || others_total <= Decimal::ZERO {
            return (ledger, rescaled);
        }
        let remaining = (FULL_DAY - incoming).max(Decimal::ZERO);
        let Some(factor) = remaining.checked_div(others_total) else {
            return (ledger, rescaled);
        };

        if let Some(missions) = ledger.days.get_mut(&day) {
            for (mission, duration) in missions.iter_mut().filter(|(m, _)| **m != keep) {
                let scaled = round_hundredths(*duration * factor);
                rescaled.push(Rescaled {
                    mission: *mission,
                    from: *duration,
                    to: scaled,
                });
                *duration = scaled;
            }
        }
        ledger.prune(day);
        (ledger, rescaled)
    }

    fn upsert(&mut self, day: NaiveDate, mission: MissionId, duration: Decimal) {
        self.days.entry(day).or_default().insert(mission, duration);
    }

    fn remove(&mut self, day: NaiveDate, mission: MissionId) {
        if let Some(missions) = self.days.get_mut(&day) {
            missions.remove(&mission);
        }
        self.prune(day);
    }

    /// Drops zero entries on `day`, and the day itself once empty.
    fn prune(&mut self, day: NaiveDate) {
        if let Some(missions) = self.days.get_mut(&day) {
            missions.retain(|_, duration| *duration > Decimal::ZERO);
            if missions.is_empty() {
                self.days.remove(&day);
            }
        }
    }
}

/// Collects entries in order, each one clamped the way [`set_entry`] clamps a
/// request: last value wins for a repeated `(day, mission)`, non-positive
/// durations clear the cell, and a day never ends up above [`FULL_DAY`].
///
/// [`set_entry`]: DayAllocationLedger::set_entry
impl FromIterator<TimeEntry> for DayAllocationLedger {
    fn from_iter<I: IntoIterator<Item = TimeEntry>>(iter: I) -> Self {
        let mut ledger = Self::default();
        for entry in iter {
            let room = FULL_DAY - ledger.get_day_total(entry.day, Some(entry.mission));
            let duration = entry.duration.min(room).max(Decimal::ZERO);
            if duration.is_zero() {
                ledger.remove(entry.day, entry.mission);
            } else {
                ledger.upsert(entry.day, entry.mission, duration);
            }
        }
        ledger
    }
}

fn round_hundredths(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
