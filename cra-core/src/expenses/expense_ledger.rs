use super::expense::{Expense, ExpenseId, ExpenseKind, NewExpense};
use crate::{
    error::ValidationError,
    missions::{MissionId, MissionRegistry},
};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Expenses of the session, in recording order.
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
    last_id: u32,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an expense. The amount must be positive and at most
    /// [`MAX_AMOUNT`](crate::error::MAX_AMOUNT), and a mission expense
    /// must point at a registered mission.
    pub fn add(
        &mut self,
        input: NewExpense,
        missions: &MissionRegistry,
    ) -> Result<&Expense, ValidationError> {
        ValidationError::check_amount("amount", input.amount)?;
        if let Some(mission) = input.kind.mission() {
            if !missions.contains(mission) {
                return Err(ValidationError::UnknownMission(mission));
            }
        }

        self.last_id += 1;
        let expense = Expense {
            id: ExpenseId(self.last_id),
            date: input.date,
            kind: input.kind,
            amount: input.amount,
            description: input.description.trim().to_string(),
        };
        debug!(
            "event=expense_added id={} category={}",
            expense.id,
            expense.kind.category_label()
        );
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Removes an expense. Returns `false` when no expense has this id.
    pub fn delete(&mut self, id: ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let deleted = self.expenses.len() != before;
        if deleted {
            debug!("event=expense_deleted id={}", id);
        }
        deleted
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.expenses.iter()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of mission expenses, per mission. Missions without expenses are absent.
    pub fn totals_by_mission(&self) -> BTreeMap<MissionId, Decimal> {
        Self::mission_totals(self.expenses.iter())
    }

    /// Same as [`totals_by_mission`](Self::totals_by_mission), restricted to
    /// expenses dated between `from` and `to`, both included.
    pub fn totals_by_mission_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BTreeMap<MissionId, Decimal> {
        Self::mission_totals(self.between(from, to))
    }

    /// Sum of general expenses.
    pub fn general_total(&self) -> Decimal {
        Self::general_sum(self.expenses.iter())
    }

    pub fn general_total_between(&self, from: NaiveDate, to: NaiveDate) -> Decimal {
        Self::general_sum(self.between(from, to))
    }

    fn between(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &Expense> {
        self.expenses
            .iter()
            .filter(move |e| e.date >= from && e.date <= to)
    }

    fn mission_totals<'a>(
        expenses: impl Iterator<Item = &'a Expense>,
    ) -> BTreeMap<MissionId, Decimal> {
        let mut totals = BTreeMap::new();
        for expense in expenses {
            if let ExpenseKind::Mission { mission, .. } = expense.kind {
                *totals.entry(mission).or_insert(Decimal::ZERO) += expense.amount;
            }
        }
        totals
    }

    fn general_sum<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Decimal {
        expenses
            .filter(|e| matches!(e.kind, ExpenseKind::General { .. }))
            .map(|e| e.amount)
            .sum()
    }
}
