use super::categories::{GeneralExpenseCategory, MissionExpenseCategory};
use crate::missions::MissionId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(pub u32);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseKind {
    Mission {
        mission: MissionId,
        category: MissionExpenseCategory,
    },
    General {
        category: GeneralExpenseCategory,
    },
}

impl ExpenseKind {
    pub fn mission(&self) -> Option<MissionId> {
        match self {
            ExpenseKind::Mission { mission, .. } => Some(*mission),
            ExpenseKind::General { .. } => None,
        }
    }

    pub fn category_label(&self) -> &'static str {
        match self {
            ExpenseKind::Mission { category, .. } => category.label(),
            ExpenseKind::General { category } => category.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub kind: ExpenseKind,
    pub amount: Decimal,
    pub description: String,
}

/// Properties to record a new expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub kind: ExpenseKind,
    pub amount: Decimal,
    pub description: String,
}
