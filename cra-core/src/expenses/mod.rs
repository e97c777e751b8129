mod categories;
mod expense;
mod expense_ledger;

pub use categories::{GeneralExpenseCategory, MissionExpenseCategory};
pub use expense::{Expense, ExpenseId, ExpenseKind, NewExpense};
pub use expense_ledger::ExpenseLedger;
