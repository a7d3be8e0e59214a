pub use error::EngineError;
pub use ops::{
    BudgetChanges, BudgetDraft, Engine, EngineBuilder, ExpenseChanges, ExpenseDraft,
};
pub use status::BudgetStatus;

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod status;
pub mod users;

mod error;
mod ops;

pub(crate) type ResultEngine<T> = Result<T, EngineError>;
