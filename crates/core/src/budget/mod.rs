//! Budget entities, validation, and the entity store.

pub mod error;
pub mod store;
pub mod types;
pub mod validation;


pub use error::BudgetError;
pub use store::BudgetStore;
pub use types::{
    Budget, BudgetFilter, BudgetItem, BudgetPatch, BudgetStatus, CreateBudgetInput,
    CreateBudgetItemInput, DateRange, RecurrenceMarker,
};
