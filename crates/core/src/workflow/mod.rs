//! Budget approval workflow: state machine, engine, and errors.

pub mod engine;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod tests;

pub use engine::WorkflowEngine;
pub use error::WorkflowError;
pub use service::TransitionService;
pub use types::WorkflowAction;
