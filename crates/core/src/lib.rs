//! Core business logic for Mandira.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Budget entity store and validation
//! - `workflow` - Approval state machine and transition engine
//! - `utilization` - Utilization aggregation over ledger postings
//! - `recurring` - Recurring budget generation
//! - `reports` - Read-only reporting projections
//! - `directory` - External collaborator interfaces (funds, ledgers, postings)

pub mod budget;
pub mod directory;
pub mod recurring;
pub mod reports;
pub mod utilization;
pub mod workflow;
