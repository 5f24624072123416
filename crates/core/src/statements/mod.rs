//! Statements module - the billing-cycle engine.
//!
//! A statement ("fatura") is defined by its closing date, not by the
//! calendar month: a purchase on the 5th with a card closing on the 10th
//! belongs to the statement closing on the 10th of that same month, while a
//! purchase on the 15th belongs to the next month's closing.

mod billing;
mod statements_model;
mod statements_service;

pub use billing::{preview_period, resolve_period};
pub use statements_model::{BillingPeriod, Statement};
pub use statements_service::{
    statement_occurrences, statement_total, StatementService, StatementServiceTrait,
};
