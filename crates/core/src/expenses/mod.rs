//! Expenses module - domain models, installment expansion, services, traits.

pub mod expander;
mod expenses_model;
mod expenses_service;
mod expenses_traits;

pub use expenses_model::{
    CardRef, CategoryRef, Expense, ExpenseUpdate, ExpenseView, NewExpense, Occurrence, PaymentType,
};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};

#[cfg(test)]
pub(crate) use expenses_service::test_support;
