//! Insights module - chart-ready monthly aggregations.

mod insights_model;
mod insights_service;

pub use insights_model::{BucketEntry, MonthSummary, SpendingBucket};
pub use insights_service::{
    aggregate_by_category, aggregate_by_responsible, filter_occurrences, month_summary,
    InsightService, InsightServiceTrait,
};
