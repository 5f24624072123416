//! Aggregation result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One occurrence inside a bucket, for drill-down tooltips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BucketEntry {
    pub name: String,
    pub value: Decimal,
}

/// One chart bucket: a category or a responsible with its rounded total.
///
/// Buckets come out in first-encounter order; consumers needing a sorted or
/// chart-specific order sort explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingBucket {
    pub name: String,
    pub total: Decimal,
    pub entries: Vec<BucketEntry>,
}

/// KPI row of the dashboard for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub total: Decimal,
    pub card_total: Decimal,
    pub debit_total: Decimal,
    pub transaction_count: usize,
    pub average_value: Decimal,
}
