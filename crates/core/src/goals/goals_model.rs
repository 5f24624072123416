//! Goal domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    pub created_at: String,
}

/// Input model for creating a new goal.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
}

/// One contribution toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub goal_id: String,
    pub amount: Decimal,
    pub responsible: String,
    pub contribution_date: NaiveDate,
    pub created_at: String,
}

/// Input model for adding a contribution.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub id: Option<String>,
    pub amount: Decimal,
    pub responsible: String,
    pub contribution_date: NaiveDate,
}

/// Goal with its contributions and the derived progress value.
///
/// `current_value` is always the rounded sum of the live contributions,
/// recomputed on every read; there is no other mutation path for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: NaiveDate,
    pub current_value: Decimal,
    pub created_at: String,
    pub contributions: Vec<Contribution>,
}
