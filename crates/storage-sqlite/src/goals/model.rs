//! Database models for goals and contributions.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use contas_core::goals::{Contribution, Goal};

use crate::utils::{parse_date, parse_decimal};

/// Database model for goals
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub name: String,
    pub target_amount: String,
    pub target_date: String,
    pub created_at: String,
}

/// Database model for contributions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ContributionDB {
    pub id: String,
    pub goal_id: String,
    pub amount: String,
    pub responsible: String,
    pub contribution_date: String,
    pub created_at: String,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            target_amount: parse_decimal(&db.target_amount, "target_amount"),
            target_date: parse_date(&db.target_date, "target_date"),
            id: db.id,
            name: db.name,
            created_at: db.created_at,
        }
    }
}

impl From<ContributionDB> for Contribution {
    fn from(db: ContributionDB) -> Self {
        Self {
            amount: parse_decimal(&db.amount, "amount"),
            contribution_date: parse_date(&db.contribution_date, "contribution_date"),
            id: db.id,
            goal_id: db.goal_id,
            responsible: db.responsible,
            created_at: db.created_at,
        }
    }
}
