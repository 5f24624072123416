//! Database models for cards.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use contas_core::cards::Card;

/// Database model for cards
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
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CardDB {
    pub id: String,
    pub name: String,
    pub closing_day: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CardDB> for Card {
    fn from(db: CardDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            // stored values come from validated input; a negative value in a
            // hand-edited database degrades to day 1
            closing_day: u32::try_from(db.closing_day).unwrap_or(1),
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
