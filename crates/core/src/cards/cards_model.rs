//! Credit-card domain models.

use serde::{Deserialize, Serialize};

/// Domain model representing a credit card.
///
/// `closing_day` is the day-of-month the statement closes on. It may exceed
/// a given month's day count (e.g. 31); the billing engine clamps it to the
/// month's last valid day when resolving periods.
///
/// Deactivating a card only removes it from the pickers for new expenses;
/// historical expenses keep referencing it and its statements stay queryable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub closing_day: u32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new card.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub id: Option<String>,
    pub name: String,
    pub closing_day: u32,
}
