//! Category domain models.

use serde::{Deserialize, Serialize};

/// Domain model representing an expense category.
///
/// A category referenced by historical expenses is never hard-deleted;
/// it is deactivated instead and disappears from the pickers only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new category.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub name: String,
}

/// What actually happened when a category was deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CategoryDeleteStatus {
    /// The category is referenced by expenses and was deactivated instead.
    SoftDeleted,
    /// The category had no expenses and was removed.
    Deleted,
}

/// Delete result handed to the presentation layer, which phrases the
/// notification differently for the two outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDeleteOutcome {
    pub status: CategoryDeleteStatus,
    pub message: String,
}
