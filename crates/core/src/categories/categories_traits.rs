use crate::categories::categories_model::{
    Category, CategoryDeleteOutcome, CategoryDeleteStatus, NewCategory,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Get active categories, ordered by name
    fn get_active_categories(&self) -> Result<Vec<Category>>;

    /// Get all categories, including deactivated ones
    fn get_all_categories(&self) -> Result<Vec<Category>>;

    /// Get a category by ID
    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>>;

    /// Find a category by its exact name, active or not
    fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Create a new category
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Mark a deactivated category as active again
    async fn reactivate_category(&self, id: &str) -> Result<Category>;

    /// Delete a category, or deactivate it when expenses still reference it.
    /// The decision is made inside the write transaction.
    async fn delete_or_deactivate_category(&self, id: &str) -> Result<CategoryDeleteStatus>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Categories offered in the "new expense" picker (active only)
    fn get_categories(&self) -> Result<Vec<Category>>;

    /// All categories, including ones only attached to historical expenses
    fn get_all_categories(&self) -> Result<Vec<Category>>;

    /// Create a category; reactivates a deactivated category of the same name
    async fn create_category(&self, name: String) -> Result<Category>;

    /// Delete a category (soft-delete when in use)
    async fn delete_category(&self, id: &str) -> Result<CategoryDeleteOutcome>;
}
