use crate::categories::categories_model::{
    Category, CategoryDeleteOutcome, CategoryDeleteStatus, NewCategory,
};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use async_trait::async_trait;
use std::sync::Arc;

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { category_repo }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self) -> Result<Vec<Category>> {
        self.category_repo.get_active_categories()
    }

    fn get_all_categories(&self) -> Result<Vec<Category>> {
        self.category_repo.get_all_categories()
    }

    async fn create_category(&self, name: String) -> Result<Category> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }

        // A deactivated category with the same name comes back to life
        // instead of producing a duplicate.
        if let Some(existing) = self.category_repo.find_by_name(&name)? {
            if existing.is_active {
                return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                    "A category named '{}' already exists",
                    name
                ))));
            }
            return self.category_repo.reactivate_category(&existing.id).await;
        }

        self.category_repo
            .create_category(NewCategory { id: None, name })
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<CategoryDeleteOutcome> {
        if self.category_repo.get_category_by_id(id)?.is_none() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Category '{}' not found",
                id
            ))));
        }

        let status = self.category_repo.delete_or_deactivate_category(id).await?;
        let message = match status {
            CategoryDeleteStatus::SoftDeleted => {
                "Category is in use and was deactivated. Reassign its expenses to remove it permanently."
                    .to_string()
            }
            CategoryDeleteStatus::Deleted => "Category removed.".to_string(),
        };
        Ok(CategoryDeleteOutcome { status, message })
    }
}
