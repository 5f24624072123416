use contas_core::categories::{
    Category, CategoryDeleteStatus, CategoryRepositoryTrait, NewCategory,
};
use contas_core::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, expenses};
use crate::utils::now_rfc3339;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_active_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::is_active.eq(true))
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_all_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .find(id)
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Category::from))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .filter(categories::name.eq(name))
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Category::from))
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let now = now_rfc3339();
                let row = CategoryDB {
                    id: new_category
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_category.name,
                    is_active: true,
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result))
            })
            .await
    }

    async fn reactivate_category(&self, id: &str) -> Result<Category> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                diesel::update(categories::table.find(&id_owned))
                    .set((
                        categories::is_active.eq(true),
                        categories::updated_at.eq(now_rfc3339()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let row = categories::table
                    .find(&id_owned)
                    .first::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(row))
            })
            .await
    }

    async fn delete_or_deactivate_category(&self, id: &str) -> Result<CategoryDeleteStatus> {
        let id_owned = id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<CategoryDeleteStatus> {
                    let referencing: i64 = expenses::table
                        .filter(expenses::category_id.eq(&id_owned))
                        .count()
                        .get_result(conn)
                        .map_err(StorageError::from)?;

                    if referencing > 0 {
                        diesel::update(categories::table.find(&id_owned))
                            .set((
                                categories::is_active.eq(false),
                                categories::updated_at.eq(now_rfc3339()),
                            ))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                        Ok(CategoryDeleteStatus::SoftDeleted)
                    } else {
                        diesel::delete(categories::table.find(&id_owned))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                        Ok(CategoryDeleteStatus::Deleted)
                    }
                },
            )
            .await
    }
}
