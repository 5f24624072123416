use contas_core::goals::{Contribution, Goal, GoalRepositoryTrait, NewContribution, NewGoal};
use contas_core::Result;

use super::model::{ContributionDB, GoalDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{contributions, goals};
use crate::utils::now_rfc3339;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct GoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .order(goals::created_at.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get_goal_by_id(&self, id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .find(id)
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Goal::from))
    }

    fn load_contributions(&self) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = contributions::table
            .order(contributions::contribution_date.asc())
            .load::<ContributionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Contribution::from).collect())
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = GoalDB {
                    id: new_goal.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_goal.name,
                    target_amount: new_goal.target_amount.to_string(),
                    target_date: new_goal.target_date.to_string(),
                    created_at: now_rfc3339(),
                };

                let result = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result))
            })
            .await
    }

    async fn delete_goal(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // contributions go with the goal (ON DELETE CASCADE)
                Ok(diesel::delete(goals::table.find(&id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn insert_contribution(
        &self,
        goal_id: &str,
        new_contribution: NewContribution,
    ) -> Result<Contribution> {
        let goal_id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Contribution> {
                let row = ContributionDB {
                    id: new_contribution
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    goal_id: goal_id_owned,
                    amount: new_contribution.amount.to_string(),
                    responsible: new_contribution.responsible,
                    contribution_date: new_contribution.contribution_date.to_string(),
                    created_at: now_rfc3339(),
                };

                let result = diesel::insert_into(contributions::table)
                    .values(&row)
                    .returning(ContributionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Contribution::from(result))
            })
            .await
    }

    async fn delete_contribution(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(contributions::table.find(&id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
