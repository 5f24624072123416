use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::goals::goals_model::{Contribution, Goal, GoalView, NewContribution, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::utils::round2;
use async_trait::async_trait;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repo }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<GoalView>> {
        let goals = self.goal_repo.load_goals()?;
        let mut by_goal: HashMap<String, Vec<Contribution>> = HashMap::new();
        for contribution in self.goal_repo.load_contributions()? {
            by_goal
                .entry(contribution.goal_id.clone())
                .or_default()
                .push(contribution);
        }

        Ok(goals
            .into_iter()
            .map(|goal| {
                let contributions = by_goal.remove(&goal.id).unwrap_or_default();
                let current_value = round2(
                    contributions
                        .iter()
                        .fold(Decimal::zero(), |acc, c| acc + c.amount),
                );
                GoalView {
                    id: goal.id,
                    name: goal.name,
                    target_amount: goal.target_amount,
                    target_date: goal.target_date,
                    current_value,
                    created_at: goal.created_at,
                    contributions,
                }
            })
            .collect())
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let name = new_goal.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if new_goal.target_amount <= Decimal::zero() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "target amount must be positive".to_string(),
            )));
        }
        self.goal_repo
            .insert_new_goal(NewGoal {
                id: new_goal.id,
                name,
                target_amount: new_goal.target_amount,
                target_date: new_goal.target_date,
            })
            .await
    }

    async fn delete_goal(&self, id: &str) -> Result<usize> {
        let deleted = self.goal_repo.delete_goal(id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Goal '{}' not found",
                id
            ))));
        }
        Ok(deleted)
    }

    async fn add_contribution(
        &self,
        goal_id: &str,
        new_contribution: NewContribution,
    ) -> Result<Contribution> {
        if self.goal_repo.get_goal_by_id(goal_id)?.is_none() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Goal '{}' not found",
                goal_id
            ))));
        }
        if new_contribution.amount <= Decimal::zero() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "contribution amount must be positive".to_string(),
            )));
        }
        if new_contribution.responsible.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "responsible".to_string(),
            )));
        }
        self.goal_repo
            .insert_contribution(goal_id, new_contribution)
            .await
    }

    async fn delete_contribution(&self, id: &str) -> Result<usize> {
        let deleted = self.goal_repo.delete_contribution(id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Contribution '{}' not found",
                id
            ))));
        }
        Ok(deleted)
    }
}
