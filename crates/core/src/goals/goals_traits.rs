use crate::errors::Result;
use crate::goals::goals_model::{Contribution, Goal, GoalView, NewContribution, NewGoal};
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal_by_id(&self, id: &str) -> Result<Option<Goal>>;
    /// Contributions for every goal, oldest first
    fn load_contributions(&self) -> Result<Vec<Contribution>>;
    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    /// Deleting a goal cascades to its contributions
    async fn delete_goal(&self, id: &str) -> Result<usize>;
    async fn insert_contribution(
        &self,
        goal_id: &str,
        new_contribution: NewContribution,
    ) -> Result<Contribution>;
    async fn delete_contribution(&self, id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    /// Goals with contributions and the derived `current_value`
    fn get_goals(&self) -> Result<Vec<GoalView>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn delete_goal(&self, id: &str) -> Result<usize>;
    async fn add_contribution(
        &self,
        goal_id: &str,
        new_contribution: NewContribution,
    ) -> Result<Contribution>;
    async fn delete_contribution(&self, id: &str) -> Result<usize>;
}
