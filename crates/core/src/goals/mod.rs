//! Goals module - savings goals and their contributions.

mod goals_model;
mod goals_service;
mod goals_traits;

pub use goals_model::{Contribution, Goal, GoalView, NewContribution, NewGoal};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
