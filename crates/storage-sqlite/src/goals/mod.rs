mod model;
mod repository;

pub use model::{ContributionDB, GoalDB};
pub use repository::GoalRepository;
