mod model;
mod repository;

pub use model::{GoalChangesetDB, GoalDB};
pub use repository::GoalRepository;
