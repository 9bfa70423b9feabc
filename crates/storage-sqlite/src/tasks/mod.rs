mod model;
mod repository;

pub use model::{TaskChangesetDB, TaskDB};
pub use repository::TaskRepository;
pub(crate) use repository::insert_tasks;
