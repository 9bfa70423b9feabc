mod model;
mod repository;

pub use model::{UserChangesetDB, UserDB, UserSecretDB, UserSessionDB};
pub use repository::UserRepository;
