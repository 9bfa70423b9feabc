use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::users::users_model::{
    ResetPassword, Token, User, UserIdentity, UserInput, UserSecret, UserSession,
};

/// Storage for users, their secrets and their sessions.
///
/// Lookups only see active rows.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_user(&self, user_id: &str) -> Result<Option<User>>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn find_secret(&self, user_id: &str) -> Result<Option<UserSecret>>;
    /// Inserts the user and its first secret in one transaction.
    async fn create_user_with_secret(&self, user: User, secret: UserSecret) -> Result<User>;
    async fn update_user(&self, user: User, actor_id: &str) -> Result<User>;
    async fn update_secret(&self, secret: UserSecret, actor_id: &str) -> Result<()>;
    async fn create_session(&self, session: UserSession) -> Result<UserSession>;
    /// Closes every active session of the user at `at`. Returns how many were closed.
    async fn close_sessions(&self, user_id: &str, at: NaiveDateTime) -> Result<usize>;
    /// Deactivates the user and its secret and closes its sessions, atomically.
    async fn deactivate_user(&self, user_id: &str, actor_id: &str, at: NaiveDateTime)
        -> Result<()>;
}

/// Signs access tokens. Implemented at the HTTP boundary.
pub trait TokenIssuerTrait: Send + Sync {
    fn issue_token(&self, identity: &UserIdentity) -> Result<String>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Token>;
    async fn logout(&self, user_id: &str) -> Result<()>;
    /// Returns the new user's id.
    async fn create_user(&self, input: UserInput) -> Result<String>;
    /// Account operations are open to the user itself and to admins.
    fn get_user(&self, user_id: &str, actor_id: &str) -> Result<User>;
    async fn update_user(&self, user_id: &str, input: UserInput, actor_id: &str) -> Result<User>;
    async fn delete_user(&self, user_id: &str, actor_id: &str) -> Result<()>;
    async fn reset_password(&self, reset: ResetPassword, user_id: &str) -> Result<()>;
}
