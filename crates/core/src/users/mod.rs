//! Users module - accounts, secrets, sessions and login.

mod password_hash;
mod users_model;
mod users_service;
mod users_traits;


pub use password_hash::{hash_password, verify_password, HASH_BYTE_SIZE, SALT_BYTE_SIZE};
pub use users_model::{
    LoginRequest, ResetPassword, Token, User, UserIdentity, UserInput, UserSecret, UserSession,
};
pub use users_service::UserService;
pub use users_traits::{TokenIssuerTrait, UserRepositoryTrait, UserServiceTrait};
