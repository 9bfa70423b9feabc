use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use crate::constants::{AUTH_ITERATIONS_KEY, BEARER_TOKEN_TYPE, DEFAULT_PASSWORD};
use crate::enums::Role;
use crate::errors::{Error, Result};
use crate::users::password_hash::{hash_password, verify_password};
use crate::users::users_model::{
    ResetPassword, Token, User, UserIdentity, UserInput, UserSecret, UserSession,
};
use crate::users::users_traits::{TokenIssuerTrait, UserRepositoryTrait, UserServiceTrait};

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    token_issuer: Arc<dyn TokenIssuerTrait>,
    iterations: Option<u32>,
}

impl UserService {
    /// `iterations` is the password hashing cost; password operations fail
    /// with an internal error while it is unset.
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        token_issuer: Arc<dyn TokenIssuerTrait>,
        iterations: Option<u32>,
    ) -> Self {
        Self {
            user_repo,
            token_issuer,
            iterations,
        }
    }

    fn iterations(&self) -> Result<u32> {
        self.iterations.ok_or_else(|| {
            warn!("{} is not configured", AUTH_ITERATIONS_KEY);
            Error::missing_config(AUTH_ITERATIONS_KEY)
        })
    }

    fn find_user(&self, user_id: &str) -> Result<User> {
        self.user_repo.find_user(user_id)?.ok_or_else(|| {
            warn!("User for id {} not found", user_id);
            Error::not_found("User not found", "User not found for given Id")
        })
    }

    fn is_admin(&self, actor_id: &str) -> Result<bool> {
        Ok(self
            .user_repo
            .find_user(actor_id)?
            .is_some_and(|actor| actor.role == Role::Admin))
    }

    /// Users manage their own account; admins manage any.
    fn authorize(&self, user_id: &str, actor_id: &str) -> Result<()> {
        if user_id == actor_id || self.is_admin(actor_id)? {
            return Ok(());
        }
        warn!("User {} is not allowed to manage user {}", actor_id, user_id);
        Err(Error::forbidden(
            "Operation not allowed",
            "You are not allowed to manage this user",
        ))
    }

    fn verify_secret(&self, user_id: &str, password: &str, iterations: u32) -> Result<bool> {
        match self.user_repo.find_secret(user_id)? {
            Some(secret) => verify_password(password, &secret.secret, iterations),
            None => {
                warn!("No active secret for user {}", user_id);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn login(&self, email: &str, password: &str) -> Result<Token> {
        info!("Validating credentials for login");
        let user = self.user_repo.find_user_by_email(email)?.ok_or_else(|| {
            warn!("User not found");
            Error::not_found(
                "User not found",
                "The username or the password you entered is incorrect",
            )
        })?;
        let iterations = self.iterations()?;

        if !self.verify_secret(&user.id, password, iterations)? {
            warn!("Invalid credentials for user {}", user.id);
            return Err(Error::forbidden(
                "The Username or the password you entered is incorrect",
                "The Username or the password you entered is incorrect",
            ));
        }

        let access_token = self.token_issuer.issue_token(&UserIdentity::from(&user))?;
        let now = Utc::now().naive_utc();
        let session = self
            .user_repo
            .create_session(UserSession {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                login_time: now,
                logout_time: now,
            })
            .await?;
        debug!("User logged in, session {}", session.id);

        Ok(Token {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        })
    }

    async fn logout(&self, user_id: &str) -> Result<()> {
        let closed = self
            .user_repo
            .close_sessions(user_id, Utc::now().naive_utc())
            .await?;
        debug!("Closed {} sessions for user {}", closed, user_id);
        Ok(())
    }

    async fn create_user(&self, input: UserInput) -> Result<String> {
        debug!("Create user for given details");
        input.validate()?;
        if self.user_repo.find_user_by_email(&input.email)?.is_some() {
            warn!("User for the email already exists");
            return Err(Error::conflict("User already exists", "user already exists"));
        }
        let iterations = self.iterations()?;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone_number: input.phone_number,
            // Sign-up is open, so roles are only granted by an admin later.
            role: Role::User,
        };
        let secret = UserSecret {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            secret: hash_password(DEFAULT_PASSWORD, iterations)?,
        };

        let created = self.user_repo.create_user_with_secret(user, secret).await?;
        info!("Created user {}", created.id);
        Ok(created.id)
    }

    fn get_user(&self, user_id: &str, actor_id: &str) -> Result<User> {
        self.authorize(user_id, actor_id)?;
        self.find_user(user_id)
    }

    async fn update_user(&self, user_id: &str, input: UserInput, actor_id: &str) -> Result<User> {
        self.authorize(user_id, actor_id)?;
        input.validate()?;
        let mut user = self.user_repo.find_user(user_id)?.ok_or_else(|| {
            Error::not_found("The user not found.", "The user not found for given id")
        })?;

        if let Some(other) = self.user_repo.find_user_by_email(&input.email)? {
            if other.id != user.id {
                return Err(Error::conflict(
                    "The email id already exists",
                    "The email id already exists. Please provide a different id",
                ));
            }
        }

        if input.role != user.role && !self.is_admin(actor_id)? {
            warn!("User {} tried to change the role of {}", actor_id, user_id);
            return Err(Error::forbidden(
                "Operation not allowed",
                "Only administrators can change roles",
            ));
        }

        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.email = input.email;
        user.phone_number = input.phone_number;
        user.role = input.role;
        self.user_repo.update_user(user, actor_id).await
    }

    async fn delete_user(&self, user_id: &str, actor_id: &str) -> Result<()> {
        self.authorize(user_id, actor_id)?;
        let user = self.find_user(user_id)?;
        self.user_repo
            .deactivate_user(&user.id, actor_id, Utc::now().naive_utc())
            .await?;
        info!("Deactivated user {}", user_id);
        Ok(())
    }

    async fn reset_password(&self, reset: ResetPassword, user_id: &str) -> Result<()> {
        let user = self
            .user_repo
            .find_user(user_id)?
            .filter(|u| u.email == reset.email)
            .ok_or_else(|| {
                warn!("User not found");
                Error::not_found("User not found", "The email you entered doesn't exist")
            })?;
        let iterations = self.iterations()?;

        let secret = match self.user_repo.find_secret(&user.id)? {
            Some(secret) if verify_password(&reset.current_password, &secret.secret, iterations)? => {
                secret
            }
            _ => {
                return Err(Error::forbidden(
                    "The current password is incorrect",
                    "The current password you entered is incorrect",
                ))
            }
        };

        let updated = UserSecret {
            secret: hash_password(&reset.new_password, iterations)?,
            ..secret
        };
        self.user_repo.update_secret(updated, user_id).await?;
        info!("Password reset for user {}", user_id);
        Ok(())
    }
}
