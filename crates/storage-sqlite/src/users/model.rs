//! Database models for users, secrets and sessions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_stored;
use workwise_core::users::{User, UserSecret, UserSession};

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
    pub created_by: String,
    pub updated_by: String,
    pub is_active: bool,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChangesetDB {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub date_updated: NaiveDateTime,
    pub updated_by: String,
}

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_secret)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSecretDB {
    pub id: String,
    pub user_id: String,
    pub secret: String,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
    pub created_by: String,
    pub updated_by: String,
    pub is_active: bool,
}

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_session)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSessionDB {
    pub id: String,
    pub user_id: String,
    pub login_time: NaiveDateTime,
    pub logout_time: NaiveDateTime,
    pub date_created: NaiveDateTime,
    pub date_updated: NaiveDateTime,
    pub created_by: String,
    pub updated_by: String,
    pub is_active: bool,
}

impl UserDB {
    /// Users register themselves, so the row is created by its own id.
    pub fn from_domain(user: User, now: NaiveDateTime) -> Self {
        Self {
            created_by: user.id.clone(),
            updated_by: user.id.clone(),
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role.to_string(),
            date_created: now,
            date_updated: now,
            is_active: true,
        }
    }
}

impl UserChangesetDB {
    pub fn from_domain(user: User, actor_id: &str, now: NaiveDateTime) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role.to_string(),
            date_updated: now,
            updated_by: actor_id.to_string(),
        }
    }
}

impl UserSecretDB {
    pub fn from_domain(secret: UserSecret, now: NaiveDateTime) -> Self {
        Self {
            created_by: secret.user_id.clone(),
            updated_by: secret.user_id.clone(),
            id: secret.id,
            user_id: secret.user_id,
            secret: secret.secret,
            date_created: now,
            date_updated: now,
            is_active: true,
        }
    }
}

impl UserSessionDB {
    pub fn from_domain(session: UserSession) -> Self {
        Self {
            created_by: session.user_id.clone(),
            updated_by: session.user_id.clone(),
            date_created: session.login_time,
            date_updated: session.login_time,
            id: session.id,
            user_id: session.user_id,
            login_time: session.login_time,
            logout_time: session.logout_time,
            is_active: true,
        }
    }
}

impl TryFrom<UserDB> for User {
    type Error = StorageError;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: parse_stored("users.role", &db.role)?,
            id: db.id,
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
            phone_number: db.phone_number,
        })
    }
}

impl From<UserSecretDB> for UserSecret {
    fn from(db: UserSecretDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            secret: db.secret,
        }
    }
}

impl From<UserSessionDB> for UserSession {
    fn from(db: UserSessionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            login_time: db.login_time,
            logout_time: db.logout_time,
        }
    }
}
