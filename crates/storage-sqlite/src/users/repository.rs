use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use workwise_core::users::{User, UserRepositoryTrait, UserSecret, UserSession};
use workwise_core::Result;

use super::model::{UserChangesetDB, UserDB, UserSecretDB, UserSessionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{user_secret, user_session, users};

fn close_active_sessions(
    conn: &mut SqliteConnection,
    user_id: &str,
    actor_id: &str,
    at: NaiveDateTime,
) -> Result<usize> {
    diesel::update(
        user_session::table
            .filter(user_session::user_id.eq(user_id))
            .filter(user_session::is_active.eq(true)),
    )
    .set((
        user_session::logout_time.eq(at),
        user_session::is_active.eq(false),
        user_session::date_updated.eq(at),
        user_session::updated_by.eq(actor_id),
    ))
    .execute(conn)
    .into_core()
}

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Active sessions of a user, oldest first.
    pub fn list_active_sessions(&self, user_id: &str) -> Result<Vec<UserSession>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = user_session::table
            .filter(user_session::user_id.eq(user_id))
            .filter(user_session::is_active.eq(true))
            .order(user_session::login_time.asc())
            .select(UserSessionDB::as_select())
            .load::<UserSessionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(UserSession::from).collect())
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::id.eq(user_id))
            .filter(users::is_active.eq(true))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| User::try_from(r).map_err(Into::into))
            .transpose()
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::email.eq(email))
            .filter(users::is_active.eq(true))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| User::try_from(r).map_err(Into::into))
            .transpose()
    }

    fn find_secret(&self, user_id: &str) -> Result<Option<UserSecret>> {
        let mut conn = get_connection(&self.pool)?;
        let row = user_secret::table
            .filter(user_secret::user_id.eq(user_id))
            .filter(user_secret::is_active.eq(true))
            .select(UserSecretDB::as_select())
            .first::<UserSecretDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(UserSecret::from))
    }

    async fn create_user_with_secret(&self, user: User, secret: UserSecret) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                let inserted = diesel::insert_into(users::table)
                    .values(&UserDB::from_domain(user, now))
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                diesel::insert_into(user_secret::table)
                    .values(&UserSecretDB::from_domain(secret, now))
                    .execute(conn)
                    .into_core()?;
                User::try_from(inserted).map_err(Into::into)
            })
            .await
    }

    async fn update_user(&self, user: User, actor_id: &str) -> Result<User> {
        let actor_id = actor_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let user_id = user.id.clone();
                let changes = UserChangesetDB::from_domain(user, &actor_id, Utc::now().naive_utc());
                let updated = diesel::update(
                    users::table
                        .filter(users::id.eq(&user_id))
                        .filter(users::is_active.eq(true)),
                )
                .set(&changes)
                .returning(UserDB::as_returning())
                .get_result(conn)
                .into_core()?;
                User::try_from(updated).map_err(Into::into)
            })
            .await
    }

    async fn update_secret(&self, secret: UserSecret, actor_id: &str) -> Result<()> {
        let actor_id = actor_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(user_secret::table.find(&secret.id))
                    .set((
                        user_secret::secret.eq(&secret.secret),
                        user_secret::date_updated.eq(Utc::now().naive_utc()),
                        user_secret::updated_by.eq(&actor_id),
                    ))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn create_session(&self, session: UserSession) -> Result<UserSession> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserSession> {
                let inserted = diesel::insert_into(user_session::table)
                    .values(&UserSessionDB::from_domain(session))
                    .returning(UserSessionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(UserSession::from(inserted))
            })
            .await
    }

    async fn close_sessions(&self, user_id: &str, at: NaiveDateTime) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                close_active_sessions(conn, &user_id, &user_id, at)
            })
            .await
    }

    async fn deactivate_user(
        &self,
        user_id: &str,
        actor_id: &str,
        at: NaiveDateTime,
    ) -> Result<()> {
        let user_id = user_id.to_string();
        let actor_id = actor_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(
                    users::table
                        .filter(users::id.eq(&user_id))
                        .filter(users::is_active.eq(true)),
                )
                .set((
                    users::is_active.eq(false),
                    users::date_updated.eq(at),
                    users::updated_by.eq(&actor_id),
                ))
                .execute(conn)
                .into_core()?;

                close_active_sessions(conn, &user_id, &actor_id, at)?;

                diesel::update(
                    user_secret::table
                        .filter(user_secret::user_id.eq(&user_id))
                        .filter(user_secret::is_active.eq(true)),
                )
                .set((
                    user_secret::is_active.eq(false),
                    user_secret::date_updated.eq(at),
                    user_secret::updated_by.eq(&actor_id),
                ))
                .execute(conn)
                .into_core()?;
                Ok(())
            })
            .await
    }
}
