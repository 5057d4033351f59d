use super::{with_conn, DbPool};
use async_trait::async_trait;
use diesel::prelude::*;
use estate_primitives::error::{ApiError, AuthError};
use estate_primitives::models::entities::{NewUser, User};
use estate_primitives::schema::users;
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `AuthError::DuplicateEmail` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, ApiError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, ApiError> {
        with_conn(&self.pool, move |conn| {
            diesel::insert_into(users::table)
                .values(&user)
                .get_result::<User>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _,
                    ) => ApiError::Auth(AuthError::DuplicateEmail),
                    other => ApiError::from(other),
                })
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let email = email.to_string();
        with_conn(&self.pool, move |conn| {
            users::table
                .filter(users::email.eq(email))
                .first::<User>(conn)
                .optional()
                .map_err(ApiError::from)
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        with_conn(&self.pool, move |conn| {
            users::table
                .find(id)
                .first::<User>(conn)
                .optional()
                .map_err(ApiError::from)
        })
        .await
    }
}
