mod movie;
mod rental;
mod user;

pub use self::{movie::*, rental::*, user::*};
use crate::env;
use crate::error::ConvertError;
use error_stack::{Report, ResultExt};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;
use sqlx::{Error, PgConnection, Pool, Postgres};
use std::ops::{Deref, DerefMut};

static POSTGRES_URL: &str = "POSTGRES_URL";

pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to run migrations")?;
        tracing::info!("Connected to postgres");
        Ok(Self { pool })
    }
}

impl Clone for PostgresDatabase {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresConnection> for PostgresDatabase {
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

pub struct PostgresConnection(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match error {
            Error::PoolTimedOut => Report::from(error).change_context(KernelError::Timeout),
            _ => Report::from(error).change_context(KernelError::Internal),
        })
    }
}

#[cfg(test)]
pub(in crate::database) mod fixture {
    use rand::distributions::Alphanumeric;
    use rand::Rng;
    use sqlx::PgConnection;
    use time::macros::date;

    use kernel::prelude::entity::{MovieId, RentalId, UserId};

    use crate::error::ConvertError;

    fn tag() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect()
    }

    pub async fn insert_user(con: &mut PgConnection) -> error_stack::Result<UserId, kernel::KernelError> {
        let tag = tag();
        let (id,): (i32,) = sqlx::query_as(
            // language=postgresql
            r#"
            INSERT INTO users (first_name, last_name, email, birth_date, national_id)
            VALUES ('Test', 'User', $1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(format!("{}@example.com", tag))
        .bind(date!(1990 - 05 - 20))
        .bind(tag)
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(UserId::new(id))
    }

    pub async fn insert_movie(
        con: &mut PgConnection,
        adults_only: bool,
        rental_id: Option<&RentalId>,
    ) -> error_stack::Result<MovieId, kernel::KernelError> {
        let (id,): (i32,) = sqlx::query_as(
            // language=postgresql
            r#"
            INSERT INTO movies (name, adults_only, rental_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(tag())
        .bind(adults_only)
        .bind(rental_id.map(|id| *id.as_ref()))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(MovieId::new(id))
    }
}
