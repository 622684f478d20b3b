use sqlx::PgConnection;

use kernel::interface::query::MovieQuery;
use kernel::prelude::entity::{AdultsOnly, Movie, MovieId, MovieName, RentalId};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery<PostgresConnection> for PostgresMovieRepository {
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: i32,
    name: String,
    adults_only: bool,
    rental_id: Option<i32>,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.id),
            MovieName::new(value.name),
            AdultsOnly::new(value.adults_only),
            value.rental_id.map(RentalId::new),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, name, adults_only, rental_id
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Movie::from))
    }

    pub(in crate::database) async fn find_by_rental_id(
        con: &mut PgConnection,
        rental_id: &RentalId,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, name, adults_only, rental_id
            FROM movies
            WHERE rental_id = $1
            ORDER BY id
            "#,
        )
        .bind(rental_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }
}
