use sqlx::PgConnection;
use time::OffsetDateTime;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    EndedAt, NewRental, Rental, RentalClosed, RentalDetail, RentalId, RentedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::movie::PgMovieInternal;
use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<PostgresConnection> for PostgresRentalRepository {
    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier<PostgresConnection> for PostgresRentalRepository {
    async fn create(
        &self,
        con: &mut PostgresConnection,
        rental: &NewRental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn finish(
        &self,
        con: &mut PostgresConnection,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::finish(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: i32,
    user_id: i32,
    closed: bool,
    date: OffsetDateTime,
    end_date: Option<OffsetDateTime>,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            UserId::new(value.user_id),
            RentalClosed::new(value.closed),
            RentedAt::new(value.date),
            value.end_date.map(EndedAt::new),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, closed, date, end_date
            FROM rentals
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, closed, date, end_date
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        let Some(row) = row else {
            return Ok(None);
        };
        let movies = PgMovieInternal::find_by_rental_id(con, id).await?;
        Ok(Some(RentalDetail::new(Rental::from(row), movies)))
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, closed, date, end_date
            FROM rentals
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn create(con: &mut PgConnection, rental: &NewRental) -> error_stack::Result<(), KernelError> {
        let (id,): (i32,) = sqlx::query_as(
            // language=postgresql
            r#"
            INSERT INTO rentals (user_id)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(rental.user_id().as_ref())
        .fetch_one(&mut *con)
        .await
        .convert_error()?;

        let movie_ids = rental
            .movie_ids()
            .iter()
            .map(|id| *id.as_ref())
            .collect::<Vec<i32>>();
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET rental_id = $1
            WHERE id = ANY($2)
            "#,
        )
        .bind(id)
        .bind(movie_ids)
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!("Inserted rental {}", id);
        Ok(())
    }

    async fn finish(con: &mut PgConnection, id: &RentalId) -> error_stack::Result<(), KernelError> {
        // Already closed rentals keep their original end date.
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET closed = TRUE, end_date = now()
            WHERE id = $1 AND closed = FALSE
            "#,
        )
        .bind(id.as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;

        let released = sqlx::query(
            // language=postgresql
            r#"
            UPDATE movies
            SET rental_id = NULL
            WHERE rental_id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(
            "Closed rental {} and released {} movies",
            id.as_ref(),
            released.rows_affected()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{MovieQuery, RentalQuery};
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{NewRental, RentalId};
    use kernel::KernelError;

    use crate::database::postgres::fixture::{insert_movie, insert_user};
    use crate::database::postgres::{
        PostgresDatabase, PostgresMovieRepository, PostgresRentalRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_and_finish() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let user_id = insert_user(&mut con).await?;
        let movie1 = insert_movie(&mut con, false, None).await?;
        let movie2 = insert_movie(&mut con, true, None).await?;

        let rental = NewRental::new(user_id, vec![movie1, movie2]);
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let rentals = PostgresRentalRepository
            .find_by_user_id(&mut con, &user_id)
            .await?;
        assert_eq!(rentals.len(), 1);
        let created = &rentals[0];
        assert!(created.is_open());
        assert!(created.end_date().is_none());

        let detail = PostgresRentalRepository
            .find_by_id(&mut con, created.id())
            .await?
            .expect("created rental");
        let movie_ids = detail
            .movies()
            .iter()
            .map(|movie| *movie.id())
            .collect::<Vec<_>>();
        assert_eq!(movie_ids, vec![movie1, movie2]);

        PostgresRentalRepository.finish(&mut con, created.id()).await?;

        let detail = PostgresRentalRepository
            .find_by_id(&mut con, created.id())
            .await?
            .expect("finished rental");
        assert!(!detail.rental().is_open());
        assert!(detail.rental().end_date().is_some());
        assert!(detail.movies().is_empty());
        for id in [movie1, movie2] {
            let movie = PostgresMovieRepository
                .find_by_id(&mut con, &id)
                .await?
                .expect("movie");
            assert!(!movie.is_rented());
        }

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_all_and_missing() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;
        let before = PostgresRentalRepository.find_all(&mut con).await?.len();

        let user_id = insert_user(&mut con).await?;
        let movie = insert_movie(&mut con, false, None).await?;
        PostgresRentalRepository
            .create(&mut con, &NewRental::new(user_id, vec![movie]))
            .await?;

        let after = PostgresRentalRepository.find_all(&mut con).await?.len();
        assert_eq!(after, before + 1);

        let missing = PostgresRentalRepository
            .find_by_id(&mut con, &RentalId::new(-1))
            .await?;
        assert!(missing.is_none());

        Ok(())
    }
}
