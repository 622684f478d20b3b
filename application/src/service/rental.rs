use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery, MovieQuery, RentalQuery,
    UserQuery,
};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{MovieId, NewRental, RentalId, UserId};
use kernel::{KernelError, Resource};

use crate::transfer::{
    CreateRentalDto, FinishRentalDto, GetRentalDto, RentalDetailDto, RentalDto,
};

#[async_trait::async_trait]
pub trait GetRentalService<Connection: Transaction>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalQuery<Connection>
{
    async fn get_rentals(&self) -> error_stack::Result<Vec<RentalDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let rentals = self.rental_query().find_all(&mut connection).await?;
        tracing::debug!("Found {} rentals", rentals.len());

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    async fn get_rental(
        &self,
        dto: GetRentalDto,
    ) -> error_stack::Result<RentalDetailDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let rental = self
            .rental_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound(Resource::Rental))
                    .attach_printable(format!("rental id: {}", dto.id))
            })?;

        Ok(RentalDetailDto::from(rental))
    }
}

impl<Connection: Transaction, T> GetRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnRentalQuery<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateRentalService<Connection: Transaction>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnUserQuery<Connection>
    + DependOnMovieQuery<Connection>
    + DependOnRentalQuery<Connection>
    + DependOnRentalModifier<Connection>
{
    /// Rules are checked in a fixed order and the first violation wins:
    /// user, open rental, movie existence, movie availability, age.
    async fn create_rental(&self, dto: CreateRentalDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        tracing::debug!(
            "Creating rental for user {} with movies {:?}",
            dto.user_id,
            dto.movie_ids
        );

        let user_id = UserId::new(dto.user_id);
        let user = self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound(Resource::User))
                    .attach_printable(format!("user id: {}", dto.user_id))
            })?;

        let rentals = self
            .rental_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;
        if let Some(open) = rentals.iter().find(|rental| rental.is_open()) {
            tracing::warn!("User {} still has rental {:?} open", dto.user_id, open.id());
            return Err(Report::new(KernelError::PendentRental)
                .attach_printable(format!("open rental id: {}", open.id().as_ref())));
        }

        let movie_ids = dto
            .movie_ids
            .into_iter()
            .map(MovieId::new)
            .collect::<Vec<MovieId>>();
        let mut movies = Vec::with_capacity(movie_ids.len());
        for id in &movie_ids {
            let movie = self
                .movie_query()
                .find_by_id(&mut connection, id)
                .await?
                .ok_or_else(|| {
                    Report::new(KernelError::NotFound(Resource::Movie))
                        .attach_printable(format!("movie id: {}", id.as_ref()))
                })?;
            movies.push(movie);
        }

        if let Some(rented) = movies.iter().find(|movie| movie.is_rented()) {
            tracing::warn!("Movie {:?} is already rented", rented.id());
            return Err(Report::new(KernelError::MovieInRental)
                .attach_printable(format!("movie id: {}", rented.id().as_ref())));
        }

        let today = OffsetDateTime::now_utc().date();
        if !user.is_adult_at(today) {
            if let Some(restricted) = movies.iter().find(|movie| movie.is_adults_only()) {
                tracing::warn!(
                    "User {} is too young for movie {:?}",
                    dto.user_id,
                    restricted.id()
                );
                return Err(Report::new(KernelError::InsufficientAge)
                    .attach_printable(format!("movie id: {}", restricted.id().as_ref())));
            }
        }

        let rental = NewRental::new(user_id, movie_ids);
        self.rental_modifier()
            .create(&mut connection, &rental)
            .await?;
        connection.commit().await?;

        tracing::info!("Created rental for user {}", dto.user_id);
        Ok(())
    }
}

impl<Connection: Transaction, T> CreateRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnUserQuery<Connection>
        + DependOnMovieQuery<Connection>
        + DependOnRentalQuery<Connection>
        + DependOnRentalModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait FinishRentalService<Connection: Transaction>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnRentalQuery<Connection>
    + DependOnRentalModifier<Connection>
{
    async fn finish_rental(&self, dto: FinishRentalDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = RentalId::new(dto.id);
        let detail = self
            .rental_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound(Resource::Rental))
                    .attach_printable(format!("rental id: {}", dto.id))
            })?;

        if !detail.rental().is_open() {
            tracing::debug!("Rental {} is already closed", dto.id);
        }

        self.rental_modifier().finish(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(
            "Finished rental {} releasing {} movies",
            dto.id,
            detail.movies().len()
        );
        Ok(())
    }
}

impl<Connection: Transaction, T> FinishRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnRentalQuery<Connection>
        + DependOnRentalModifier<Connection>
{
}
