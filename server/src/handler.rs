use driver::database::{
    PostgresConnection, PostgresDatabase, PostgresMovieRepository, PostgresRentalRepository,
    PostgresUserRepository,
};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery};
use kernel::interface::update::DependOnRentalModifier;
use kernel::KernelError;
use std::sync::Arc;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init().await?)))
    }

    pub fn handler(&self) -> &Handler {
        &self.0
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
}

impl Handler {
    pub async fn init() -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self { pgpool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<PostgresConnection> for Handler {
    async fn transact(&self) -> error_stack::Result<PostgresConnection, KernelError> {
        self.pgpool().transact().await
    }
}

impl DependOnUserQuery<PostgresConnection> for Handler {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnMovieQuery<PostgresConnection> for Handler {
    type MovieQuery = PostgresMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &PostgresMovieRepository
    }
}

impl DependOnRentalQuery<PostgresConnection> for Handler {
    type RentalQuery = PostgresRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &PostgresRentalRepository
    }
}

impl DependOnRentalModifier<PostgresConnection> for Handler {
    type RentalModifier = PostgresRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &PostgresRentalRepository
    }
}
