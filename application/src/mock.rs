//! In-memory persistence and seeded fixtures for service tests.

use std::collections::HashSet;
use std::sync::Mutex;

use error_stack::Report;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use time::{Date, Duration, OffsetDateTime};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnMovieQuery, DependOnRentalQuery, DependOnUserQuery, MovieQuery, RentalQuery,
    UserQuery,
};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{
    AdultsOnly, BirthDate, Email, EndedAt, FirstName, LastName, Movie, MovieId, MovieName,
    NationalId, NewRental, Rental, RentalClosed, RentalDetail, RentalId, RentedAt, User, UserId,
};
use kernel::KernelError;

const FIRST_NAMES: &[&str] = &["Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe"];
const LAST_NAMES: &[&str] = &["Silva", "Souza", "Costa", "Pereira", "Almeida"];
const WORDS: &[&str] = &[
    "night", "river", "silent", "storm", "garden", "echo", "iron", "paper", "last", "summer",
];

/// Builds random but reproducible entities. Ids never repeat within one fixture.
pub struct Fixture {
    rng: StdRng,
    used_ids: HashSet<i32>,
}

impl Fixture {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            used_ids: HashSet::new(),
        }
    }

    fn next_id(&mut self) -> i32 {
        loop {
            let id = self.rng.gen_range(1..=1000);
            if self.used_ids.insert(id) {
                return id;
            }
        }
    }

    fn pick(&mut self, words: &[&str]) -> String {
        words
            .choose(&mut self.rng)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// A user born some time during the year before `year_of_birth`.
    pub fn user(&mut self, year_of_birth: i32) -> User {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let day = self.rng.gen_range(1..=365);
        let birth = Date::from_ordinal_date(year_of_birth - 1, day).unwrap();
        let national_id = format!(
            "{:03}.{:03}.{:03}-{:02}",
            self.rng.gen_range(0..1000),
            self.rng.gen_range(0..1000),
            self.rng.gen_range(0..1000),
            self.rng.gen_range(0..100)
        );
        User::new(
            UserId::new(self.next_id()),
            FirstName::new(first.clone()),
            LastName::new(last.clone()),
            Email::new(format!("{}.{}@example.com", first, last).to_lowercase()),
            BirthDate::new(birth),
            NationalId::new(national_id),
        )
    }

    pub fn adult(&mut self) -> User {
        self.user(2000)
    }

    pub fn movie(&mut self, rental_id: Option<RentalId>, adults_only: bool) -> Movie {
        let name = (0..3)
            .map(|_| self.pick(WORDS))
            .collect::<Vec<_>>()
            .join(" ");
        Movie::new(
            MovieId::new(self.next_id()),
            MovieName::new(name),
            AdultsOnly::new(adults_only),
            rental_id,
        )
    }

    pub fn any_movie(&mut self, rental_id: Option<RentalId>) -> Movie {
        let adults_only = self.rng.gen_bool(0.5);
        self.movie(rental_id, adults_only)
    }

    pub fn rental(&mut self, user_id: UserId, closed: bool) -> Rental {
        let date = OffsetDateTime::now_utc() - Duration::days(self.rng.gen_range(1..7));
        let end_date = closed.then(|| EndedAt::new(OffsetDateTime::now_utc()));
        Rental::new(
            RentalId::new(self.next_id()),
            user_id,
            RentalClosed::new(closed),
            RentedAt::new(date),
            end_date,
        )
    }
}

pub struct MockConnection;

#[async_trait::async_trait]
impl Transaction for MockConnection {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[derive(Default)]
struct MockState {
    users: Vec<User>,
    movies: Vec<Movie>,
    rentals: Vec<Rental>,
    created: Vec<NewRental>,
    finished: Vec<RentalId>,
}

/// Shared store behind every persistence trait. `broken` makes each call fail
/// with [`KernelError::Internal`].
#[derive(Default)]
pub struct MockStore {
    state: Mutex<MockState>,
    broken: bool,
}

impl MockStore {
    fn check(&self) -> error_stack::Result<(), KernelError> {
        if self.broken {
            return Err(Report::new(KernelError::Internal).attach_printable("store is down"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserQuery<MockConnection> for MockStore {
    async fn find_by_id(
        &self,
        _con: &mut MockConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }
}

#[async_trait::async_trait]
impl MovieQuery<MockConnection> for MockStore {
    async fn find_by_id(
        &self,
        _con: &mut MockConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.movies.iter().find(|movie| movie.id() == id).cloned())
    }
}

#[async_trait::async_trait]
impl RentalQuery<MockConnection> for MockStore {
    async fn find_all(
        &self,
        _con: &mut MockConnection,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        self.check()?;
        Ok(self.state.lock().unwrap().rentals.clone())
    }

    async fn find_by_id(
        &self,
        _con: &mut MockConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<RentalDetail>, KernelError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let Some(rental) = state.rentals.iter().find(|rental| rental.id() == id) else {
            return Ok(None);
        };
        let mut movies = state
            .movies
            .iter()
            .filter(|movie| movie.rental_id().as_ref() == Some(id))
            .cloned()
            .collect::<Vec<_>>();
        movies.sort_by_key(|movie| *movie.id().as_ref());
        Ok(Some(RentalDetail::new(rental.clone(), movies)))
    }

    async fn find_by_user_id(
        &self,
        _con: &mut MockConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .rentals
            .iter()
            .filter(|rental| rental.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalModifier<MockConnection> for MockStore {
    async fn create(
        &self,
        _con: &mut MockConnection,
        rental: &NewRental,
    ) -> error_stack::Result<(), KernelError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let id = RentalId::new(
            state
                .rentals
                .iter()
                .map(|rental| *rental.id().as_ref())
                .max()
                .unwrap_or(1000)
                + 1,
        );
        state.rentals.push(Rental::new(
            id,
            *rental.user_id(),
            RentalClosed::new(false),
            RentedAt::new(OffsetDateTime::now_utc()),
            None,
        ));
        let movie_ids = rental.movie_ids();
        state.movies = std::mem::take(&mut state.movies)
            .into_iter()
            .map(|movie| {
                if movie_ids.contains(movie.id()) {
                    movie.reconstruct(|m| m.rental_id = Some(id))
                } else {
                    movie
                }
            })
            .collect();
        state.created.push(rental.clone());
        Ok(())
    }

    async fn finish(
        &self,
        _con: &mut MockConnection,
        id: &RentalId,
    ) -> error_stack::Result<(), KernelError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.rentals = std::mem::take(&mut state.rentals)
            .into_iter()
            .map(|rental| {
                if rental.id() == id && rental.is_open() {
                    rental.reconstruct(|r| {
                        r.closed = RentalClosed::new(true);
                        r.end_date = Some(EndedAt::new(OffsetDateTime::now_utc()));
                    })
                } else {
                    rental
                }
            })
            .collect();
        state.movies = std::mem::take(&mut state.movies)
            .into_iter()
            .map(|movie| {
                if movie.rental_id().as_ref() == Some(id) {
                    movie.reconstruct(|m| m.rental_id = None)
                } else {
                    movie
                }
            })
            .collect();
        state.finished.push(*id);
        Ok(())
    }
}

/// Stands in for the server's handler: owns the store and wires it to every
/// `DependOn*` trait the services ask for.
#[derive(Default)]
pub struct MockModule {
    store: MockStore,
}

impl MockModule {
    pub fn new(users: Vec<User>, movies: Vec<Movie>, rentals: Vec<Rental>) -> Self {
        Self {
            store: MockStore {
                state: Mutex::new(MockState {
                    users,
                    movies,
                    rentals,
                    ..MockState::default()
                }),
                broken: false,
            },
        }
    }

    pub fn broken() -> Self {
        Self {
            store: MockStore {
                broken: true,
                ..MockStore::default()
            },
        }
    }

    pub fn created(&self) -> Vec<NewRental> {
        self.store.state.lock().unwrap().created.clone()
    }

    pub fn finished(&self) -> Vec<RentalId> {
        self.store.state.lock().unwrap().finished.clone()
    }

    pub fn rental(&self, id: &RentalId) -> Option<Rental> {
        let state = self.store.state.lock().unwrap();
        state.rentals.iter().find(|rental| rental.id() == id).cloned()
    }

    pub fn movie(&self, id: &MovieId) -> Option<Movie> {
        let state = self.store.state.lock().unwrap();
        state.movies.iter().find(|movie| movie.id() == id).cloned()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<MockConnection> for MockModule {
    async fn transact(&self) -> error_stack::Result<MockConnection, KernelError> {
        Ok(MockConnection)
    }
}

impl DependOnUserQuery<MockConnection> for MockModule {
    type UserQuery = MockStore;
    fn user_query(&self) -> &Self::UserQuery {
        &self.store
    }
}

impl DependOnMovieQuery<MockConnection> for MockModule {
    type MovieQuery = MockStore;
    fn movie_query(&self) -> &Self::MovieQuery {
        &self.store
    }
}

impl DependOnRentalQuery<MockConnection> for MockModule {
    type RentalQuery = MockStore;
    fn rental_query(&self) -> &Self::RentalQuery {
        &self.store
    }
}

impl DependOnRentalModifier<MockConnection> for MockModule {
    type RentalModifier = MockStore;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &self.store
    }
}
