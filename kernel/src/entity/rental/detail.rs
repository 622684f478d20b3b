use destructure::Destructure;
use vodca::References;

use crate::entity::{Movie, Rental};

/// A rental together with the movies currently pointing at it.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct RentalDetail {
    rental: Rental,
    movies: Vec<Movie>,
}

impl RentalDetail {
    pub fn new(rental: Rental, movies: Vec<Movie>) -> Self {
        Self { rental, movies }
    }
}
