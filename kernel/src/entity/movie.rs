mod adults_only;
mod id;
mod name;

pub use self::{adults_only::*, id::*, name::*};
use crate::entity::RentalId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Movie {
    id: MovieId,
    name: MovieName,
    adults_only: AdultsOnly,
    rental_id: Option<RentalId>,
}

impl Movie {
    pub fn new(
        id: MovieId,
        name: MovieName,
        adults_only: AdultsOnly,
        rental_id: Option<RentalId>,
    ) -> Self {
        Self {
            id,
            name,
            adults_only,
            rental_id,
        }
    }

    pub fn is_rented(&self) -> bool {
        self.rental_id.is_some()
    }

    pub fn is_adults_only(&self) -> bool {
        *self.adults_only.as_ref()
    }
}
