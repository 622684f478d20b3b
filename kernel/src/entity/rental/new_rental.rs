use destructure::Destructure;
use vodca::References;

use crate::entity::{MovieId, UserId};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewRental {
    user_id: UserId,
    movie_ids: Vec<MovieId>,
}

impl NewRental {
    pub fn new(user_id: UserId, movie_ids: Vec<MovieId>) -> Self {
        Self { user_id, movie_ids }
    }
}
