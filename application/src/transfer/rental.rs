use kernel::prelude::entity::{DestructRental, DestructRentalDetail, Rental, RentalDetail};
use time::OffsetDateTime;

use crate::transfer::MovieDto;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub id: i32,
    pub user_id: i32,
    pub closed: bool,
    pub date: OffsetDateTime,
    pub end_date: Option<OffsetDateTime>,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            user_id,
            closed,
            date,
            end_date,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            closed: closed.into(),
            date: date.into(),
            end_date: end_date.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDetailDto {
    pub rental: RentalDto,
    pub movies: Vec<MovieDto>,
}

impl From<RentalDetail> for RentalDetailDto {
    fn from(value: RentalDetail) -> Self {
        let DestructRentalDetail { rental, movies } = value.into_destruct();
        Self {
            rental: RentalDto::from(rental),
            movies: movies.into_iter().map(MovieDto::from).collect(),
        }
    }
}

pub struct GetRentalDto {
    pub id: i32,
}

pub struct CreateRentalDto {
    pub user_id: i32,
    pub movie_ids: Vec<i32>,
}

pub struct FinishRentalDto {
    pub id: i32,
}
