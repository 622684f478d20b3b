use std::collections::HashSet;

use crate::controller::{Intake, TryIntake};
use crate::error::InvalidRequest;
use application::transfer::{CreateRentalDto, FinishRentalDto, GetRentalDto};
use serde::Deserialize;

pub const RENTAL_MOVIES_MIN: usize = 1;
pub const RENTAL_MOVIES_MAX: usize = 4;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    user_id: i32,
    movies_id: Vec<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishRequest {
    rental_id: i32,
}

#[derive(Debug)]
pub struct GetRequest {
    id: i32,
}

impl GetRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateRentalDto;
    type Error = InvalidRequest;
    fn emit(
        &self,
        CreateRequest { user_id, movies_id }: CreateRequest,
    ) -> Result<Self::To, Self::Error> {
        if user_id <= 0 {
            return Err(InvalidRequest::new("userId must be positive"));
        }
        if !(RENTAL_MOVIES_MIN..=RENTAL_MOVIES_MAX).contains(&movies_id.len()) {
            return Err(InvalidRequest::new(format!(
                "moviesId must hold between {} and {} movies",
                RENTAL_MOVIES_MIN, RENTAL_MOVIES_MAX
            )));
        }
        if movies_id.iter().any(|id| *id <= 0) {
            return Err(InvalidRequest::new("moviesId must be positive"));
        }
        let mut seen = HashSet::with_capacity(movies_id.len());
        if !movies_id.iter().all(|id| seen.insert(*id)) {
            return Err(InvalidRequest::new("moviesId must not repeat"));
        }
        Ok(CreateRentalDto {
            user_id,
            movie_ids: movies_id,
        })
    }
}

impl Intake<FinishRequest> for Transformer {
    type To = FinishRentalDto;
    fn emit(&self, FinishRequest { rental_id }: FinishRequest) -> Self::To {
        FinishRentalDto { id: rental_id }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetRentalDto;
    fn emit(&self, GetRequest { id }: GetRequest) -> Self::To {
        GetRentalDto { id }
    }
}
