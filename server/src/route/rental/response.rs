use crate::controller::Exhaust;
use application::transfer::{MovieDto, RentalDetailDto, RentalDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: i32,
    user_id: i32,
    closed: bool,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    end_date: Option<OffsetDateTime>,
}

impl From<RentalDto> for RentalResponse {
    fn from(
        RentalDto {
            id,
            user_id,
            closed,
            date,
            end_date,
        }: RentalDto,
    ) -> Self {
        Self {
            id,
            user_id,
            closed,
            date,
            end_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: i32,
    name: String,
    adults_only: bool,
    rental_id: Option<i32>,
}

impl From<MovieDto> for MovieResponse {
    fn from(
        MovieDto {
            id,
            name,
            adults_only,
            rental_id,
        }: MovieDto,
    ) -> Self {
        Self {
            id,
            name,
            adults_only,
            rental_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentalDetailResponse {
    #[serde(flatten)]
    rental: RentalResponse,
    movies: Vec<MovieResponse>,
}

impl IntoResponse for RentalDetailResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = axum::Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(RentalResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

impl Exhaust<RentalDetailDto> for Presenter {
    type To = RentalDetailResponse;
    fn emit(&self, RentalDetailDto { rental, movies }: RentalDetailDto) -> Self::To {
        RentalDetailResponse {
            rental: RentalResponse::from(rental),
            movies: movies.into_iter().map(MovieResponse::from).collect(),
        }
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::OK
    }
}

pub struct CreatedPresenter;

impl Exhaust<()> for CreatedPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::CREATED
    }
}
