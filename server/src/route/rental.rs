mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rental::request::{CreateRequest, FinishRequest, GetRequest, Transformer};
use crate::route::rental::response::{CreatedPresenter, Presenter};
use application::service::{CreateRentalService, FinishRentalService, GetRentalService};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| module.handler().get_rentals())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateRequest>| async move {
                    let transformed = match Controller::new(Transformer, CreatedPresenter)
                        .try_intake(req)
                    {
                        Ok(transformed) => transformed,
                        Err(rejected) => return Err(ErrorStatus::from(rejected)),
                    };
                    transformed
                        .handle(|dto| module.handler().create_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/finish",
            post(
                |State(module): State<AppModule>, Json(req): Json<FinishRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| module.handler().finish_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i32>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| module.handler().get_rental(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
