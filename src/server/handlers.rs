//! Plain HTTP handlers that talk to the coordinator.

use actix_web::{error, web, Error, HttpResponse};
use log::info;
use serde::Serialize;

use crate::server::coordinator::messages::ChangeScreen;
use crate::server::state::AppState;

#[derive(Serialize)]
struct ChangeScreenResponse {
    message: &'static str,
    notified: usize,
}

/// Ask every connected client to move to the next screen.
pub async fn change_screen(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let notified = data
        .coordinator
        .send(ChangeScreen)
        .await
        .map_err(error::ErrorInternalServerError)?;
    info!("[Http] Screen change relayed to {} connection(s)", notified);
    Ok(HttpResponse::Ok().json(ChangeScreenResponse {
        message: "Screen change broadcast",
        notified,
    }))
}
