//! Main entry point for the backend server.
//!
//! Initializes the actor system, starts the match coordinator, and launches the HTTP server
//! with the real-time WebSocket endpoint and the screen-change trigger.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::coordinator::server::MatchCoordinator;

pub mod config;
mod server;
mod game;
#[cfg(test)]
mod tests;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bind = config::server::BindConfig::from_env();

    // Start the MatchCoordinator actor (owns the single match state).
    let coordinator = MatchCoordinator::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(coordinator));

    info!("[Http] Listening on http://{}:{}", bind.host, bind.port);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((bind.host.as_str(), bind.port))?
    .run()
    .await
}
