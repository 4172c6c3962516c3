//! HTTP and WebSocket routing configuration.
//!
//! Defines the real-time match endpoint and the screen-change trigger.

use actix_web::web;
use crate::config::server::{WS_PATH, CHANGE_SCREEN_PATH};
use crate::server::coordinator::session::ws_match;
use crate::server::handlers::change_screen;

/// Configure the application's HTTP/WebSocket routes.
///
/// The WebSocket route spawns one session actor per connection; the HTTP route
/// relays to the coordinator actor.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(WS_PATH)
            .route(web::get().to(ws_match))
    )
    .service(
        web::resource(CHANGE_SCREEN_PATH)
            .route(web::post().to(change_screen))
    );
}
