// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the match coordinator actor.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::server::coordinator::server::MatchCoordinator;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the match coordinator actor (owns the match state).
    pub coordinator: Addr<MatchCoordinator>,
}

impl AppState {
    /// Create a new AppState with the given coordinator address.
    pub fn new(coordinator: Addr<MatchCoordinator>) -> Self {
        AppState { coordinator }
    }
}
