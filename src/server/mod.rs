// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and plain HTTP handlers
//! - Match coordination (the match coordinator actor and per-connection sessions)
//! - Error frame helpers

pub mod state;
pub mod router;
pub mod handlers;
pub mod coordinator;
pub mod ws_error;
