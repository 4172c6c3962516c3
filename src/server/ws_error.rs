/// Centralized helpers for WebSocket error responses.
///
/// Use these helpers to ensure all error frames are consistent, explicit, and include a code and context.
use thiserror::Error;

use crate::game::error::MatchError;
use crate::server::coordinator::messages::ServerEvent;

/// Code sent when a frame is not a known client event.
pub const INVALID_MESSAGE: &str = "INVALID_MESSAGE";

/// Why an incoming frame could not be turned into a command.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Invalid client message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Rejected(#[from] MatchError),
}

impl FrameError {
    pub fn code(&self) -> &'static str {
        match self {
            FrameError::Malformed(_) => INVALID_MESSAGE,
            FrameError::Rejected(err) => err.code(),
        }
    }
}

/// Builds the error event for a refused request.
///
/// # Arguments
/// - `err`: The domain error.
/// - `context`: Optional context (e.g. the connection id).
pub fn match_error_event(err: &MatchError, context: Option<&str>) -> ServerEvent {
    ServerEvent::error(err.code(), &err.to_string(), context)
}

/// Formats a WebSocket error frame as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_MOVE").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. the connection id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    serde_json::to_string(&ServerEvent::error(code, message, context))
        .unwrap_or_else(|_| format!(r#"{{"event":"error","data":{{"code":"{}","message":"","context":null}}}}"#, code))
}
