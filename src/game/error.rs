use thiserror::Error;

/// Reasons a client request is refused by the match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Unknown move '{0}', expected rock, paper or scissors")]
    InvalidMove(String),
    #[error("The match already has two players")]
    MatchFull,
    #[error("This connection has already joined the match")]
    AlreadyJoined,
}

impl MatchError {
    /// Stable code sent to clients alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidMove(_) => "INVALID_MOVE",
            MatchError::MatchFull => "MATCH_FULL",
            MatchError::AlreadyJoined => "ALREADY_JOINED",
        }
    }
}
