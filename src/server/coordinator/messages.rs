use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::state::{GameInfo, MatchState};
use crate::game::types::{ConnectionId, Move, Outcome};

// Client -> server frames
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinGame(String),
    /// Kept as raw text so unknown moves can be reported precisely.
    MakeMove(String),
    ResetGame,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNotice {
    pub connection_id: ConnectionId,
    pub player_name: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub player1_move: Move,
    pub player2_move: Move,
    pub result: Outcome,
    pub scores: Scores,
    pub round: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub context: Option<String>,
}

// Server -> client frames
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    GameState(MatchState),
    PlayerJoined(PlayerNotice),
    GameStart(GameInfo),
    MoveReceived(Move),
    PlayerReady(PlayerNotice),
    RoundResult(RoundResult),
    GameReset,
    WaitingForPlayers,
    NextScreen,
    Error(ErrorPayload),
}

impl ServerEvent {
    pub fn error(code: &str, message: &str, context: Option<&str>) -> Self {
        Self::Error(ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            context: context.map(str::to_string),
        })
    }
}

/// Message: a WebSocket connection subscribes to broadcasts.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: ConnectionId,
    pub addr: Recipient<ServerEvent>,
}

/// Message: a WebSocket connection went away.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: ConnectionId,
}

/// Message: a connection asks to be seated.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Join {
    pub id: ConnectionId,
    pub name: String,
}

/// Message: a seated player submits a move.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubmitMove {
    pub id: ConnectionId,
    pub mv: Move,
}

/// Message: any connection requests a full reset.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ResetMatch {
    pub id: ConnectionId,
}

/// Message: broadcast a screen change; returns how many connections were notified.
#[derive(Message)]
#[rtype(result = "usize")]
pub struct ChangeScreen;
