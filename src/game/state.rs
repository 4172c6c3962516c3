//! Authoritative match state and its transitions.
//!
//! Every transition mutates the state in place and returns the list of events
//! to deliver, tagged with their audience. Delivery itself belongs to the
//! coordinator actor, which keeps this module free of any transport concern.

use std::collections::HashMap;
use serde::{Serialize, Deserialize};

use crate::config::game::{MAX_PLAYERS, MAX_NAME_LEN, DEFAULT_NAME_PREFIX, DEFAULT_NAME_SUFFIX_LEN};
use crate::game::error::MatchError;
use crate::game::rules::determine_winner;
use crate::game::types::{ConnectionId, Move, Outcome, Seat};
use crate::server::coordinator::messages::{ServerEvent, PlayerNotice, RoundResult, Scores};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: ConnectionId,
    pub name: String,
    #[serde(rename = "move")]
    pub current_move: Option<Move>,
    pub ready: bool,
    pub seat: Seat,
}

impl Player {
    pub fn new(id: ConnectionId, name: String, seat: Seat) -> Self {
        Self {
            id,
            name,
            current_move: None,
            ready: false,
            seat,
        }
    }

    fn clear_move(&mut self) {
        self.current_move = None;
        self.ready = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub round: u32,
    pub player1_score: u32,
    pub player2_score: u32,
}

impl GameInfo {
    pub fn new() -> Self {
        Self {
            round: 1,
            player1_score: 0,
            player2_score: 0,
        }
    }
}

/// Who receives an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Only(ConnectionId),
    Everyone,
}

/// One event addressed to its audience.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub audience: Audience,
    pub event: ServerEvent,
}

impl Dispatch {
    pub fn only(id: ConnectionId, event: ServerEvent) -> Self {
        Self { audience: Audience::Only(id), event }
    }

    pub fn everyone(event: ServerEvent) -> Self {
        Self { audience: Audience::Everyone, event }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub players: HashMap<ConnectionId, Player>,
    pub current_game: Option<GameInfo>,
    pub waiting_for_players: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            players: HashMap::new(),
            current_game: None,
            waiting_for_players: true,
        }
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a new player. The second arrival starts the match.
    pub fn join(&mut self, id: ConnectionId, raw_name: &str) -> Result<Vec<Dispatch>, MatchError> {
        if self.players.contains_key(&id) {
            return Err(MatchError::AlreadyJoined);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(MatchError::MatchFull);
        }
        let seat = self.free_seat().ok_or(MatchError::MatchFull)?;
        let name = normalize_name(id, raw_name);
        self.players.insert(id, Player::new(id, name.clone(), seat));

        let mut out = vec![
            Dispatch::only(id, ServerEvent::GameState(self.clone())),
            Dispatch::everyone(ServerEvent::PlayerJoined(PlayerNotice {
                connection_id: id,
                player_name: name,
            })),
        ];

        if self.players.len() == MAX_PLAYERS {
            let game = GameInfo::new();
            self.waiting_for_players = false;
            self.current_game = Some(game);
            out.push(Dispatch::everyone(ServerEvent::GameStart(game)));
        }
        Ok(out)
    }

    /// Record a move. Moves from spectators or while waiting are dropped.
    pub fn submit_move(&mut self, id: ConnectionId, mv: Move) -> Vec<Dispatch> {
        if self.waiting_for_players {
            return Vec::new();
        }
        let Some(player) = self.players.get_mut(&id) else {
            return Vec::new();
        };
        player.current_move = Some(mv);
        player.ready = true;
        let notice = PlayerNotice {
            connection_id: id,
            player_name: player.name.clone(),
        };

        let mut out = vec![
            Dispatch::only(id, ServerEvent::MoveReceived(mv)),
            Dispatch::everyone(ServerEvent::PlayerReady(notice)),
        ];
        if let Some(result) = self.resolve_round() {
            out.push(Dispatch::everyone(ServerEvent::RoundResult(result)));
        }
        out
    }

    /// Clear everything back to the empty initial state.
    pub fn reset(&mut self) -> Vec<Dispatch> {
        *self = MatchState::default();
        vec![Dispatch::everyone(ServerEvent::GameReset)]
    }

    /// Drop a connection's player entry, reverting to waiting when the table breaks up.
    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<Dispatch> {
        if self.players.remove(&id).is_none() {
            return Vec::new();
        }
        debug_assert!(self.players.len() < MAX_PLAYERS);
        self.waiting_for_players = true;
        self.current_game = None;
        // The survivor's pending move must not carry into the next pairing.
        for player in self.players.values_mut() {
            player.clear_move();
        }
        vec![Dispatch::everyone(ServerEvent::WaitingForPlayers)]
    }

    pub fn seat_of(&self, id: &ConnectionId) -> Option<Seat> {
        self.players.get(id).map(|p| p.seat)
    }

    fn player_in(&self, seat: Seat) -> Option<&Player> {
        self.players.values().find(|p| p.seat == seat)
    }

    fn free_seat(&self) -> Option<Seat> {
        Seat::ALL.into_iter().find(|seat| self.player_in(*seat).is_none())
    }

    fn resolve_round(&mut self) -> Option<RoundResult> {
        if self.players.len() != MAX_PLAYERS || !self.players.values().all(|p| p.ready) {
            return None;
        }
        let player1_move = self.player_in(Seat::Player1)?.current_move?;
        let player2_move = self.player_in(Seat::Player2)?.current_move?;
        let game = self.current_game.as_mut()?;

        let result = determine_winner(player1_move, player2_move);
        match result {
            Outcome::Player1 => game.player1_score += 1,
            Outcome::Player2 => game.player2_score += 1,
            Outcome::Tie => {}
        }
        game.round += 1;

        let round_result = RoundResult {
            player1_move,
            player2_move,
            result,
            scores: Scores {
                player1: game.player1_score,
                player2: game.player2_score,
            },
            round: game.round,
        };
        for player in self.players.values_mut() {
            player.clear_move();
        }
        Some(round_result)
    }
}

fn normalize_name(id: ConnectionId, raw: &str) -> String {
    let name: String = raw.trim().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        let suffix: String = id.simple().to_string().chars().take(DEFAULT_NAME_SUFFIX_LEN).collect();
        format!("{}{}", DEFAULT_NAME_PREFIX, suffix)
    } else {
        name
    }
}
