/// Match coordinator actor.
///
/// Owns the single authoritative `MatchState`, applies every client request to it,
/// and fans the resulting events out to the subscribed WebSocket sessions.
/// Handlers run one at a time on the actor mailbox, so each event is applied atomically.

use actix::prelude::*;
use std::collections::HashMap;
use log::{debug, info, warn};

use crate::game::state::{Audience, Dispatch, MatchState};
use crate::game::types::ConnectionId;
use crate::server::coordinator::messages::{
    ChangeScreen, Connect, Disconnect, Join, ResetMatch, ServerEvent, SubmitMove,
};
use crate::server::ws_error::match_error_event;

pub struct MatchCoordinator {
    /// Every open connection, seated or not.
    sessions: HashMap<ConnectionId, Recipient<ServerEvent>>,
    pub(crate) state: MatchState,
}

impl MatchCoordinator {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            state: MatchState::new(),
        }
    }

    /// Broadcast an event to every open connection.
    fn broadcast(&self, event: ServerEvent) {
        for addr in self.sessions.values() {
            addr.do_send(event.clone());
        }
    }

    fn send_to(&self, id: &ConnectionId, event: ServerEvent) {
        match self.sessions.get(id) {
            Some(addr) => addr.do_send(event),
            None => debug!("[Coordinator] Dropping event for closed connection {}", id),
        }
    }

    fn deliver(&self, dispatches: Vec<Dispatch>) {
        for dispatch in dispatches {
            match dispatch.audience {
                Audience::Only(id) => self.send_to(&id, dispatch.event),
                Audience::Everyone => self.broadcast(dispatch.event),
            }
        }
    }
}

impl Actor for MatchCoordinator {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[Coordinator] Match coordinator started");
    }
}

impl Handler<Connect> for MatchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.insert(msg.id, msg.addr);
        info!("[Coordinator] Connection {} opened ({} open)", msg.id, self.sessions.len());
    }
}

impl Handler<Disconnect> for MatchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        self.sessions.remove(&msg.id);
        let was_player = self.state.players.contains_key(&msg.id);
        let dispatches = self.state.disconnect(msg.id);
        if was_player {
            info!(
                "[Coordinator] Player {} left, {} player(s) remain",
                msg.id,
                self.state.players.len()
            );
        } else {
            debug!("[Coordinator] Connection {} closed", msg.id);
        }
        self.deliver(dispatches);
    }
}

impl Handler<Join> for MatchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: Join, _ctx: &mut Self::Context) -> Self::Result {
        match self.state.join(msg.id, &msg.name) {
            Ok(dispatches) => {
                info!(
                    "[Coordinator] Player {} joined as {:?} ({} seated)",
                    msg.id,
                    self.state.seat_of(&msg.id),
                    self.state.players.len()
                );
                if !self.state.waiting_for_players {
                    info!("[Coordinator] Both seats taken, match started");
                }
                self.deliver(dispatches);
            }
            Err(err) => {
                warn!("[Coordinator] Join refused for {}: {}", msg.id, err);
                let context = msg.id.to_string();
                self.send_to(&msg.id, match_error_event(&err, Some(&context)));
            }
        }
    }
}

impl Handler<SubmitMove> for MatchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: SubmitMove, _ctx: &mut Self::Context) -> Self::Result {
        let dispatches = self.state.submit_move(msg.id, msg.mv);
        if dispatches.is_empty() {
            debug!("[Coordinator] Ignoring move from {} (not seated or waiting for players)", msg.id);
            return;
        }
        for dispatch in &dispatches {
            if let ServerEvent::RoundResult(result) = &dispatch.event {
                info!(
                    "[Coordinator] Round resolved: {} vs {} -> {:?}, score {}-{}, next round {}",
                    result.player1_move,
                    result.player2_move,
                    result.result,
                    result.scores.player1,
                    result.scores.player2,
                    result.round
                );
            }
        }
        self.deliver(dispatches);
    }
}

impl Handler<ResetMatch> for MatchCoordinator {
    type Result = ();

    fn handle(&mut self, msg: ResetMatch, _ctx: &mut Self::Context) -> Self::Result {
        info!("[Coordinator] Match reset requested by {}", msg.id);
        let dispatches = self.state.reset();
        self.deliver(dispatches);
    }
}

impl Handler<ChangeScreen> for MatchCoordinator {
    type Result = usize;

    fn handle(&mut self, _msg: ChangeScreen, _ctx: &mut Self::Context) -> Self::Result {
        self.broadcast(ServerEvent::NextScreen);
        info!("[Coordinator] Screen change sent to {} connection(s)", self.sessions.len());
        self.sessions.len()
    }
}
