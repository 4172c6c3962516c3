/// WebSocket session handler for the match.
///
/// One actor per connection. It gets a fresh connection id, subscribes to the
/// coordinator's broadcasts, turns client frames into coordinator messages and
/// serializes coordinator events back to the client. Frames that do not decode,
/// and moves outside rock/paper/scissors, are answered with an error frame and
/// never reach the coordinator.
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::server::{CLIENT_TIMEOUT_SECS, HEARTBEAT_INTERVAL_SECS};
use crate::game::types::{ConnectionId, Move};
use crate::server::coordinator::messages::{
    ClientEvent, Connect, Disconnect, Join, ResetMatch, ServerEvent, SubmitMove,
};
use crate::server::coordinator::server::MatchCoordinator;
use crate::server::ws_error::{ws_error_message, FrameError};

/// A decoded and validated client request.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Join(String),
    Move(Move),
    Reset,
}

/// Decode one text frame into a command, validating the move value.
pub fn decode_client_frame(text: &str) -> Result<SessionCommand, FrameError> {
    let command = match serde_json::from_str::<ClientEvent>(text)? {
        ClientEvent::JoinGame(name) => SessionCommand::Join(name),
        ClientEvent::MakeMove(raw) => SessionCommand::Move(raw.parse()?),
        ClientEvent::ResetGame => SessionCommand::Reset,
    };
    Ok(command)
}

/// True once the client has been silent longer than the timeout.
pub fn is_stale(last_heartbeat: Instant, now: Instant) -> bool {
    now.saturating_duration_since(last_heartbeat) > Duration::from_secs(CLIENT_TIMEOUT_SECS)
}

/// Represents one client's WebSocket connection to the match.
pub struct MatchSession {
    pub id: ConnectionId,
    pub coordinator: Addr<MatchCoordinator>,
    last_heartbeat: Instant,
}

impl MatchSession {
    pub fn new(coordinator: Addr<MatchCoordinator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinator,
            last_heartbeat: Instant::now(),
        }
    }

    /// Ping the client periodically and drop it once it stops answering.
    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS), |act, ctx| {
            if is_stale(act.last_heartbeat, Instant::now()) {
                warn!("[Session] Heartbeat timed out for {}, dropping connection", act.id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    /// Apply one text frame. Returns the error frame to send back when the frame is refused.
    pub(crate) fn receive_text(&mut self, text: &str) -> Option<String> {
        self.last_heartbeat = Instant::now();
        match decode_client_frame(text) {
            Ok(command) => {
                debug!("[Session] {} -> {:?}", self.id, command);
                self.dispatch(command);
                None
            }
            Err(err) => {
                warn!("[Session] Rejected frame from {}: {}", self.id, err);
                let context = self.id.to_string();
                Some(ws_error_message(err.code(), &err.to_string(), Some(&context)))
            }
        }
    }

    fn dispatch(&self, command: SessionCommand) {
        let id = self.id;
        match command {
            SessionCommand::Join(name) => self.coordinator.do_send(Join { id, name }),
            SessionCommand::Move(mv) => self.coordinator.do_send(SubmitMove { id, mv }),
            SessionCommand::Reset => self.coordinator.do_send(ResetMatch { id }),
        }
    }
}

impl Actor for MatchSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Subscribes the connection to broadcasts.
    fn started(&mut self, ctx: &mut Self::Context) {
        info!("[Session] Connection {} opened", self.id);
        self.coordinator.do_send(Connect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
        self.start_heartbeat(ctx);
    }

    /// Called when the session stops. Drives the coordinator's disconnect handling.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[Session] Connection {} closed", self.id);
        self.coordinator.do_send(Disconnect { id: self.id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for MatchSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                if let Some(error_frame) = self.receive_text(&text) {
                    ctx.text(error_frame);
                }
            }
            Ok(ws::Message::Ping(msg)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[Session] Protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerEvent> for MatchSession {
    type Result = ();

    /// Handles events sent from the coordinator to this connection.
    fn handle(&mut self, msg: ServerEvent, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                warn!("[Session] Failed to serialize ServerEvent for {}: {}", self.id, e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for the match.
///
/// The connection is anonymous until it sends `join-game`; until then it only
/// receives broadcasts.
pub async fn ws_match(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(MatchSession::new(data.coordinator.clone()), &req, stream)
}
