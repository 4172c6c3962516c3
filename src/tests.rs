//! End-to-end flows through the coordinator actor.
//!
//! Each simulated client is a listener actor subscribed like a real session; the
//! listener forwards whatever the coordinator delivers into a channel the test reads.

use std::time::Duration;

use actix::prelude::*;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::game::state::{GameInfo, MatchState};
use crate::game::types::{Move, Outcome, Seat};
use crate::server::coordinator::messages::{
    ChangeScreen, Connect, Disconnect, Join, ResetMatch, ServerEvent, SubmitMove,
};
use crate::server::coordinator::server::MatchCoordinator;
use crate::server::coordinator::session::MatchSession;

struct Listener {
    tx: UnboundedSender<ServerEvent>,
}

impl Actor for Listener {
    type Context = Context<Self>;
}

impl Handler<ServerEvent> for Listener {
    type Result = ();

    fn handle(&mut self, msg: ServerEvent, _ctx: &mut Context<Self>) {
        let _ = self.tx.send(msg);
    }
}

#[derive(Message)]
#[rtype(result = "MatchState")]
struct Snapshot;

impl Handler<Snapshot> for MatchCoordinator {
    type Result = MessageResult<Snapshot>;

    fn handle(&mut self, _msg: Snapshot, _ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.state.clone())
    }
}

struct Client {
    id: Uuid,
    rx: UnboundedReceiver<ServerEvent>,
}

impl Client {
    async fn connect(coordinator: &Addr<MatchCoordinator>) -> Self {
        let (tx, rx) = unbounded_channel();
        let listener = Listener { tx }.start();
        let id = Uuid::new_v4();
        coordinator
            .send(Connect { id, addr: listener.recipient() })
            .await
            .expect("coordinator alive");
        Self { id, rx }
    }

    /// Everything delivered so far.
    async fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(50), self.rx.recv()).await {
            events.push(event);
        }
        events
    }
}

async fn join(coordinator: &Addr<MatchCoordinator>, client: &Client, name: &str) {
    coordinator
        .send(Join { id: client.id, name: name.to_string() })
        .await
        .expect("coordinator alive");
}

async fn play(coordinator: &Addr<MatchCoordinator>, client: &Client, mv: Move) {
    coordinator
        .send(SubmitMove { id: client.id, mv })
        .await
        .expect("coordinator alive");
}

async fn snapshot(coordinator: &Addr<MatchCoordinator>) -> MatchState {
    coordinator.send(Snapshot).await.expect("coordinator alive")
}

fn count(events: &[ServerEvent], pred: impl Fn(&ServerEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

/// Two seated players plus one connected onlooker, with all join traffic drained.
async fn seated_table() -> (Addr<MatchCoordinator>, Client, Client, Client) {
    let coordinator = MatchCoordinator::new().start();
    let mut alice = Client::connect(&coordinator).await;
    let mut bob = Client::connect(&coordinator).await;
    let mut onlooker = Client::connect(&coordinator).await;
    join(&coordinator, &alice, "Alice").await;
    join(&coordinator, &bob, "Bob").await;
    alice.drain().await;
    bob.drain().await;
    onlooker.drain().await;
    (coordinator, alice, bob, onlooker)
}

#[actix_web::test]
async fn test_join_sends_state_to_joiner_and_notice_to_all() {
    let coordinator = MatchCoordinator::new().start();
    let mut alice = Client::connect(&coordinator).await;
    let mut bob = Client::connect(&coordinator).await;

    join(&coordinator, &alice, "Alice").await;
    let alice_events = alice.drain().await;
    let bob_events = bob.drain().await;

    assert_eq!(alice_events.len(), 2);
    match &alice_events[0] {
        ServerEvent::GameState(state) => {
            assert!(state.waiting_for_players);
            assert_eq!(state.players[&alice.id].name, "Alice");
        }
        other => panic!("expected game-state first, got {:?}", other),
    }
    assert!(matches!(&alice_events[1], ServerEvent::PlayerJoined(n) if n.player_name == "Alice"));
    assert_eq!(bob_events.len(), 1);
    assert!(matches!(&bob_events[0], ServerEvent::PlayerJoined(n) if n.connection_id == alice.id));

    let state = snapshot(&coordinator).await;
    assert!(state.waiting_for_players);
    assert!(state.current_game.is_none());
}

#[actix_web::test]
async fn test_second_join_broadcasts_game_start_once() {
    let coordinator = MatchCoordinator::new().start();
    let mut alice = Client::connect(&coordinator).await;
    let mut bob = Client::connect(&coordinator).await;

    join(&coordinator, &alice, "Alice").await;
    join(&coordinator, &bob, "Bob").await;

    for events in [alice.drain().await, bob.drain().await] {
        assert_eq!(count(&events, |e| matches!(e, ServerEvent::GameStart(_))), 1);
        assert!(events.contains(&ServerEvent::GameStart(GameInfo::new())));
    }
    let state = snapshot(&coordinator).await;
    assert!(!state.waiting_for_players);
    assert_eq!(state.current_game, Some(GameInfo::new()));
}

#[actix_web::test]
async fn test_full_round_reaches_everyone() {
    let (coordinator, mut alice, mut bob, mut onlooker) = seated_table().await;

    play(&coordinator, &alice, Move::Rock).await;
    let after_first = bob.drain().await;
    assert_eq!(count(&after_first, |e| matches!(e, ServerEvent::PlayerReady(_))), 1);
    assert_eq!(count(&after_first, |e| matches!(e, ServerEvent::RoundResult(_))), 0);

    play(&coordinator, &bob, Move::Scissors).await;

    let alice_events = alice.drain().await;
    assert!(alice_events.contains(&ServerEvent::MoveReceived(Move::Rock)));
    assert!(!alice_events.contains(&ServerEvent::MoveReceived(Move::Scissors)));

    for events in [alice_events, bob.drain().await, onlooker.drain().await] {
        let result = events
            .iter()
            .find_map(|e| match e {
                ServerEvent::RoundResult(r) => Some(r.clone()),
                _ => None,
            })
            .expect("round-result broadcast");
        assert_eq!(result.result, Outcome::Player1);
        assert_eq!((result.scores.player1, result.scores.player2), (1, 0));
        assert_eq!(result.round, 2);
    }

    let state = snapshot(&coordinator).await;
    assert_eq!(state.current_game, Some(GameInfo { round: 2, player1_score: 1, player2_score: 0 }));
    assert!(state.players.values().all(|p| !p.ready && p.current_move.is_none()));
}

#[actix_web::test]
async fn test_third_joiner_gets_match_full() {
    let (coordinator, mut alice, mut bob, mut onlooker) = seated_table().await;

    join(&coordinator, &onlooker, "Carol").await;

    let events = onlooker.drain().await;
    assert_eq!(events.len(), 1);
    match &events[0] {
        ServerEvent::Error(payload) => {
            assert_eq!(payload.code, "MATCH_FULL");
            assert_eq!(payload.context.as_deref(), Some(onlooker.id.to_string().as_str()));
        }
        other => panic!("expected error, got {:?}", other),
    }
    assert!(alice.drain().await.is_empty());
    assert!(bob.drain().await.is_empty());
    assert_eq!(snapshot(&coordinator).await.players.len(), 2);
}

#[actix_web::test]
async fn test_onlooker_move_is_ignored() {
    let (coordinator, mut alice, _bob, mut onlooker) = seated_table().await;

    play(&coordinator, &onlooker, Move::Paper).await;

    assert!(onlooker.drain().await.is_empty());
    assert!(alice.drain().await.is_empty());
    assert!(snapshot(&coordinator).await.players.values().all(|p| !p.ready));
}

#[actix_web::test]
async fn test_player_disconnect_reverts_to_waiting() {
    let (coordinator, alice, mut bob, mut onlooker) = seated_table().await;

    play(&coordinator, &bob, Move::Paper).await;
    bob.drain().await;
    onlooker.drain().await;

    coordinator.send(Disconnect { id: alice.id }).await.expect("coordinator alive");

    assert_eq!(bob.drain().await, vec![ServerEvent::WaitingForPlayers]);
    assert_eq!(onlooker.drain().await, vec![ServerEvent::WaitingForPlayers]);

    let state = snapshot(&coordinator).await;
    assert!(state.waiting_for_players);
    assert!(state.current_game.is_none());
    assert!(!state.players[&bob.id].ready);
    assert_eq!(state.players[&bob.id].seat, Seat::Player2);
}

#[actix_web::test]
async fn test_onlooker_disconnect_is_silent() {
    let (coordinator, mut alice, mut bob, onlooker) = seated_table().await;

    coordinator.send(Disconnect { id: onlooker.id }).await.expect("coordinator alive");

    assert!(alice.drain().await.is_empty());
    assert!(bob.drain().await.is_empty());
    assert!(!snapshot(&coordinator).await.waiting_for_players);
}

#[actix_web::test]
async fn test_reset_twice_yields_empty_state() {
    let (coordinator, mut alice, bob, mut onlooker) = seated_table().await;
    play(&coordinator, &alice, Move::Rock).await;
    alice.drain().await;
    onlooker.drain().await;

    for _ in 0..2 {
        coordinator.send(ResetMatch { id: bob.id }).await.expect("coordinator alive");
        assert_eq!(snapshot(&coordinator).await, MatchState::default());
        assert_eq!(alice.drain().await, vec![ServerEvent::GameReset]);
        assert_eq!(onlooker.drain().await, vec![ServerEvent::GameReset]);
    }
}

#[actix_web::test]
async fn test_change_screen_reaches_all_connections() {
    let (coordinator, mut alice, mut bob, mut onlooker) = seated_table().await;

    let notified = coordinator.send(ChangeScreen).await.expect("coordinator alive");

    assert_eq!(notified, 3);
    for client in [&mut alice, &mut bob, &mut onlooker] {
        assert_eq!(client.drain().await, vec![ServerEvent::NextScreen]);
    }
    assert_eq!(snapshot(&coordinator).await.players.len(), 2);
}

#[actix_web::test]
async fn test_session_refuses_bad_frames_without_reaching_the_match() {
    let coordinator = MatchCoordinator::new().start();
    let mut watcher = Client::connect(&coordinator).await;
    let mut session = MatchSession::new(coordinator.clone());

    let refused = [
        (r#"{"event":"make-move","data":"lizard"}"#, "INVALID_MOVE"),
        ("not json", "INVALID_MESSAGE"),
        (r#"{"event":"join-game","data":7}"#, "INVALID_MESSAGE"),
    ];
    for (frame, code) in refused {
        let reply = session.receive_text(frame).expect("error frame");
        match serde_json::from_str::<ServerEvent>(&reply).expect("error frame decodes") {
            ServerEvent::Error(payload) => {
                assert_eq!(payload.code, code, "frame {:?}", frame);
                assert_eq!(payload.context, Some(session.id.to_string()));
            }
            other => panic!("expected error frame for {:?}, got {:?}", frame, other),
        }
    }

    assert!(watcher.drain().await.is_empty());
    assert_eq!(snapshot(&coordinator).await, MatchState::default());

    assert!(session.receive_text(r#"{"event":"join-game","data":"Alice"}"#).is_none());
    let state = snapshot(&coordinator).await;
    assert_eq!(state.players[&session.id].name, "Alice");
}
