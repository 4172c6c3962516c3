use crate::game::types::{Move, Outcome};

/// The single move that `mv` defeats.
pub fn beats(mv: Move) -> Move {
    match mv {
        Move::Rock => Move::Scissors,
        Move::Paper => Move::Rock,
        Move::Scissors => Move::Paper,
    }
}

/// Decide a round from the player1 seat's move and the player2 seat's move.
pub fn determine_winner(player1_move: Move, player2_move: Move) -> Outcome {
    if player1_move == player2_move {
        Outcome::Tie
    } else if beats(player1_move) == player2_move {
        Outcome::Player1
    } else {
        Outcome::Player2
    }
}
