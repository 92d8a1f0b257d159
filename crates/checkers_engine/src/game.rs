use std::fmt;

use checkers_core::{Board, Color, Move};
use log::{debug, info, warn};

use crate::ai::Player;
use crate::EngineError;

/// Games still running after this many plies are drawn.
pub const MAX_GAME_PLY: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    fn loss_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "white wins"),
            GameResult::BlackWins => write!(f, "black wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub result: GameResult,
    pub moves: Vec<Move>,
    pub final_board: Board,
}

/// Plays one game from `start` until a side has no move or the board reaches
/// `max_ply`.
///
/// Every move goes through [`Board::make_move`]; a player suggesting an illegal
/// move aborts the game with an error.
pub fn play_game<'a>(
    white: &'a mut dyn Player,
    black: &'a mut dyn Player,
    start: Board,
    max_ply: u32,
) -> Result<GameRecord, EngineError> {
    let mut board = start;
    let mut moves = Vec::new();

    let result = loop {
        if board.ply() >= max_ply {
            break GameResult::Draw;
        }

        let side = board.current_turn();
        let player = match side {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };

        let Some(mv) = player.best_move(&board) else {
            break GameResult::loss_for(side);
        };
        debug!("ply {}: {} ({}) plays {}", board.ply(), player.name(), side, mv);

        if let Err(err) = board.make_move(&mv) {
            warn!("{} played an illegal move: {}", player.name(), err);
            return Err(err.into());
        }
        moves.push(mv);
    };

    info!(
        "{} vs {}: {} after {} plies",
        white.name(),
        black.name(),
        result,
        board.ply()
    );
    Ok(GameRecord {
        result,
        moves,
        final_board: board,
    })
}
