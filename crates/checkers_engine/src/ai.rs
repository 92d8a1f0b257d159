use checkers_core::{Board, Move};
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::evaluation::Evaluator;
use crate::mcts::{MctsConfig, MctsSearch};
use crate::search::AlphaBetaSearch;

/// Anything that can pick a move for the side to move.
///
/// `None` means the player has no legal move and so has lost. Players may keep
/// state between calls (a random source, for instance), hence `&mut self`.
pub trait Player: Send {
    fn name(&self) -> &str;
    fn best_move(&mut self, board: &Board) -> Option<Move>;
}

pub struct AlphaBetaPlayer<E> {
    name: String,
    search: AlphaBetaSearch<E>,
}

impl<E: Evaluator> AlphaBetaPlayer<E> {
    pub fn new(depth: u8, evaluator: E) -> Self {
        let search = AlphaBetaSearch::new(depth, evaluator);
        Self {
            name: format!("alpha-beta(depth {})", search.depth()),
            search,
        }
    }

    pub fn search(&self) -> &AlphaBetaSearch<E> {
        &self.search
    }
}

impl<E: Evaluator> Player for AlphaBetaPlayer<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.search.best_move(board)
    }
}

pub struct MctsPlayer {
    name: String,
    search: MctsSearch,
    rng: StdRng,
}

impl MctsPlayer {
    pub fn new(config: MctsConfig, seed: u64) -> Self {
        Self {
            name: format!("mcts({} simulations)", config.simulations),
            search: MctsSearch::new(config),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for MctsPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn best_move(&mut self, board: &Board) -> Option<Move> {
        self.search.best_move(board, &mut self.rng)
    }
}

/// Plays a uniformly random legal move. Useful as a baseline opponent.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn best_move(&mut self, board: &Board) -> Option<Move> {
        let mv = board.legal_moves().choose(&mut self.rng).cloned();
        trace!("random player picked {:?}", mv.as_ref().map(Move::to_string));
        mv
    }
}
