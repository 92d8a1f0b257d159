// Depth-limited alpha-beta minimax over checkers positions
use checkers_core::{Board, Color, Move};
use log::{debug, trace, warn};

use crate::evaluation::Evaluator;

// Always search at least this deep
pub const MIN_DEPTH: u8 = 1;

// Root search window; evaluators and terminal scores live in [-1, 1]
const ALPHA_INIT: f64 = -1.0;
const BETA_INIT: f64 = 1.0;

/// Fixed-depth alpha-beta search scoring leaves with an injected [`Evaluator`].
///
/// Scores are always from White's point of view: White maximises, Black
/// minimises. The search is deterministic and keeps no state between calls,
/// so one instance can serve many threads at once.
#[derive(Debug, Clone)]
pub struct AlphaBetaSearch<E> {
    depth: u8,
    evaluator: E,
}

impl<E: Evaluator> AlphaBetaSearch<E> {
    pub fn new(depth: u8, evaluator: E) -> Self {
        if depth < MIN_DEPTH {
            warn!("search depth {} raised to {}", depth, MIN_DEPTH);
        }
        Self {
            depth: depth.max(MIN_DEPTH),
            evaluator,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Best move for the side to move, or `None` when it has no legal move.
    ///
    /// A forced move is returned straight away. Otherwise every root move is
    /// scored separately so the move itself is never lost to a cutoff; ties go
    /// to the move generated first.
    pub fn best_move(&self, board: &Board) -> Option<Move> {
        let mut moves = board.legal_moves();
        if moves.len() <= 1 {
            return moves.pop();
        }

        let maximizing = board.current_turn() == Color::White;
        let mut best: Option<(Move, f64)> = None;

        for mv in moves {
            let score = self.alpha_beta(&board.apply(&mv), self.depth - 1, ALPHA_INIT, BETA_INIT);
            trace!("{} scores {:.4}", mv, score);

            let improves = match &best {
                None => true,
                Some((_, best_score)) if maximizing => score > *best_score,
                Some((_, best_score)) => score < *best_score,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = &best {
            debug!(
                "alpha-beta depth {} picked {} for {} at ply {} (score {:.4})",
                self.depth,
                mv,
                board.current_turn(),
                board.ply(),
                score
            );
        }
        best.map(|(mv, _)| mv)
    }

    /// Minimax value of `board` searched `depth` plies deep within `[alpha, beta]`.
    ///
    /// Values inside the window are exact; a value at or beyond a bound only
    /// proves the true score lies on that side of it.
    pub fn alpha_beta(&self, board: &Board, depth: u8, mut alpha: f64, mut beta: f64) -> f64 {
        if depth == 0 {
            return self.evaluator.evaluate(board);
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            // side to move has lost
            return board.current_turn().loss_score();
        }

        match board.current_turn() {
            Color::White => {
                let mut best = f64::NEG_INFINITY;
                for mv in &moves {
                    best = best.max(self.alpha_beta(&board.apply(mv), depth - 1, alpha, beta));
                    if best >= beta {
                        break;
                    }
                    alpha = alpha.max(best);
                }
                best
            }
            Color::Black => {
                let mut best = f64::INFINITY;
                for mv in &moves {
                    best = best.min(self.alpha_beta(&board.apply(mv), depth - 1, alpha, beta));
                    if best <= alpha {
                        break;
                    }
                    beta = beta.min(best);
                }
                best
            }
        }
    }
}
