// Move selection and game running for checkers
pub mod error;
pub mod evaluation;
pub mod search;
pub mod mcts;
pub mod ai;
pub mod game;
pub mod series;

// Re-export main types for convenience
pub use error::EngineError;
pub use evaluation::{Evaluator, MaterialEvaluator, NeuralNetEvaluator};
pub use search::{AlphaBetaSearch, MIN_DEPTH};
pub use mcts::{MctsConfig, MctsSearch, DEFAULT_SIMULATIONS};
pub use ai::{AlphaBetaPlayer, MctsPlayer, Player, RandomPlayer};
pub use game::{play_game, GameRecord, GameResult, MAX_GAME_PLY};
pub use series::{play_series, SeriesSummary};
