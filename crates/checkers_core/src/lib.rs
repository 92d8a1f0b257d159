// Core checkers rules: board, moves and legal move generation
pub mod board;
pub mod error;
pub mod piece;
pub mod position;
pub mod moves;
pub mod movegen;

// Re-export main types for convenience
pub use board::Board;
pub use error::CheckersError;
pub use piece::{Piece, Color, PieceType};
pub use position::Position;
pub use moves::{Jump, Move};
pub use movegen::{generate_captures, generate_legal_moves};
