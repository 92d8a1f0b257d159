use thiserror::Error;

use crate::Move;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckersError {
    #[error("square ({row}, {col}) is off the board")]
    OffBoard { row: u8, col: u8 },

    #[error("square ({row}, {col}) is a light square and can never hold a piece")]
    LightSquare { row: u8, col: u8 },

    #[error("move {0} is not legal in this position")]
    IllegalMove(Move),

    #[error("invalid board diagram: {0}")]
    Parse(String),
}
