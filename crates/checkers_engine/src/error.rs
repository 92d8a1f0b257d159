use checkers_core::CheckersError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rules(#[from] CheckersError),

    #[error("{layer} weights have shape {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    WeightShape {
        layer: &'static str,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
}
