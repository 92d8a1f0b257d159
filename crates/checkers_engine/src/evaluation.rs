use checkers_core::{Board, Color, PieceType, Position};
use rand::Rng;

use crate::EngineError;

/// Scores a position from White's point of view: positive favours White,
/// conventionally within [-1, 1], where -1 and +1 are a lost and a won game.
///
/// Searches only ever call `evaluate`; how an evaluator was built or trained
/// is none of their business. Any `Fn(&Board) -> f64` closure qualifies.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&Board) -> f64 + Send + Sync,
{
    fn evaluate(&self, board: &Board) -> f64 {
        self(board)
    }
}

// Material values used by the static evaluator
const MAN_VALUE: f64 = 1.0;
const KING_VALUE: f64 = 3.0;
// Twelve kings, the most material one side can have
const MATERIAL_SCALE: f64 = 36.0;

/// Counts material: men are worth 1, kings 3, normalised into [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        let score: f64 = board
            .pieces()
            .map(|(_, piece)| {
                let value = match piece.piece_type {
                    PieceType::Man => MAN_VALUE,
                    PieceType::King => KING_VALUE,
                };
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum();
        score / MATERIAL_SCALE
    }
}

/// One input per dark square.
pub const INPUT_NODES: usize = 32;

const INITIAL_WEIGHT_RANGE: f64 = 0.2;

/// Fully connected layer with a tanh activation. Row 0 of `weights` holds the
/// bias, row `j + 1` the weights leaving input `j`.
#[derive(Debug, Clone, PartialEq)]
struct Layer {
    weights: Vec<Vec<f64>>,
}

impl Layer {
    fn random<R: Rng + ?Sized>(inputs: usize, outputs: usize, rng: &mut R) -> Self {
        let weights = (0..=inputs)
            .map(|_| {
                (0..outputs)
                    .map(|_| rng.gen_range(-INITIAL_WEIGHT_RANGE..INITIAL_WEIGHT_RANGE))
                    .collect()
            })
            .collect();
        Self { weights }
    }

    fn checked(
        layer: &'static str,
        weights: Vec<Vec<f64>>,
        inputs: usize,
        outputs: usize,
    ) -> Result<Self, EngineError> {
        let shape_error = |rows: usize, cols: usize| EngineError::WeightShape {
            layer,
            rows,
            cols,
            expected_rows: inputs + 1,
            expected_cols: outputs,
        };
        if outputs == 0 || weights.len() != inputs + 1 {
            let cols = weights.first().map_or(0, Vec::len);
            return Err(shape_error(weights.len(), cols));
        }
        if let Some(row) = weights.iter().find(|row| row.len() != outputs) {
            return Err(shape_error(weights.len(), row.len()));
        }
        Ok(Self { weights })
    }

    fn outputs(&self) -> usize {
        self.weights[0].len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        (0..self.outputs())
            .map(|i| {
                let sum: f64 = input
                    .iter()
                    .zip(&self.weights[1..])
                    .map(|(x, row)| x * row[i])
                    .sum();
                (self.weights[0][i] + sum).tanh()
            })
            .collect()
    }
}

/// Feed-forward network evaluator: 32 square inputs, two tanh hidden layers
/// and a single tanh output, so scores always fall within (-1, 1).
///
/// Kings are fed to the network as `±king_value`, men as `±1`.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetEvaluator {
    king_value: f64,
    hidden1: Layer,
    hidden2: Layer,
    output: Layer,
}

impl NeuralNetEvaluator {
    /// Untrained network with small random weights and a king value in [2, 3).
    pub fn random<R: Rng + ?Sized>(hidden1: usize, hidden2: usize, rng: &mut R) -> Self {
        Self {
            king_value: rng.gen_range(2.0..3.0),
            hidden1: Layer::random(INPUT_NODES, hidden1, rng),
            hidden2: Layer::random(hidden1, hidden2, rng),
            output: Layer::random(hidden2, 1, rng),
        }
    }

    /// Network from explicit weights. Each matrix has one bias row followed by
    /// one row per input; `hidden2_to_output` has the bias first.
    pub fn from_weights(
        king_value: f64,
        input_to_hidden1: Vec<Vec<f64>>,
        hidden1_to_hidden2: Vec<Vec<f64>>,
        hidden2_to_output: Vec<f64>,
    ) -> Result<Self, EngineError> {
        let hidden1_nodes = input_to_hidden1.first().map_or(0, Vec::len);
        let hidden2_nodes = hidden1_to_hidden2.first().map_or(0, Vec::len);
        let output_rows = hidden2_to_output.into_iter().map(|w| vec![w]).collect();

        Ok(Self {
            king_value,
            hidden1: Layer::checked("input-to-hidden1", input_to_hidden1, INPUT_NODES, hidden1_nodes)?,
            hidden2: Layer::checked("hidden1-to-hidden2", hidden1_to_hidden2, hidden1_nodes, hidden2_nodes)?,
            output: Layer::checked("hidden2-to-output", output_rows, hidden2_nodes, 1)?,
        })
    }

    pub fn king_value(&self) -> f64 {
        self.king_value
    }

    fn encode(&self, board: &Board) -> Vec<f64> {
        Position::all()
            .map(|pos| match board.get_piece(pos) {
                None => 0.0,
                Some(piece) => {
                    let value = match piece.piece_type {
                        PieceType::Man => 1.0,
                        PieceType::King => self.king_value,
                    };
                    match piece.color {
                        Color::White => value,
                        Color::Black => -value,
                    }
                }
            })
            .collect()
    }
}

impl Evaluator for NeuralNetEvaluator {
    fn evaluate(&self, board: &Board) -> f64 {
        let input = self.encode(board);
        let hidden1 = self.hidden1.forward(&input);
        let hidden2 = self.hidden2.forward(&hidden1);
        self.output.forward(&hidden2)[0]
    }
}
