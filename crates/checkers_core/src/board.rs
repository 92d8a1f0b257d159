use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::position::SQUARE_COUNT;
use crate::{generate_legal_moves, CheckersError, Color, Jump, Move, Piece, PieceType, Position};

/// A checkers position: the 32 dark squares, the side to move and the ply count.
///
/// `Board` is a small `Copy` value. Search code branches by copying it, so no
/// two lines of play ever share mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
    current_turn: Color,
    ply: u32,
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        board.setup_initial_position();
        board
    }

    /// A board with no pieces, used to build arbitrary positions.
    pub fn empty(current_turn: Color) -> Self {
        Self {
            squares: [None; SQUARE_COUNT],
            current_turn,
            ply: 0,
        }
    }

    pub fn setup_initial_position(&mut self) {
        for pos in Position::all() {
            self.squares[pos.index()] = match pos.row {
                0..=2 => Some(Piece::BLACK_MAN),
                5..=7 => Some(Piece::WHITE_MAN),
                _ => None,
            };
        }
        self.current_turn = Color::White;
        self.ply = 0;
    }

    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.index()]
    }

    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.index()] = piece;
    }

    /// Builder-style `set_piece`, handy for setting up test positions.
    pub fn with_piece(mut self, pos: Position, piece: Piece) -> Self {
        self.set_piece(pos, Some(piece));
        self
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn set_current_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Occupied squares in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get_piece(pos).map(|piece| (pos, piece)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.color == color).count()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        generate_legal_moves(self)
    }

    /// True when the side to move has no legal move, i.e. has lost.
    pub fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Returns the position after `mv`.
    ///
    /// `mv` must have been produced by the move generator for this exact board.
    /// Debug builds check the structural preconditions and panic on misuse;
    /// use [`Board::make_move`] for moves from untrusted sources.
    pub fn apply(&self, mv: &Move) -> Board {
        #[cfg(debug_assertions)]
        self.assert_consistent(mv);

        let mut next = *self;
        match mv {
            Move::Step { from, to } => {
                let piece = next.squares[from.index()].take();
                next.squares[to.index()] = piece;
            }
            Move::Capture { jumps } => {
                for &jump in jumps {
                    next.jump(jump);
                }
            }
        }

        // Promotion is decided once, on the final landing square only
        let landing = mv.destination();
        if let Some(piece) = next.get_piece(landing) {
            if piece.piece_type == PieceType::Man
                && piece.color == self.current_turn
                && landing.row == self.current_turn.crown_row()
            {
                next.set_piece(landing, Some(piece.crowned()));
            }
        }

        next.current_turn = self.current_turn.opposite();
        next.ply += 1;
        next
    }

    /// Checked version of [`Board::apply`] that updates the board in place.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), CheckersError> {
        if !self.legal_moves().contains(mv) {
            debug!("rejected move {} for {} at ply {}", mv, self.current_turn, self.ply);
            return Err(CheckersError::IllegalMove(mv.clone()));
        }
        *self = self.apply(mv);
        Ok(())
    }

    /// Physically performs one jump: clears the captured square and moves the piece.
    /// Side to move and ply are left alone, so chain discovery can reuse it.
    pub(crate) fn jump(&mut self, jump: Jump) {
        let piece = self.squares[jump.from.index()].take();
        self.squares[jump.captured().index()] = None;
        self.squares[jump.to.index()] = piece;
    }

    #[cfg(debug_assertions)]
    fn assert_consistent(&self, mv: &Move) {
        let mover = self.get_piece(mv.origin());
        assert!(
            matches!(mover, Some(piece) if piece.color == self.current_turn),
            "move {} does not start on a piece of the side to move",
            mv
        );
        match mv {
            Move::Step { from, to } => {
                assert_eq!(from.diagonal_distance(*to), Some(1), "step {} is not a diagonal neighbour", mv);
                assert!(self.get_piece(*to).is_none(), "step {} lands on an occupied square", mv);
            }
            Move::Capture { jumps } => {
                assert!(!jumps.is_empty(), "capture without jumps");
                let mut scratch = *self;
                let mut at = jumps[0].from;
                for &jump in jumps {
                    assert_eq!(jump.from, at, "capture {} is not a connected chain", mv);
                    assert_eq!(jump.from.diagonal_distance(jump.to), Some(2), "jump in {} is not two squares", mv);
                    assert!(scratch.get_piece(jump.to).is_none(), "capture {} lands on an occupied square", mv);
                    assert!(
                        matches!(scratch.get_piece(jump.captured()), Some(p) if p.color != self.current_turn),
                        "capture {} jumps over a square without an opposing piece",
                        mv
                    );
                    scratch.jump(jump);
                    at = jump.to;
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "to move: {}, ply: {}", self.current_turn, self.ply)?;
        for row in 0..8u8 {
            let cells: Vec<String> = (0..8u8)
                .map(|col| match Position::new(row, col) {
                    Ok(pos) => self.get_piece(pos).map_or('.', Piece::symbol).to_string(),
                    Err(_) => "-".to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = CheckersError;

    /// Parses the diagram written by `Display`. The header line is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty(Color::White);
        let mut row = 0u8;

        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(header) = line.strip_prefix("to move:") {
                parse_header(header, &mut board)?;
                continue;
            }
            if row > 7 {
                return Err(CheckersError::Parse("more than 8 rows".to_string()));
            }

            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != 8 {
                return Err(CheckersError::Parse(format!(
                    "row {} has {} cells, expected 8",
                    row,
                    cells.len()
                )));
            }

            for (col, &cell) in (0u8..).zip(cells.iter()) {
                let is_dark = (row + col) % 2 == 1;
                match (cell, is_dark) {
                    ('-', false) | ('.', true) => {}
                    ('-', true) => {
                        return Err(CheckersError::Parse(format!(
                            "'-' marks dark square ({}, {})",
                            row, col
                        )))
                    }
                    (symbol, false) => {
                        return Err(CheckersError::Parse(format!(
                            "'{}' placed on light square ({}, {})",
                            symbol, row, col
                        )))
                    }
                    (symbol, true) => {
                        let piece = Piece::from_symbol(symbol).ok_or_else(|| {
                            CheckersError::Parse(format!("unknown symbol '{}' at ({}, {})", symbol, row, col))
                        })?;
                        board.set_piece(Position::new(row, col)?, Some(piece));
                    }
                }
            }
            row += 1;
        }

        if row != 8 {
            return Err(CheckersError::Parse(format!("expected 8 rows, found {}", row)));
        }
        Ok(board)
    }
}

// "white, ply: 12"
fn parse_header(header: &str, board: &mut Board) -> Result<(), CheckersError> {
    let mut parts = header.split(',').map(str::trim);

    board.current_turn = match parts.next() {
        Some("white") => Color::White,
        Some("black") => Color::Black,
        other => {
            return Err(CheckersError::Parse(format!(
                "unknown side to move {:?}",
                other.unwrap_or_default()
            )))
        }
    };

    if let Some(ply) = parts.next() {
        let ply = ply
            .strip_prefix("ply:")
            .map(str::trim)
            .ok_or_else(|| CheckersError::Parse(format!("expected 'ply: N', got {:?}", ply)))?;
        board.ply = ply
            .parse()
            .map_err(|_| CheckersError::Parse(format!("invalid ply count {:?}", ply)))?;
    }
    Ok(())
}
