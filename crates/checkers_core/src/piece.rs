use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction a man of this color advances in. White starts on rows 5-7.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row on which a man of this color is crowned.
    pub fn crown_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Game outcome, from White's perspective, when this side has no move left.
    pub fn loss_score(self) -> f64 {
        match self {
            Color::White => -1.0,
            Color::Black => 1.0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

const ALL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const WHITE_MAN_DIRECTIONS: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const BLACK_MAN_DIRECTIONS: [(i8, i8); 2] = [(1, -1), (1, 1)];

impl Piece {
    pub const WHITE_MAN: Piece = Piece::new(PieceType::Man, Color::White);
    pub const BLACK_MAN: Piece = Piece::new(PieceType::Man, Color::Black);
    pub const WHITE_KING: Piece = Piece::new(PieceType::King, Color::White);
    pub const BLACK_KING: Piece = Piece::new(PieceType::King, Color::Black);

    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    pub fn is_king(self) -> bool {
        self.piece_type == PieceType::King
    }

    /// Diagonal directions this piece may step and jump in.
    pub fn directions(self) -> &'static [(i8, i8)] {
        match (self.piece_type, self.color) {
            (PieceType::King, _) => &ALL_DIRECTIONS,
            (PieceType::Man, Color::White) => &WHITE_MAN_DIRECTIONS,
            (PieceType::Man, Color::Black) => &BLACK_MAN_DIRECTIONS,
        }
    }

    pub fn crowned(self) -> Piece {
        Piece::new(PieceType::King, self.color)
    }

    /// Diagram symbol: `w`/`b` for men, `W`/`B` for kings.
    pub fn symbol(self) -> char {
        match (self.piece_type, self.color) {
            (PieceType::Man, Color::White) => 'w',
            (PieceType::Man, Color::Black) => 'b',
            (PieceType::King, Color::White) => 'W',
            (PieceType::King, Color::Black) => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        match symbol {
            'w' => Some(Piece::WHITE_MAN),
            'b' => Some(Piece::BLACK_MAN),
            'W' => Some(Piece::WHITE_KING),
            'B' => Some(Piece::BLACK_KING),
            _ => None,
        }
    }
}
