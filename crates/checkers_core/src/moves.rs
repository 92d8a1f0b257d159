use std::fmt;

use crate::Position;

/// One hop of a capture chain: `from` and `to` are two squares apart on a diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    pub from: Position,
    pub to: Position,
}

impl Jump {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// The square whose piece this jump captures.
    pub fn captured(&self) -> Position {
        self.from.midpoint(self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// Single diagonal step onto an adjacent empty square.
    Step { from: Position, to: Position },
    /// A complete capture chain made by one piece. Never empty.
    Capture { jumps: Vec<Jump> },
}

impl Move {
    pub fn step(from: Position, to: Position) -> Self {
        Move::Step { from, to }
    }

    pub fn capture(jumps: Vec<Jump>) -> Self {
        debug_assert!(!jumps.is_empty(), "capture chain without jumps");
        Move::Capture { jumps }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }

    pub fn origin(&self) -> Position {
        match self {
            Move::Step { from, .. } => *from,
            Move::Capture { jumps } => jumps[0].from,
        }
    }

    /// Final landing square of the moving piece.
    pub fn destination(&self) -> Position {
        match self {
            Move::Step { to, .. } => *to,
            Move::Capture { jumps } => jumps[jumps.len() - 1].to,
        }
    }

    pub fn jumps(&self) -> &[Jump] {
        match self {
            Move::Step { .. } => &[],
            Move::Capture { jumps } => jumps,
        }
    }

    /// Squares emptied by this move's captures, in chain order.
    pub fn captured_squares(&self) -> impl Iterator<Item = Position> + '_ {
        self.jumps().iter().map(Jump::captured)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Step { from, to } => write!(f, "{}-{}", from, to),
            Move::Capture { jumps } => {
                write!(f, "{}", jumps[0].from)?;
                for jump in jumps {
                    write!(f, "x{}", jump.to)?;
                }
                Ok(())
            }
        }
    }
}
