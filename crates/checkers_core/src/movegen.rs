//! Legal move generation.
//!
//! Captures are mandatory: when the side to move has any capture, only
//! captures are legal. Each capture chain is followed until the jumping piece
//! has no further jump, and every branch of the chain search works on its own
//! copy of the board.

use crate::{Board, Jump, Move, Piece, Position};

/// All legal moves for the side to move. Empty when that side has lost.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let captures = generate_captures(board);
    if !captures.is_empty() {
        return captures;
    }
    generate_steps(board)
}

/// Every complete capture chain available to the side to move.
pub fn generate_captures(board: &Board) -> Vec<Move> {
    let mut captures = Vec::new();
    let mut chain = Vec::new();
    for (pos, piece) in board.pieces() {
        if piece.color == board.current_turn() {
            collect_chains(board, pos, piece, &mut chain, &mut captures);
            debug_assert!(chain.is_empty());
        }
    }
    captures
}

fn generate_steps(board: &Board) -> Vec<Move> {
    let mut steps = Vec::new();
    for (from, piece) in board.pieces() {
        if piece.color != board.current_turn() {
            continue;
        }
        for &direction in piece.directions() {
            if let Some(to) = from.offset(direction, 1) {
                if board.get_piece(to).is_none() {
                    steps.push(Move::step(from, to));
                }
            }
        }
    }
    steps
}

/// Single jumps available to `piece` standing on `from`.
fn jumps_from(board: &Board, from: Position, piece: Piece) -> impl Iterator<Item = Jump> + '_ {
    piece.directions().iter().filter_map(move |&direction| {
        let over = from.offset(direction, 1)?;
        let to = from.offset(direction, 2)?;
        let victim = board.get_piece(over)?;
        (victim.color != piece.color && board.get_piece(to).is_none()).then(|| Jump::new(from, to))
    })
}

// Depth-first search over jump sequences. `board` already reflects the jumps in
// `chain`; the piece keeps its original rank for the whole chain.
fn collect_chains(board: &Board, from: Position, piece: Piece, chain: &mut Vec<Jump>, out: &mut Vec<Move>) {
    let mut extended = false;
    for jump in jumps_from(board, from, piece) {
        extended = true;
        let mut branch = *board;
        branch.jump(jump);
        chain.push(jump);
        collect_chains(&branch, jump.to, piece, chain, out);
        chain.pop();
    }
    if !extended && !chain.is_empty() {
        out.push(Move::capture(chain.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use std::collections::HashSet;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    fn board_with(turn: Color, pieces: &[((u8, u8), Piece)]) -> Board {
        pieces
            .iter()
            .fold(Board::empty(turn), |board, &((row, col), piece)| board.with_piece(pos(row, col), piece))
    }

    #[test]
    fn test_initial_position_has_seven_steps() {
        let moves = generate_legal_moves(&Board::new());
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|mv| !mv.is_capture()));
        assert!(generate_captures(&Board::new()).is_empty());

        let targets: HashSet<Position> = moves.iter().map(Move::destination).collect();
        let expected: HashSet<Position> = [pos(4, 1), pos(4, 3), pos(4, 5), pos(4, 7)].into_iter().collect();
        assert_eq!(targets, expected);
    }

    #[test]
    fn test_black_reply_also_has_seven_steps() {
        let board = Board::new().apply(&Move::step(pos(5, 0), pos(4, 1)));
        let moves = generate_legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|mv| mv.origin().row == 2));
    }

    #[test]
    fn test_capture_is_mandatory() {
        // White man on (5,2) can capture (4,3); the man on (5,6) could step freely
        let board = board_with(
            Color::White,
            &[
                ((5, 2), Piece::WHITE_MAN),
                ((5, 6), Piece::WHITE_MAN),
                ((4, 3), Piece::BLACK_MAN),
            ],
        );
        let moves = generate_legal_moves(&board);
        assert_eq!(
            moves,
            vec![Move::capture(vec![Jump::new(pos(5, 2), pos(3, 4))])]
        );
    }

    #[test]
    fn test_men_do_not_capture_backwards() {
        let board = board_with(Color::White, &[((3, 2), Piece::WHITE_MAN), ((4, 3), Piece::BLACK_MAN)]);
        assert!(generate_captures(&board).is_empty());

        let crowned = board_with(Color::White, &[((3, 2), Piece::WHITE_KING), ((4, 3), Piece::BLACK_MAN)]);
        assert_eq!(
            generate_captures(&crowned),
            vec![Move::capture(vec![Jump::new(pos(3, 2), pos(5, 4))])]
        );
    }

    #[test]
    fn test_cannot_jump_own_piece_or_onto_occupied_square() {
        let board = board_with(
            Color::White,
            &[
                ((5, 2), Piece::WHITE_MAN),
                ((4, 1), Piece::WHITE_MAN),
                ((4, 3), Piece::BLACK_MAN),
                ((3, 4), Piece::BLACK_MAN),
            ],
        );
        assert!(generate_captures(&board).is_empty());
    }

    #[test]
    fn test_chain_continues_until_no_jump_remains() {
        let board = board_with(
            Color::White,
            &[
                ((7, 0), Piece::WHITE_MAN),
                ((6, 1), Piece::BLACK_MAN),
                ((4, 3), Piece::BLACK_MAN),
                ((2, 3), Piece::BLACK_MAN),
            ],
        );
        let moves = generate_legal_moves(&board);
        let expected = vec![Move::capture(vec![
            Jump::new(pos(7, 0), pos(5, 2)),
            Jump::new(pos(5, 2), pos(3, 4)),
            Jump::new(pos(3, 4), pos(1, 2)),
        ])];
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_branching_chains_are_emitted_separately() {
        // after (5,2)x(3,4) the man may go left over (2,3) or right over (2,5)
        let board = board_with(
            Color::White,
            &[
                ((5, 2), Piece::WHITE_MAN),
                ((4, 3), Piece::BLACK_MAN),
                ((2, 3), Piece::BLACK_MAN),
                ((2, 5), Piece::BLACK_MAN),
            ],
        );
        let moves: HashSet<Move> = generate_legal_moves(&board).into_iter().collect();
        let expected: HashSet<Move> = [
            Move::capture(vec![Jump::new(pos(5, 2), pos(3, 4)), Jump::new(pos(3, 4), pos(1, 2))]),
            Move::capture(vec![Jump::new(pos(5, 2), pos(3, 4)), Jump::new(pos(3, 4), pos(1, 6))]),
        ]
        .into_iter()
        .collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_man_reaching_back_rank_mid_chain_stops() {
        // from (0,3) a king could continue over (1,4), a man may not
        let board = board_with(
            Color::White,
            &[
                ((2, 1), Piece::WHITE_MAN),
                ((1, 2), Piece::BLACK_MAN),
                ((1, 4), Piece::BLACK_MAN),
            ],
        );
        let moves = generate_legal_moves(&board);
        let expected = Move::capture(vec![Jump::new(pos(2, 1), pos(0, 3))]);
        assert_eq!(moves, vec![expected.clone()]);

        let next = board.apply(&expected);
        assert_eq!(next.get_piece(pos(0, 3)), Some(Piece::WHITE_KING));
        assert_eq!(next.get_piece(pos(1, 4)), Some(Piece::BLACK_MAN));
    }

    #[test]
    fn test_king_surrounded_by_four_men_jumps_each_once() {
        let board = board_with(
            Color::White,
            &[
                ((4, 3), Piece::WHITE_KING),
                ((3, 2), Piece::BLACK_MAN),
                ((3, 4), Piece::BLACK_MAN),
                ((5, 2), Piece::BLACK_MAN),
                ((5, 4), Piece::BLACK_MAN),
            ],
        );
        let moves = generate_legal_moves(&board);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.jumps().len() == 1));
    }

    #[test]
    fn test_king_loop_never_captures_a_square_twice() {
        let board = board_with(
            Color::White,
            &[
                ((4, 3), Piece::WHITE_KING),
                ((3, 2), Piece::BLACK_MAN),
                ((3, 4), Piece::BLACK_MAN),
                ((5, 2), Piece::BLACK_MAN),
                ((5, 4), Piece::BLACK_MAN),
                ((3, 6), Piece::BLACK_MAN),
                ((5, 6), Piece::BLACK_MAN),
                ((1, 2), Piece::BLACK_MAN),
                ((1, 4), Piece::BLACK_MAN),
            ],
        );
        let moves = generate_legal_moves(&board);
        assert!(moves.iter().any(|mv| mv.jumps().len() > 1));
        for mv in &moves {
            let captured: Vec<Position> = mv.captured_squares().collect();
            let unique: HashSet<Position> = captured.iter().copied().collect();
            assert_eq!(captured.len(), unique.len(), "{} captures a square twice", mv);
        }
    }
}
