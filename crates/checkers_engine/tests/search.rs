//! Searches checked against a plain minimax over positions from seeded random games.

use checkers_core::{Board, Color, Move};
use checkers_engine::{
    play_game, AlphaBetaSearch, Evaluator, GameResult, MaterialEvaluator, MctsConfig, MctsPlayer,
    MctsSearch, NeuralNetEvaluator, RandomPlayer,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Positions sampled every few plies from seeded random games.
fn sample_positions(games: u64, every: u32) -> Vec<Board> {
    let mut positions = Vec::new();
    for seed in 0..games {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        while board.ply() < 120 {
            if board.ply() % every == 0 {
                positions.push(board);
            }
            let moves = board.legal_moves();
            match moves.choose(&mut rng) {
                Some(mv) => board = board.apply(mv),
                None => {
                    positions.push(board);
                    break;
                }
            }
        }
    }
    positions
}

fn minimax(board: &Board, depth: u8, evaluator: &dyn Evaluator) -> f64 {
    if depth == 0 {
        return evaluator.evaluate(board);
    }
    let moves = board.legal_moves();
    if moves.is_empty() {
        return match board.current_turn() {
            Color::White => -1.0,
            Color::Black => 1.0,
        };
    }
    let scores = moves
        .iter()
        .map(|mv| minimax(&board.apply(mv), depth - 1, evaluator));
    match board.current_turn() {
        Color::White => scores.fold(f64::NEG_INFINITY, f64::max),
        Color::Black => scores.fold(f64::INFINITY, f64::min),
    }
}

/// First move reaching the minimax value, the way the search breaks ties.
fn reference_best_move(board: &Board, depth: u8, evaluator: &dyn Evaluator) -> Option<Move> {
    let moves = board.legal_moves();
    if moves.len() <= 1 {
        return moves.into_iter().next();
    }
    let maximizing = board.current_turn() == Color::White;
    let mut best: Option<(Move, f64)> = None;
    for mv in moves {
        let score = minimax(&board.apply(&mv), depth - 1, evaluator);
        let better = match &best {
            None => true,
            Some((_, b)) => (maximizing && score > *b) || (!maximizing && score < *b),
        };
        if better {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

fn check_against_minimax<E: Evaluator>(evaluator: E) {
    let search = AlphaBetaSearch::new(3, evaluator);
    for board in sample_positions(6, 8) {
        for depth in 1..=3 {
            let pruned = search.alpha_beta(&board, depth, -1.0, 1.0);
            let plain = minimax(&board, depth, search.evaluator());
            assert_eq!(pruned, plain, "depth {} disagrees on\n{}", depth, board);
        }
        assert_eq!(
            search.best_move(&board),
            reference_best_move(&board, 3, search.evaluator()),
            "best move disagrees on\n{}",
            board
        );
    }
}

#[test]
fn test_alpha_beta_matches_minimax_with_material() {
    check_against_minimax(MaterialEvaluator);
}

#[test]
fn test_alpha_beta_matches_minimax_with_network() {
    let net = NeuralNetEvaluator::random(16, 8, &mut StdRng::seed_from_u64(2024));
    check_against_minimax(net);
}

#[test]
fn test_searches_return_none_without_moves() {
    let lost: Board = "
        to move: white, ply: 30
        - . - . - . - .
        . - . - . - . -
        - b - . - . - .
        . - . - . - . -
        - . - . - . - .
        . - . - . - . -
        - . - . - . - .
        . - . - . - . -
    "
    .parse()
    .unwrap();
    assert!(lost.is_terminal());
    assert_eq!(AlphaBetaSearch::new(4, MaterialEvaluator).best_move(&lost), None);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(MctsSearch::new(MctsConfig::default()).best_move(&lost, &mut rng), None);
}

#[test]
fn test_games_between_engines_finish_within_the_cap() {
    let mut white = MctsPlayer::new(
        MctsConfig {
            simulations: 40,
            ..MctsConfig::default()
        },
        7,
    );
    let mut black = RandomPlayer::new(7);
    let record = play_game(&mut white, &mut black, Board::new(), 80).unwrap();

    assert!(record.final_board.ply() <= 80);
    assert_eq!(record.moves.len() as u32, record.final_board.ply());
    match record.result {
        GameResult::Draw => assert_eq!(record.final_board.ply(), 80),
        GameResult::WhiteWins => assert!(record.final_board.is_terminal()),
        GameResult::BlackWins => assert!(record.final_board.is_terminal()),
    }

    // replaying the record through the checked path reaches the same board
    let mut replay = Board::new();
    for mv in &record.moves {
        replay.make_move(mv).unwrap();
    }
    assert_eq!(replay, record.final_board);
}
