use std::ops::Add;

use checkers_core::Board;
use log::info;
use rayon::prelude::*;

use crate::ai::Player;
use crate::game::{play_game, GameResult};
use crate::EngineError;

/// Tally of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesSummary {
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
}

impl SeriesSummary {
    pub fn games(&self) -> usize {
        self.white_wins + self.black_wins + self.draws
    }
}

impl From<GameResult> for SeriesSummary {
    fn from(result: GameResult) -> Self {
        let mut summary = Self::default();
        match result {
            GameResult::WhiteWins => summary.white_wins = 1,
            GameResult::BlackWins => summary.black_wins = 1,
            GameResult::Draw => summary.draws = 1,
        }
        summary
    }
}

impl Add for SeriesSummary {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            white_wins: self.white_wins + other.white_wins,
            black_wins: self.black_wins + other.black_wins,
            draws: self.draws + other.draws,
        }
    }
}

/// Plays `games` independent games from the initial position on the rayon
/// pool and tallies the results.
///
/// Each game builds fresh players from the factories, which receive the game
/// index so seeded players can vary from game to game. The first error aborts
/// the series.
pub fn play_series<W, B>(
    games: usize,
    make_white: W,
    make_black: B,
    max_ply: u32,
) -> Result<SeriesSummary, EngineError>
where
    W: Fn(usize) -> Box<dyn Player> + Sync,
    B: Fn(usize) -> Box<dyn Player> + Sync,
{
    let summary = (0..games)
        .into_par_iter()
        .map(|game| -> Result<SeriesSummary, EngineError> {
            let mut white = make_white(game);
            let mut black = make_black(game);
            let record = play_game(white.as_mut(), black.as_mut(), Board::new(), max_ply)?;
            Ok(SeriesSummary::from(record.result))
        })
        .try_reduce(SeriesSummary::default, |a, b| Ok(a + b))?;

    info!(
        "series of {} games: white {} / black {} / draws {}",
        games, summary.white_wins, summary.black_wins, summary.draws
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomPlayer;

    #[test]
    fn test_summary_addition() {
        let total = SeriesSummary::from(GameResult::WhiteWins)
            + SeriesSummary::from(GameResult::Draw)
            + SeriesSummary::from(GameResult::WhiteWins);
        assert_eq!(
            total,
            SeriesSummary {
                white_wins: 2,
                black_wins: 0,
                draws: 1
            }
        );
        assert_eq!(total.games(), 3);
    }

    #[test]
    fn test_series_counts_every_game() {
        let summary = play_series(
            12,
            |game| Box::new(RandomPlayer::new(game as u64)),
            |game| Box::new(RandomPlayer::new(1000 + game as u64)),
            60,
        )
        .unwrap();
        assert_eq!(summary.games(), 12);
    }

    #[test]
    fn test_empty_series() {
        let summary = play_series(0, |_| Box::new(RandomPlayer::new(0)), |_| Box::new(RandomPlayer::new(0)), 10).unwrap();
        assert_eq!(summary, SeriesSummary::default());
    }
}
