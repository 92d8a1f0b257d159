use anyhow::{bail, Result};
use checkers_core::Board;
use checkers_engine::{
    play_game, play_series, AlphaBetaPlayer, MaterialEvaluator, MctsConfig, MctsPlayer,
    NeuralNetEvaluator, Player, RandomPlayer, DEFAULT_SIMULATIONS, MAX_GAME_PLY,
};
use clap::{Parser, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Hidden layer sizes of the untrained network evaluator
const HIDDEN1_NODES: usize = 40;
const HIDDEN2_NODES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    AlphaBeta,
    Mcts,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EvaluatorKind {
    Material,
    Neural,
}

/// Pit checkers engines against each other
#[derive(Debug, Parser)]
#[command(name = "checkers-engine", version)]
struct Args {
    /// Player for White
    #[arg(long, value_enum, default_value = "alpha-beta")]
    white: PlayerKind,

    /// Player for Black
    #[arg(long, value_enum, default_value = "mcts")]
    black: PlayerKind,

    /// Alpha-beta search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// MCTS simulations per move
    #[arg(long, default_value_t = DEFAULT_SIMULATIONS)]
    simulations: u32,

    /// Leaf evaluator for alpha-beta players
    #[arg(long, value_enum, default_value = "material")]
    evaluator: EvaluatorKind,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Games reaching this ply are drawn
    #[arg(long, default_value_t = MAX_GAME_PLY)]
    max_ply: u32,

    /// Seed for the random players, MCTS and the network weights
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print every position of a single game
    #[arg(long)]
    show: bool,
}

impl Args {
    // Each game and colour gets its own seed so series games differ
    fn player_seed(&self, game: usize, color_offset: u64) -> u64 {
        self.seed
            .wrapping_add((game as u64).wrapping_mul(2))
            .wrapping_add(color_offset)
    }

    fn make_player(&self, kind: PlayerKind, game: usize, color_offset: u64) -> Box<dyn Player> {
        let seed = self.player_seed(game, color_offset);
        match kind {
            PlayerKind::AlphaBeta => match self.evaluator {
                EvaluatorKind::Material => Box::new(AlphaBetaPlayer::new(self.depth, MaterialEvaluator)),
                EvaluatorKind::Neural => Box::new(AlphaBetaPlayer::new(self.depth, network(seed))),
            },
            PlayerKind::Mcts => {
                let config = MctsConfig {
                    simulations: self.simulations,
                    ply_cap: self.max_ply,
                    ..MctsConfig::default()
                };
                Box::new(MctsPlayer::new(config, seed))
            }
            PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
        }
    }
}

fn network(seed: u64) -> NeuralNetEvaluator {
    NeuralNetEvaluator::random(HIDDEN1_NODES, HIDDEN2_NODES, &mut StdRng::seed_from_u64(seed))
}

fn show_game(args: &Args) -> Result<()> {
    let mut white = args.make_player(args.white, 0, 0);
    let mut black = args.make_player(args.black, 0, 1);
    let record = play_game(white.as_mut(), black.as_mut(), Board::new(), args.max_ply)?;

    let mut board = Board::new();
    println!("{}", board);
    for mv in &record.moves {
        board.make_move(mv)?;
        println!("{} plays {}\n{}", board.current_turn().opposite(), mv, board);
    }
    println!("{} ({} vs {})", record.result, white.name(), black.name());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.games == 0 {
        bail!("--games must be at least 1");
    }
    if args.show {
        if args.games > 1 {
            bail!("--show only works with a single game");
        }
        return show_game(&args);
    }

    info!(
        "{:?} (white) vs {:?} (black), {} games",
        args.white, args.black, args.games
    );
    let summary = play_series(
        args.games,
        |game| args.make_player(args.white, game, 0),
        |game| args.make_player(args.black, game, 1),
        args.max_ply,
    )?;

    println!(
        "white wins: {}, black wins: {}, draws: {}",
        summary.white_wins, summary.black_wins, summary.draws
    );
    Ok(())
}
