//! Monte Carlo tree search.
//!
//! Each simulation walks down the tree with an exploration-weighted score,
//! expands the leaf it reaches with one child per legal move, finishes the game
//! from one of those children with uniformly random moves and feeds the outcome
//! back up the path. Outcomes are scored from White's point of view, so White
//! nodes pick the highest score and Black nodes the lowest.

use checkers_core::{Board, Color, Move};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::MAX_GAME_PLY;

pub const DEFAULT_SIMULATIONS: u32 = 1000;
pub const EXPLORATION: f64 = std::f64::consts::SQRT_2;
// Keeps unvisited children finite and breaks exact ties
pub const EPSILON: f64 = 1e-6;

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    /// Simulations run per call.
    pub simulations: u32,
    /// Random playouts stop as a draw once the board reaches this ply.
    pub ply_cap: u32,
    /// Weight of the exploration term.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            ply_cap: MAX_GAME_PLY,
            exploration: EXPLORATION,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    board: Board,
    mv: Option<Move>,
    visits: u32,
    value: f64,
    children: Vec<usize>,
}

impl Node {
    fn new(board: Board, mv: Option<Move>) -> Self {
        Self {
            board,
            mv,
            visits: 0,
            value: 0.0,
            children: Vec::new(),
        }
    }
}

/// Nodes live in one arena and refer to each other by index; the root is 0.
#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn new(root: Board) -> Self {
        Self {
            nodes: vec![Node::new(root, None)],
        }
    }

    fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    /// Adds one child per legal move. Returns false for a terminal node.
    fn expand(&mut self, index: usize) -> bool {
        let board = self.nodes[index].board;
        let moves = board.legal_moves();
        if moves.is_empty() {
            return false;
        }
        for mv in moves {
            let child = self.nodes.len();
            self.nodes.push(Node::new(board.apply(&mv), Some(mv)));
            self.nodes[index].children.push(child);
        }
        true
    }

    fn backpropagate(&mut self, path: &[usize], outcome: f64) {
        for &index in path {
            let node = &mut self.nodes[index];
            node.visits += 1;
            node.value += outcome;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MctsSearch {
    config: MctsConfig,
}

impl MctsSearch {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Runs the configured number of simulations from `board` and returns the
    /// chosen move, or `None` when the side to move has no legal move or the
    /// budget is zero.
    pub fn best_move<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<Move> {
        let tree = self.build_tree(board, rng);
        let root = tree.root();
        if root.children.is_empty() {
            return None;
        }

        let chosen = self.select_child(&tree, ROOT, rng);
        let node = &tree.nodes[chosen];
        debug!(
            "mcts ran {} simulations over {} nodes, picked {:?} for {} at ply {} ({} visits, value {:.1})",
            self.config.simulations,
            tree.nodes.len(),
            node.mv.as_ref().map(Move::to_string),
            board.current_turn(),
            board.ply(),
            node.visits,
            node.value
        );
        node.mv.clone()
    }

    fn build_tree<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Tree {
        let mut tree = Tree::new(*board);
        for _ in 0..self.config.simulations {
            self.simulate(&mut tree, rng);
        }
        tree
    }

    fn simulate<R: Rng + ?Sized>(&self, tree: &mut Tree, rng: &mut R) {
        let mut path = vec![ROOT];
        let mut current = ROOT;
        while !tree.nodes[current].children.is_empty() {
            current = self.select_child(tree, current, rng);
            path.push(current);
        }

        if tree.expand(current) {
            current = self.select_child(tree, current, rng);
            path.push(current);
        }

        let outcome = rollout(tree.nodes[current].board, self.config.ply_cap, rng);
        tree.backpropagate(&path, outcome);
    }

    // Upper confidence bound for the side to move at `parent`: an optimistic
    // bonus for White, a pessimistic one for Black.
    fn select_child<R: Rng + ?Sized>(&self, tree: &Tree, parent: usize, rng: &mut R) -> usize {
        let node = &tree.nodes[parent];
        let maximizing = node.board.current_turn() == Color::White;
        let log_parent = (f64::from(node.visits) + 1.0).ln();

        let mut best = node.children[0];
        let mut best_score = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        for &index in &node.children {
            let child = &tree.nodes[index];
            let visits = f64::from(child.visits) + EPSILON;
            let exploit = child.value / visits;
            let explore = self.config.exploration * (log_parent / visits).sqrt();
            let jitter = rng.gen::<f64>() * EPSILON;

            let score = if maximizing {
                exploit + explore + jitter
            } else {
                exploit - explore + jitter
            };
            let better = if maximizing { score > best_score } else { score < best_score };
            if better {
                best = index;
                best_score = score;
            }
        }
        best
    }
}

/// Plays uniformly random moves until the board reaches `ply_cap` or one side
/// is stuck. The cap is checked first, as in the game loop. Returns +1 for a
/// White win, -1 for a Black win and 0 for a draw.
fn rollout<R: Rng + ?Sized>(mut board: Board, ply_cap: u32, rng: &mut R) -> f64 {
    loop {
        if board.ply() >= ply_cap {
            return 0.0;
        }
        let moves = board.legal_moves();
        match moves.choose(rng) {
            None => return board.current_turn().loss_score(),
            Some(mv) => board = board.apply(mv),
        }
    }
}
