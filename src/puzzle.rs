//! The sliding tile puzzle (8-puzzle and 15-puzzle) as a [`Graph`].
//!
//! Every arrangement of the tiles is a Node, packed into a single [`Board`] value. Two Boards
//! are connected if one slide of a tile into the blank turns one into the other.
//!
//! ## Examples
//! ```
//! use graph_search::puzzle::{Move, SlidingPuzzle};
//! use graph_search::search::{nba_star, SearchContext};
//!
//! let puzzle = SlidingPuzzle::new(3).unwrap();
//! let goal = puzzle.goal();
//! let start = [Move::Up, Move::Left, Move::Up]
//!     .iter()
//!     .try_fold(goal, |board, &m| puzzle.apply(board, m))
//!     .unwrap();
//!
//! let weights = puzzle.weights();
//! let heuristic = puzzle.heuristic();
//! let ctx = SearchContext::new(&puzzle, &weights).with_heuristic(&heuristic);
//! let path = nba_star(&ctx, start, goal).unwrap();
//! assert_eq!(path.cost(), 3.0);
//! ```

use crate::graph::{Graph, HeuristicFunction, WeightFunction};
use crate::grid::Point;
use crate::{Cost, SearchError};
use std::fmt::{self, Debug};

const BITS: usize = 4;
const MASK: u64 = 0xF;

/// One arrangement of the tiles, 4 bits per cell in row-major order.
///
/// A Board does not know the size of its puzzle; use the methods of [`SlidingPuzzle`] to read
/// it. The blank is tile `0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board(u64);

impl Board {
    /// The packed representation
    pub fn raw(self) -> u64 {
        self.0
    }

    fn get(self, cell: usize) -> u8 {
        ((self.0 >> (cell * BITS)) & MASK) as u8
    }

    fn swap(self, a: usize, b: usize) -> Board {
        let (tile_a, tile_b) = (self.get(a) as u64, self.get(b) as u64);
        let cleared = self.0 & !(MASK << (a * BITS)) & !(MASK << (b * BITS));
        Board(cleared | tile_b << (a * BITS) | tile_a << (b * BITS))
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board({:016x})", self.0)
    }
}

/// The direction in which the blank moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// All moves, in the order in which neighbors are generated
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    /// The move that undoes this one
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Right => Move::Left,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
        }
    }
}

/// The `size` x `size` sliding tile puzzle, for `size` 3 or 4.
///
/// The goal has the tiles in ascending order with the blank in the bottom-right corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlidingPuzzle {
    size: usize,
}

impl SlidingPuzzle {
    /// Creates the puzzle. Fails if `size` is not 3 or 4.
    pub fn new(size: usize) -> Result<SlidingPuzzle, SearchError> {
        if !(3..=4).contains(&size) {
            return Err(SearchError::invalid(format!(
                "the sliding puzzle size must be 3 or 4, got {}",
                size
            )));
        }
        Ok(SlidingPuzzle { size })
    }

    /// The number of rows and columns
    pub fn size(&self) -> usize {
        self.size
    }

    fn cells(&self) -> usize {
        self.size * self.size
    }

    /// The solved Board
    pub fn goal(&self) -> Board {
        let last = self.cells() - 1;
        Board(
            (0..last)
                .map(|cell| (cell as u64 + 1) << (cell * BITS))
                .fold(0, |acc, bits| acc | bits),
        )
    }

    /// Packs the tiles in row-major order into a Board.
    ///
    /// Fails if `tiles` is not a permutation of `0..size²`.
    ///
    /// ```
    /// # use graph_search::puzzle::SlidingPuzzle;
    /// let puzzle = SlidingPuzzle::new(3).unwrap();
    /// let board = puzzle.board(&[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    /// assert_eq!(board, puzzle.goal());
    ///
    /// assert!(puzzle.board(&[1, 1, 2, 3, 4, 5, 6, 7, 8]).is_err());
    /// ```
    pub fn board(&self, tiles: &[u8]) -> Result<Board, SearchError> {
        let cells = self.cells();
        if tiles.len() != cells {
            return Err(SearchError::invalid(format!(
                "a {0}x{0} board needs {1} tiles, got {2}",
                self.size,
                cells,
                tiles.len()
            )));
        }
        let mut seen = 0u32;
        let mut raw = 0u64;
        for (cell, &tile) in tiles.iter().enumerate() {
            if tile as usize >= cells || seen & (1 << tile) != 0 {
                return Err(SearchError::invalid(format!(
                    "tiles must be a permutation of 0..{}, got {:?}",
                    cells, tiles
                )));
            }
            seen |= 1 << tile;
            raw |= (tile as u64) << (cell * BITS);
        }
        Ok(Board(raw))
    }

    /// Unpacks a Board into its tiles in row-major order.
    pub fn tiles(&self, board: Board) -> Vec<u8> {
        (0..self.cells()).map(|cell| board.get(cell)).collect()
    }

    fn blank_cell(&self, board: Board) -> Option<usize> {
        (0..self.cells()).find(|&cell| board.get(cell) == 0)
    }

    /// The position of the blank as `(x, y)`
    pub fn blank(&self, board: Board) -> Option<Point> {
        self.blank_cell(board)
            .map(|cell| (cell % self.size, cell / self.size))
    }

    /// Moves the blank one cell in the direction of `m`.
    ///
    /// Returns `None` if the blank is already at that edge of the Board.
    pub fn apply(&self, board: Board, m: Move) -> Option<Board> {
        let cell = self.blank_cell(board)?;
        let (x, y) = (cell % self.size, cell / self.size);
        let next = match m {
            Move::Up if y > 0 => cell - self.size,
            Move::Right if x + 1 < self.size => cell + 1,
            Move::Down if y + 1 < self.size => cell + self.size,
            Move::Left if x > 0 => cell - 1,
            _ => return None,
        };
        Some(board.swap(cell, next))
    }

    /// Returns `true` if the goal can be reached from `board`.
    ///
    /// Exactly half of all Boards are solvable, the other half forms a separate component of
    /// the Graph.
    pub fn is_solvable(&self, board: Board) -> bool {
        let tiles: Vec<u8> = self.tiles(board).into_iter().filter(|&t| t != 0).collect();
        let inversions = tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| *b < a).count())
            .sum::<usize>();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let row = self.blank(board).map_or(0, |(_, y)| y);
            (inversions + row) % 2 == 1
        }
    }

    /// Renders the Board as rows of right-aligned tiles, `.` for the blank.
    pub fn render(&self, board: Board) -> String {
        let width = if self.cells() > 10 { 2 } else { 1 };
        let mut out = String::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if x > 0 {
                    out.push(' ');
                }
                let cell = match board.get(y * self.size + x) {
                    0 => format!("{:>w$}", ".", w = width),
                    tile => format!("{:>w$}", tile, w = width),
                };
                out.push_str(&cell);
            }
            out.push('\n');
        }
        out
    }

    /// The [`WeightFunction`] of this puzzle
    pub fn weights(&self) -> PuzzleWeights {
        PuzzleWeights { puzzle: *self }
    }

    /// The Manhattan distance heuristic of this puzzle
    pub fn heuristic(&self) -> PuzzleManhattan {
        PuzzleManhattan { puzzle: *self }
    }

    fn is_valid(&self, board: Board) -> bool {
        let cells = self.cells();
        if cells * BITS < 64 && board.0 >> (cells * BITS) != 0 {
            return false;
        }
        let seen = (0..cells).fold(0u32, |seen, cell| seen | 1 << board.get(cell));
        seen == (1 << cells) - 1
    }

    fn neighbors(&self, board: Board, target: &mut Vec<Board>) {
        target.extend(Move::ALL.iter().filter_map(|&m| self.apply(board, m)));
    }
}

impl Graph for SlidingPuzzle {
    type Node = Board;

    fn contains(&self, node: Board) -> bool {
        self.is_valid(node)
    }

    fn children(&self, node: Board, target: &mut Vec<Board>) {
        self.neighbors(node, target)
    }

    fn parents(&self, node: Board, target: &mut Vec<Board>) {
        self.neighbors(node, target)
    }
}

/// Every slide of a tile costs `1`.
#[derive(Clone, Copy, Debug)]
pub struct PuzzleWeights {
    puzzle: SlidingPuzzle,
}

impl WeightFunction<Board> for PuzzleWeights {
    fn weight(&self, tail: Board, head: Board) -> Result<Cost, SearchError> {
        let adjacent = Move::ALL
            .iter()
            .any(|&m| self.puzzle.apply(tail, m) == Some(head));
        if adjacent {
            Ok(1.0)
        } else {
            Err(SearchError::missing_edge(tail, head))
        }
    }
}

/// The sum of the Manhattan distances of every tile (except the blank) to its place on the
/// other Board.
///
/// Admissible and consistent, since one move shifts one tile by one cell.
#[derive(Clone, Copy, Debug)]
pub struct PuzzleManhattan {
    puzzle: SlidingPuzzle,
}

impl PuzzleManhattan {
    fn positions(&self, board: Board) -> [usize; 16] {
        let mut positions = [0; 16];
        for cell in 0..self.puzzle.cells() {
            positions[board.get(cell) as usize] = cell;
        }
        positions
    }
}

impl HeuristicFunction<Board> for PuzzleManhattan {
    fn estimate(&self, from: Board, to: Board) -> Cost {
        let size = self.puzzle.size;
        let (a, b) = (self.positions(from), self.positions(to));
        (1..self.puzzle.cells())
            .map(|tile| {
                let (ax, ay) = (a[tile] % size, a[tile] / size);
                let (bx, by) = (b[tile] % size, b[tile] / size);
                ax.abs_diff(bx) + ay.abs_diff(by)
            })
            .sum::<usize>() as Cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{a_star, bidirectional_a_star, SearchContext};
    use nanorand::{Rng, WyRand};

    fn scramble(puzzle: &SlidingPuzzle, moves: usize, seed: u64) -> Board {
        let mut rng = WyRand::new_seed(seed);
        let mut board = puzzle.goal();
        for _ in 0..moves {
            let m = Move::ALL[rng.generate_range(0_usize..4)];
            if let Some(next) = puzzle.apply(board, m) {
                board = next;
            }
        }
        board
    }

    #[test]
    fn sizes() {
        assert!(SlidingPuzzle::new(2).is_err());
        assert!(SlidingPuzzle::new(5).is_err());
        let puzzle = SlidingPuzzle::new(4).unwrap();
        let goal = puzzle.goal();
        assert_eq!(puzzle.tiles(goal), (1..16).chain([0]).collect::<Vec<u8>>());
        assert_eq!(puzzle.blank(goal), Some((3, 3)));
        assert!(puzzle.contains(goal));
        assert!(puzzle.is_solvable(goal));
    }

    #[test]
    fn moves() {
        let puzzle = SlidingPuzzle::new(3).unwrap();
        let goal = puzzle.goal();
        assert_eq!(puzzle.apply(goal, Move::Down), None);
        assert_eq!(puzzle.apply(goal, Move::Right), None);

        let up = puzzle.apply(goal, Move::Up).unwrap();
        assert_eq!(puzzle.tiles(up), vec![1, 2, 3, 4, 5, 0, 7, 8, 6]);
        assert_eq!(puzzle.apply(up, Move::Down), Some(goal));

        let mut children = Vec::new();
        puzzle.children(goal, &mut children);
        assert_eq!(children.len(), 2);
        let center = puzzle.board(&[1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap();
        children.clear();
        puzzle.children(center, &mut children);
        assert_eq!(children.len(), 4);

        assert_eq!(puzzle.render(up), "1 2 3\n4 5 .\n7 8 6\n");
    }

    #[test]
    fn render_aligns_two_digit_tiles() {
        let puzzle = SlidingPuzzle::new(4).unwrap();
        let left = puzzle.apply(puzzle.goal(), Move::Left).unwrap();
        assert_eq!(
            puzzle.render(left),
            " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14  . 15\n"
        );
    }

    #[test]
    fn invalid_boards() {
        let puzzle = SlidingPuzzle::new(3).unwrap();
        assert!(puzzle.board(&[1, 2, 3]).is_err());
        assert!(puzzle.board(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).is_err());
        assert!(!puzzle.contains(Board(0)));
        assert!(!puzzle.contains(Board(puzzle.goal().raw() | 1 << 40)));
    }

    #[test]
    fn solvability() {
        let puzzle = SlidingPuzzle::new(3).unwrap();
        let swapped = puzzle.board(&[2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert!(!puzzle.is_solvable(swapped));
        assert!(puzzle.is_solvable(scramble(&puzzle, 50, 7)));

        let puzzle = SlidingPuzzle::new(4).unwrap();
        assert!(puzzle.is_solvable(scramble(&puzzle, 50, 7)));
        let mut tiles = puzzle.tiles(puzzle.goal());
        tiles.swap(0, 1);
        assert!(!puzzle.is_solvable(puzzle.board(&tiles).unwrap()));
    }

    #[test]
    fn weights_and_heuristic() {
        let puzzle = SlidingPuzzle::new(3).unwrap();
        let (weights, heuristic) = (puzzle.weights(), puzzle.heuristic());
        let goal = puzzle.goal();
        let up = puzzle.apply(goal, Move::Up).unwrap();
        let left = puzzle.apply(goal, Move::Left).unwrap();

        assert_eq!(weights.weight(goal, up), Ok(1.0));
        assert_eq!(weights.weight(up, goal), Ok(1.0));
        assert!(weights.weight(up, left).is_err());
        assert_eq!(heuristic.estimate(up, goal), 1.0);
        assert_eq!(heuristic.estimate(up, left), 2.0);
        assert_eq!(heuristic.estimate(goal, goal), 0.0);
    }

    #[test]
    fn solves_scrambled_boards() {
        let puzzle = SlidingPuzzle::new(3).unwrap();
        let (weights, heuristic) = (puzzle.weights(), puzzle.heuristic());
        let ctx = SearchContext::new(&puzzle, &weights).with_heuristic(&heuristic);
        let goal = puzzle.goal();

        for seed in 0..4 {
            let start = scramble(&puzzle, 16, seed);
            let path = a_star(&ctx, start, goal).unwrap();
            assert!(path.cost() <= 16.0);
            assert!(heuristic.estimate(start, goal) <= path.cost());
            assert_eq!(path.cost(), (path.len() - 1) as Cost);

            let other = bidirectional_a_star(&ctx, start, goal).unwrap();
            assert_eq!(other.cost(), path.cost());
        }
    }
}
