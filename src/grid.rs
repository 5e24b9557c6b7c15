//! A 2D Grid as a [`Graph`], with the usual Grid metrics as heuristics.
//!
//! Cells are addressed by `(x, y)` [`Point`]s with `(0, 0)` in the top-left corner. Every cell
//! that is not a wall is a Node. Moves go to the 4 cardinal neighbors and, if the
//! [`GridConfig`] allows it, to the 4 diagonal neighbors.
//!
//! ```no_code
//! A: Agent, o: reachable in one step
//! o o o
//!  \|/
//! o-A-o
//!  /|\
//! o o o
//! ```
//!
//! ## Examples
//! ```
//! use graph_search::grid::{GridConfig, GridGraph, GridWeights, Octile};
//! use graph_search::search::{a_star, SearchContext};
//!
//! let mut grid = GridGraph::new(3, 3, GridConfig::CARDINAL);
//! grid.set_wall((1, 1));
//!
//! let ctx = SearchContext::new(&grid, &GridWeights).with_heuristic(&Octile);
//! let path = a_star(&ctx, (0, 0), (2, 2)).unwrap();
//! assert_eq!(path.cost(), 4.0);
//! assert!(!path.nodes().contains(&(1, 1)));
//! ```

use crate::graph::{Graph, HeuristicFunction, WeightFunction};
use crate::{Cost, SearchError};
use std::f64::consts::SQRT_2;

/// A position on a [`GridGraph`] as `(x, y)`
pub type Point = (usize, usize);

const CARDINALS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONALS: [(isize, isize); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Options for the moves allowed on a [`GridGraph`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// `true` (default): Nodes are connected to their diagonal neighbors.
    pub allow_diagonals: bool,
    /// `true` (default): a diagonal move is allowed even if one of the two cardinal cells it
    /// passes is a wall. `false`: both of them have to be free.
    ///
    /// Has no effect without `allow_diagonals`.
    pub cross_corners: bool,
}

impl GridConfig {
    /// Only the 4 cardinal moves
    pub const CARDINAL: GridConfig = GridConfig {
        allow_diagonals: false,
        cross_corners: false,
    };
    /// All 8 moves, but no squeezing diagonally past a wall
    pub const NO_CORNER_CUTTING: GridConfig = GridConfig {
        allow_diagonals: true,
        cross_corners: false,
    };
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            allow_diagonals: true,
            cross_corners: true,
        }
    }
}

/// A `width` x `height` Grid of cells, some of which are walls.
///
/// Walls are not part of the Graph: [`contains`](Graph::contains) is `false` for them and they
/// never show up as neighbors. Since every move can be made in both directions, `parents` and
/// `children` are the same.
#[derive(Clone, Debug)]
pub struct GridGraph {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    config: GridConfig,
}

impl GridGraph {
    /// Creates a Grid without any walls.
    pub fn new(width: usize, height: usize, config: GridConfig) -> GridGraph {
        GridGraph {
            width,
            height,
            walls: vec![false; width * height],
            config,
        }
    }

    /// The number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// The moves allowed on this Grid
    pub fn config(&self) -> GridConfig {
        self.config
    }

    fn index(&self, (x, y): Point) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Turns the cell at `point` into a wall.
    ///
    /// Returns `true` if the cell was free before. Points outside the Grid are ignored.
    pub fn set_wall(&mut self, point: Point) -> bool {
        match self.index(point) {
            Some(i) => !std::mem::replace(&mut self.walls[i], true),
            None => false,
        }
    }

    /// Removes the wall at `point`.
    ///
    /// Returns `true` if there was a wall.
    pub fn clear_wall(&mut self, point: Point) -> bool {
        match self.index(point) {
            Some(i) => std::mem::replace(&mut self.walls[i], false),
            None => false,
        }
    }

    /// Returns `true` if `point` is inside the Grid and a wall.
    pub fn is_wall(&self, point: Point) -> bool {
        self.index(point).map_or(false, |i| self.walls[i])
    }

    /// Removes all walls.
    pub fn clear_walls(&mut self) {
        self.walls.iter_mut().for_each(|wall| *wall = false);
    }

    /// The number of walls on the Grid
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|wall| **wall).count()
    }

    /// Returns `true` if `point` is inside the Grid and not a wall.
    pub fn is_free(&self, point: Point) -> bool {
        self.index(point).map_or(false, |i| !self.walls[i])
    }

    fn offset(&self, (x, y): Point, (dx, dy): (isize, isize)) -> Option<Point> {
        let x = x.checked_add_signed(dx)?;
        let y = y.checked_add_signed(dy)?;
        self.is_free((x, y)).then_some((x, y))
    }

    fn neighbors(&self, point: Point, target: &mut Vec<Point>) {
        target.extend(CARDINALS.iter().filter_map(|&d| self.offset(point, d)));

        if !self.config.allow_diagonals {
            return;
        }
        for &(dx, dy) in DIAGONALS.iter() {
            let Some(next) = self.offset(point, (dx, dy)) else {
                continue;
            };
            if !self.config.cross_corners
                && (self.offset(point, (dx, 0)).is_none() || self.offset(point, (0, dy)).is_none())
            {
                continue;
            }
            target.push(next);
        }
    }
}

impl Graph for GridGraph {
    type Node = Point;

    fn contains(&self, node: Point) -> bool {
        self.is_free(node)
    }

    fn children(&self, node: Point, target: &mut Vec<Point>) {
        self.neighbors(node, target)
    }

    fn parents(&self, node: Point, target: &mut Vec<Point>) {
        self.neighbors(node, target)
    }
}

/// The [`WeightFunction`] of a [`GridGraph`]: `1` for a cardinal move, `√2` for a diagonal one.
///
/// The weight only depends on the relative position of the two cells. Cells that are not
/// neighbors have no edge between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridWeights;

impl WeightFunction<Point> for GridWeights {
    fn weight(&self, tail: Point, head: Point) -> Result<Cost, SearchError> {
        match (tail.0.abs_diff(head.0), tail.1.abs_diff(head.1)) {
            (1, 0) | (0, 1) => Ok(1.0),
            (1, 1) => Ok(SQRT_2),
            _ => Err(SearchError::missing_edge(tail, head)),
        }
    }
}

fn deltas(a: Point, b: Point) -> (Cost, Cost) {
    (a.0.abs_diff(b.0) as Cost, a.1.abs_diff(b.1) as Cost)
}

/// `|dx| + |dy|`: exact on a Grid without diagonals, inadmissible with them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl HeuristicFunction<Point> for Manhattan {
    fn estimate(&self, from: Point, to: Point) -> Cost {
        let (dx, dy) = deltas(from, to);
        dx + dy
    }
}

/// `max(|dx|, |dy|)`: the number of moves on a Grid with diagonals.
///
/// Admissible for [`GridWeights`], but weaker than [`Octile`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Chebyshev;

impl HeuristicFunction<Point> for Chebyshev {
    fn estimate(&self, from: Point, to: Point) -> Cost {
        let (dx, dy) = deltas(from, to);
        dx.max(dy)
    }
}

/// The exact distance on an empty Grid with diagonals that cost `√2`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Octile;

impl HeuristicFunction<Point> for Octile {
    fn estimate(&self, from: Point, to: Point) -> Cost {
        let (dx, dy) = deltas(from, to);
        dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
    }
}

/// The straight line distance. Admissible for any set of moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl HeuristicFunction<Point> for Euclidean {
    fn estimate(&self, from: Point, to: Point) -> Cost {
        let (dx, dy) = deltas(from, to);
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{dijkstra, SearchContext};

    fn neighbors(grid: &GridGraph, point: Point) -> Vec<Point> {
        let mut target = Vec::new();
        grid.children(point, &mut target);
        target
    }

    #[test]
    fn cardinal_neighbors() {
        let grid = GridGraph::new(5, 5, GridConfig::CARDINAL);
        assert_eq!(neighbors(&grid, (0, 2)), vec![(0, 1), (1, 2), (0, 3)]);
        assert_eq!(neighbors(&grid, (4, 4)), vec![(4, 3), (3, 4)]);
    }

    #[test]
    fn diagonal_neighbors() {
        let grid = GridGraph::new(5, 5, GridConfig::default());
        assert_eq!(
            neighbors(&grid, (0, 2)),
            vec![(0, 1), (1, 2), (0, 3), (1, 1), (1, 3)]
        );
        assert_eq!(neighbors(&grid, (2, 2)).len(), 8);
    }

    #[test]
    fn walls_are_not_nodes() {
        let mut grid = GridGraph::new(3, 3, GridConfig::default());
        assert!(grid.set_wall((1, 0)));
        assert!(!grid.set_wall((1, 0)));
        assert!(!grid.set_wall((7, 7)));
        assert!(grid.is_wall((1, 0)));
        assert!(!grid.contains((1, 0)));
        assert!(!grid.contains((3, 0)));
        assert_eq!(grid.wall_count(), 1);
        assert_eq!(neighbors(&grid, (0, 0)), vec![(0, 1), (1, 1)]);

        assert!(grid.clear_wall((1, 0)));
        assert!(grid.contains((1, 0)));
        grid.set_wall((2, 2));
        grid.clear_walls();
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn corner_cutting() {
        let mut grid = GridGraph::new(3, 3, GridConfig::NO_CORNER_CUTTING);
        grid.set_wall((1, 0));
        // (0, 0) -> (1, 1) would squeeze past the wall at (1, 0)
        assert_eq!(neighbors(&grid, (0, 0)), vec![(0, 1)]);
        assert_eq!(neighbors(&grid, (0, 2)), vec![(0, 1), (1, 2), (1, 1)]);

        let mut grid = GridGraph::new(3, 3, GridConfig::default());
        grid.set_wall((1, 0));
        assert_eq!(neighbors(&grid, (0, 0)), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn three_by_three() {
        for (config, expected) in [
            (GridConfig::default(), 2.0 * SQRT_2),
            (GridConfig::CARDINAL, 4.0),
        ] {
            let grid = GridGraph::new(3, 3, config);
            let ctx = SearchContext::new(&grid, &GridWeights);
            let path = dijkstra(&ctx, (0, 0), (2, 2)).unwrap();
            assert!((path.cost() - expected).abs() < 1e-12, "{:?}", path);
            assert_eq!(path.source(), Some(&(0, 0)));
            assert_eq!(path.target(), Some(&(2, 2)));
        }
    }

    #[test]
    fn weights() {
        assert_eq!(GridWeights.weight((3, 3), (3, 4)), Ok(1.0));
        assert_eq!(GridWeights.weight((3, 3), (2, 2)), Ok(SQRT_2));
        assert!(matches!(
            GridWeights.weight((3, 3), (3, 5)),
            Err(SearchError::MissingEdgeWeight { .. })
        ));
        assert!(GridWeights.weight((3, 3), (3, 3)).is_err());
    }

    #[test]
    fn metrics() {
        let (a, b) = ((3, 1), (0, 0));
        assert_eq!(Manhattan.estimate(a, b), 4.0);
        assert_eq!(Chebyshev.estimate(a, b), 3.0);
        assert!((Octile.estimate(a, b) - (2.0 + SQRT_2)).abs() < 1e-12);
        assert!((Euclidean.estimate(a, b) - 10f64.sqrt()).abs() < 1e-12);
        assert_eq!(Octile.estimate(b, b), 0.0);
    }

    #[test]
    fn metrics_against_open_grids() {
        let (start, goal) = ((0, 0), (4, 2));

        let grid = GridGraph::new(5, 3, GridConfig::CARDINAL);
        let exact = dijkstra(&SearchContext::new(&grid, &GridWeights), start, goal)
            .unwrap()
            .cost();
        assert_eq!(Manhattan.estimate(start, goal), exact);

        let grid = GridGraph::new(5, 3, GridConfig::default());
        let exact = dijkstra(&SearchContext::new(&grid, &GridWeights), start, goal)
            .unwrap()
            .cost();
        assert!((Octile.estimate(start, goal) - exact).abs() < 1e-12);
        assert!(Chebyshev.estimate(start, goal) <= exact);
        assert!(Euclidean.estimate(start, goal) <= exact);
        // diagonals make Manhattan overestimate
        assert!(Manhattan.estimate(start, goal) > exact);
    }
}
