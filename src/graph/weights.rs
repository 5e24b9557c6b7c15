use super::{HeuristicFunction, WeightFunction};
use crate::{Cost, SearchError};
use hashbrown::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A sparse [`WeightFunction`] storing one weight per registered edge.
///
/// ## Examples
/// ```
/// use graph_search::graph::{WeightFunction, WeightMap};
///
/// let mut weights = WeightMap::new();
/// weights.insert(0, 1, 2.5).unwrap();
/// weights.insert_symmetric(1, 2, 1.0).unwrap();
///
/// assert_eq!(weights.weight(0, 1), Ok(2.5));
/// assert_eq!(weights.weight(2, 1), Ok(1.0));
/// assert!(weights.weight(1, 0).is_err());
///
/// // negative weights are not supported by any Finder
/// assert!(weights.insert(0, 2, -1.0).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct WeightMap<N> {
    map: HashMap<(N, N), Cost>,
}

impl<N> Default for WeightMap<N> {
    fn default() -> Self {
        WeightMap {
            map: HashMap::new(),
        }
    }
}

impl<N: Copy + Eq + Hash + Debug> WeightMap<N> {
    /// Creates an empty WeightMap
    pub fn new() -> WeightMap<N> {
        WeightMap::default()
    }

    /// Registers the weight of the edge `tail -> head`, replacing any previous weight.
    ///
    /// Fails with [`SearchError::InvalidArgument`] if `weight` is negative or NaN.
    pub fn insert(&mut self, tail: N, head: N, weight: Cost) -> Result<(), SearchError> {
        if weight.is_nan() || weight < 0.0 {
            return Err(SearchError::invalid(format!(
                "the weight of {:?} -> {:?} must be non-negative, got {}",
                tail, head, weight
            )));
        }
        self.map.insert((tail, head), weight);
        Ok(())
    }

    /// Registers `weight` for both `a -> b` and `b -> a`.
    pub fn insert_symmetric(&mut self, a: N, b: N, weight: Cost) -> Result<(), SearchError> {
        self.insert(a, b, weight)?;
        self.insert(b, a, weight)
    }

    /// Returns the registered weight of `tail -> head`, if any.
    pub fn get(&self, tail: N, head: N) -> Option<Cost> {
        self.map.get(&(tail, head)).copied()
    }

    /// Forgets the weight of `tail -> head`.
    pub fn remove(&mut self, tail: N, head: N) -> Option<Cost> {
        self.map.remove(&(tail, head))
    }

    /// The number of registered edges
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no edge is registered
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<N: Copy + Eq + Hash + Debug + Send + Sync> WeightFunction<N> for WeightMap<N> {
    fn weight(&self, tail: N, head: N) -> Result<Cost, SearchError> {
        self.get(tail, head)
            .ok_or_else(|| SearchError::missing_edge(tail, head))
    }
}

/// A [`HeuristicFunction`] for Graphs embedded in the plane.
///
/// Every Node is assigned a 2D location and the estimate is the straight-line distance
/// between the two locations, multiplied by `scale`. The estimate is admissible as long as no
/// edge weighs less than `scale` times the distance between its endpoints.
///
/// Nodes without a location estimate `0.0`, which is always admissible.
#[derive(Clone, Debug)]
pub struct PlanarHeuristic<N> {
    locations: HashMap<N, (f64, f64)>,
    scale: f64,
}

impl<N: Copy + Eq + Hash> PlanarHeuristic<N> {
    /// Creates an empty PlanarHeuristic with a scale of `1.0`
    pub fn new() -> PlanarHeuristic<N> {
        PlanarHeuristic::with_scale(1.0)
    }

    /// Creates an empty PlanarHeuristic with the given scale
    pub fn with_scale(scale: f64) -> PlanarHeuristic<N> {
        PlanarHeuristic {
            locations: HashMap::new(),
            scale,
        }
    }

    /// Places `node` at `(x, y)`
    pub fn insert(&mut self, node: N, location: (f64, f64)) {
        self.locations.insert(node, location);
    }

    /// Returns the location of `node`
    pub fn location(&self, node: N) -> Option<(f64, f64)> {
        self.locations.get(&node).copied()
    }

    /// The straight-line distance between two located Nodes
    pub fn distance(&self, a: N, b: N) -> Option<f64> {
        let (ax, ay) = self.location(a)?;
        let (bx, by) = self.location(b)?;
        Some((ax - bx).hypot(ay - by))
    }
}

impl<N: Copy + Eq + Hash> Default for PlanarHeuristic<N> {
    fn default() -> Self {
        PlanarHeuristic::new()
    }
}

impl<N: Copy + Eq + Hash + Sync> HeuristicFunction<N> for PlanarHeuristic<N> {
    fn estimate(&self, from: N, to: N) -> Cost {
        self.distance(from, to).map_or(0.0, |d| d * self.scale)
    }
}

/// The trivial heuristic. Turns every A*-family Finder into its Dijkstra counterpart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<N> HeuristicFunction<N> for ZeroHeuristic {
    fn estimate(&self, _: N, _: N) -> Cost {
        0.0
    }
}
