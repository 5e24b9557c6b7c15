//! The contracts every Path Finder is written against, and the general purpose Graph kinds.
//!
//! A Finder never looks at a concrete Graph type. It only needs three capabilities:
//! - a [`Graph`] that can enumerate the children (outgoing neighbors) and parents (incoming
//!   neighbors) of a Node
//! - a [`WeightFunction`] that maps an ordered pair of adjacent Nodes to a non-negative Cost
//! - for the A*-family: a [`HeuristicFunction`] that gives a lower bound on the distance
//!   between two Nodes
//!
//! Both function traits are implemented for plain closures, so small Graphs rarely need a
//! dedicated type:
//! ```
//! use graph_search::graph::{HeuristicFunction, WeightFunction};
//!
//! let weights = |a: u32, b: u32| if a + 1 == b { Some(2.0) } else { None };
//! assert_eq!(weights.weight(1, 2), Ok(2.0));
//! assert!(weights.weight(2, 1).is_err());
//!
//! let heuristic = |a: u32, b: u32| (a as f64 - b as f64).abs();
//! assert_eq!(heuristic.estimate(1, 4), 3.0);
//! ```

use crate::{Cost, SearchError};
use std::fmt::Debug;
use std::hash::Hash;

mod node_id;
pub use node_id::*;

mod directed;
pub use directed::{DirectedGraph, UndirectedGraph};

mod weights;
pub use weights::{PlanarHeuristic, WeightMap, ZeroHeuristic};

/// Provides the adjacency of a Graph.
///
/// For undirected Graphs `parents` is expected to yield the same Nodes as `children`.
/// Implementations must keep the relation symmetric: if `b` is a child of `a`, then `a` is a
/// parent of `b`.
///
/// The Graph must not change while a search over it is running.
pub trait Graph: Sync {
    /// The identity of a Node. Two Nodes are the same Node iff they compare equal.
    type Node: Copy + Eq + Hash + Debug + Send + Sync;

    /// Returns `true` if `node` belongs to this Graph.
    fn contains(&self, node: Self::Node) -> bool;

    /// Writes all Nodes reachable from `node` over a single edge into `target`.
    ///
    /// `target` is cleared by the caller. Implementations should only push into it.
    fn children(&self, node: Self::Node, target: &mut Vec<Self::Node>);

    /// Writes all Nodes that have an edge leading to `node` into `target`.
    fn parents(&self, node: Self::Node, target: &mut Vec<Self::Node>);
}

/// Maps an edge `(tail, head)` to its non-negative weight.
pub trait WeightFunction<N>: Sync {
    /// Returns the weight of the edge from `tail` to `head`.
    ///
    /// Fails with [`SearchError::MissingEdgeWeight`] if no such edge was registered.
    fn weight(&self, tail: N, head: N) -> Result<Cost, SearchError>;
}

impl<N: Debug, F> WeightFunction<N> for F
where
    F: Fn(N, N) -> Option<Cost> + Sync,
    N: Copy,
{
    fn weight(&self, tail: N, head: N) -> Result<Cost, SearchError> {
        self(tail, head).ok_or_else(|| SearchError::missing_edge(tail, head))
    }
}

/// Gives a lower bound on the length of the shortest Path between two Nodes.
///
/// The A*-family assumes the estimate to be admissible (it never overestimates) and the
/// bidirectional variants additionally assume it to be consistent (it satisfies the triangle
/// inequality with respect to the edge weights). Neither property is checked at runtime.
pub trait HeuristicFunction<N>: Sync {
    /// Estimates the distance from `from` to `to`.
    fn estimate(&self, from: N, to: N) -> Cost;
}

impl<N, F> HeuristicFunction<N> for F
where
    F: Fn(N, N) -> Cost + Sync,
{
    fn estimate(&self, from: N, to: N) -> Cost {
        self(from, to)
    }
}
