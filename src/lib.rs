#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to find shortest Paths on weighted Graphs, with interchangeable Priority Queues.
//!
//! ## Introduction
//! All Finders in this crate solve the same problem: given a Graph, a non-negative weight for
//! each of its edges and two Nodes, find the cheapest sequence of edges leading from the one
//! to the other. They differ in how much of the Graph they have to look at to be sure:
//! - [Dijkstra](search::dijkstra) grows a ball of known distances around the source until it
//!   contains the target.
//! - [Bidirectional Dijkstra](search::bidirectional_dijkstra) grows two balls, one around each
//!   end, until they meet.
//! - [A*](search::a_star) uses a heuristic (a lower bound on the remaining distance) to grow
//!   its ball toward the target.
//! - [Bidirectional A*](search::bidirectional_a_star), [NBA*](search::nba_star) and
//!   `parallel_nba_star` combine both ideas. The parallel variant runs its two halves on
//!   separate threads (feature `parallel`, enabled by default).
//!
//! Every Finder keeps its OPEN list in a [`PriorityQueue`](queue::PriorityQueue). Four
//! implementations are provided: a [d-ary heap](queue::DaryHeap) (the default), a
//! [binomial heap](queue::BinomialHeap), a [Fibonacci heap](queue::FibonacciHeap) and a
//! [pairing heap](queue::PairingHeap).
//!
//! Finders never see a concrete Graph type. They work on anything that implements
//! [`Graph`](graph::Graph), together with a [`WeightFunction`](graph::WeightFunction) and, for
//! the A*-family, a [`HeuristicFunction`](graph::HeuristicFunction). The crate ships a
//! [directed](graph::DirectedGraph) and an [undirected](graph::UndirectedGraph) Graph, a
//! [Grid](grid::GridGraph) and the [sliding tile puzzle](puzzle::SlidingPuzzle).
//!
//! ## Examples
//! Searching a Grid:
//! ```
//! use graph_search::prelude::*;
//!
//! // . # . .
//! // . # . .
//! // . . . .
//! let mut grid = GridGraph::new(4, 3, GridConfig::CARDINAL);
//! grid.set_wall((1, 0));
//! grid.set_wall((1, 1));
//!
//! let ctx = SearchContext::new(&grid, &GridWeights).with_heuristic(&Manhattan);
//!
//! let path = a_star(&ctx, (0, 0), (3, 0)).unwrap();
//! assert_eq!(path.cost(), 7.0);
//! assert_eq!(path.source(), Some(&(0, 0)));
//! assert_eq!(path.target(), Some(&(3, 0)));
//! ```
//!
//! An unreachable target is not an error, it results in an empty Path:
//! ```
//! # use graph_search::prelude::*;
//! let mut graph = DirectedGraph::with_nodes(2);
//! let mut weights = WeightMap::new();
//! graph.add_arc(0, 1);
//! weights.insert(0, 1, 1.0).unwrap();
//!
//! let ctx = SearchContext::new(&graph, &weights);
//! assert!(dijkstra(&ctx, 1, 0).unwrap().is_empty());
//!
//! // but a Node outside of the Graph is
//! assert!(dijkstra(&ctx, 0, 7).is_err());
//! ```
//!
//! ### Choosing at runtime
//! Both the Finder and the Queue can be picked by name, e.g. from a command line argument:
//! ```
//! # use graph_search::prelude::*;
//! let algorithm: Algorithm = "bidirectional dijkstra".parse().unwrap();
//! let kind: QueueKind = "dary:4".parse().unwrap();
//!
//! let mut graph = UndirectedGraph::with_nodes(3);
//! let mut weights = WeightMap::new();
//! graph.add_edge(0, 1);
//! graph.add_edge(1, 2);
//! weights.insert_symmetric(0, 1, 2.0).unwrap();
//! weights.insert_symmetric(1, 2, 3.0).unwrap();
//!
//! let ctx = SearchContext::new(&graph, &weights).with_queue(kind.build().unwrap());
//! let path = algorithm.search(&ctx, 2, 0).unwrap();
//! assert_eq!(path, vec![2, 1, 0]);
//! assert_eq!(path.cost(), 5.0);
//! ```
//!
//! ### Logging
//! The Finders report the start and the result of every search through the [`log`] facade at
//! `debug` level, and every improvement of a bidirectional meeting point at `trace` level. No
//! logger is installed by this crate.

mod error;
pub use error::{QueueError, SearchError};

mod path;
pub use path::{Cost, Path};

pub mod graph;
pub mod grid;
pub mod puzzle;
pub mod queue;
pub mod search;

/// The commonly used types and functions, for glob imports.
pub mod prelude {
    pub use crate::graph::{
        DirectedGraph, Graph, HeuristicFunction, NodeId, PlanarHeuristic, UndirectedGraph,
        WeightFunction, WeightMap, ZeroHeuristic,
    };
    pub use crate::grid::{
        Chebyshev, Euclidean, GridConfig, GridGraph, GridWeights, Manhattan, Octile, Point,
    };
    pub use crate::queue::{
        AnyQueue, BinomialHeap, DaryHeap, FibonacciHeap, PairingHeap, PriorityQueue, QueueKind,
    };
    #[cfg(feature = "parallel")]
    pub use crate::search::parallel_nba_star;
    pub use crate::search::{
        a_star, bidirectional_a_star, bidirectional_dijkstra, dijkstra, nba_star, Algorithm,
        SearchContext, SearchListener, SearchStats,
    };
    pub use crate::{Cost, Path, QueueError, SearchError};
}
