//! The Path Finders.
//!
//! Every Finder is a freestanding function with the same signature:
//! ```ignore
//! fn finder(ctx: &SearchContext<G, Q>, source: G::Node, target: G::Node)
//!     -> Result<Path<G::Node>, SearchError>
//! ```
//! The [`SearchContext`] bundles everything a search reads: the Graph, the weights, an optional
//! heuristic, an optional [`SearchListener`] and the prototype Queue that OPEN lists are
//! [spawned](crate::queue::PriorityQueue::spawn) from. It holds no search state, so a single
//! context can serve any number of searches, even concurrently.
//!
//! | Finder                      | heuristic | direction     |
//! |-----------------------------|-----------|---------------|
//! | [`dijkstra`]                | no        | forward       |
//! | [`bidirectional_dijkstra`]  | no        | both          |
//! | [`a_star`]                  | yes       | forward       |
//! | [`bidirectional_a_star`]    | yes       | both          |
//! | [`nba_star`]                | yes       | both          |
//! | `parallel_nba_star`         | yes       | both, 2 threads |
//!
//! The bidirectional Finders walk the Graph backwards through [`Graph::parents`].
//!
//! ## Examples
//! ```
//! use graph_search::prelude::*;
//!
//! // 0 --1-- 1 --1-- 2
//! //  \             /
//! //   -----5------
//! let mut graph = UndirectedGraph::with_nodes(3);
//! let mut weights = WeightMap::new();
//! for (a, b, w) in [(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)] {
//!     graph.add_edge(a, b);
//!     weights.insert_symmetric(a, b, w).unwrap();
//! }
//!
//! let ctx = SearchContext::new(&graph, &weights)
//!     .with_heuristic(&ZeroHeuristic)
//!     .with_queue(PairingHeap::new());
//!
//! for algorithm in Algorithm::ALL {
//!     let path = algorithm.search(&ctx, 0, 2).unwrap();
//!     assert_eq!(path, vec![0, 1, 2]);
//!     assert_eq!(path.cost(), 2.0);
//! }
//! ```

use crate::graph::{Graph, HeuristicFunction, WeightFunction};
use crate::queue::{DaryHeap, PriorityQueue};
use crate::{Cost, Path, SearchError};
use std::fmt;
use std::str::FromStr;

mod listener;
pub use listener::{SearchListener, SearchStats};

mod frontier;

mod dijkstra;
pub use dijkstra::dijkstra;

mod a_star;
pub use a_star::a_star;

mod bidirectional_dijkstra;
pub use bidirectional_dijkstra::bidirectional_dijkstra;

mod bidirectional_a_star;
pub use bidirectional_a_star::bidirectional_a_star;

mod nba_star;
pub use nba_star::nba_star;

#[cfg(feature = "parallel")]
mod parallel_nba_star;
#[cfg(feature = "parallel")]
pub use parallel_nba_star::parallel_nba_star;

/// Everything a Finder needs besides the endpoints.
///
/// `Q` is the prototype Queue. Finders never insert into it; they call
/// [`spawn`](PriorityQueue::spawn) on it for every OPEN list they need.
pub struct SearchContext<'a, G: Graph, Q = DaryHeap<<G as Graph>::Node>> {
    graph: &'a G,
    weights: &'a dyn WeightFunction<G::Node>,
    heuristic: Option<&'a dyn HeuristicFunction<G::Node>>,
    listener: Option<&'a dyn SearchListener<G::Node>>,
    queue: Q,
}

impl<'a, G: Graph> SearchContext<'a, G> {
    /// Creates a context over `graph` and `weights`, using binary Heaps for the OPEN lists.
    pub fn new<W>(graph: &'a G, weights: &'a W) -> SearchContext<'a, G>
    where
        W: WeightFunction<G::Node>,
    {
        SearchContext {
            graph,
            weights,
            heuristic: None,
            listener: None,
            queue: DaryHeap::new(),
        }
    }
}

impl<'a, G: Graph, Q> SearchContext<'a, G, Q> {
    /// Sets the heuristic used by the A*-family.
    pub fn with_heuristic<H>(mut self, heuristic: &'a H) -> Self
    where
        H: HeuristicFunction<G::Node>,
    {
        self.heuristic = Some(heuristic);
        self
    }

    /// Sets a listener that is notified of every search.
    pub fn with_listener<L>(mut self, listener: &'a L) -> Self
    where
        L: SearchListener<G::Node>,
    {
        self.listener = Some(listener);
        self
    }

    /// Replaces the prototype Queue. Any elements in `queue` are ignored.
    pub fn with_queue<Q2>(self, queue: Q2) -> SearchContext<'a, G, Q2>
    where
        Q2: PriorityQueue<G::Node>,
    {
        SearchContext {
            graph: self.graph,
            weights: self.weights,
            heuristic: self.heuristic,
            listener: self.listener,
            queue,
        }
    }

    /// The Graph being searched
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// The weights of the Graph
    pub fn weights(&self) -> &'a dyn WeightFunction<G::Node> {
        self.weights
    }

    /// The heuristic, if one was set
    pub fn heuristic(&self) -> Option<&'a dyn HeuristicFunction<G::Node>> {
        self.heuristic
    }

    /// The prototype Queue
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub(crate) fn check_endpoints(
        &self,
        source: G::Node,
        target: G::Node,
    ) -> Result<(), SearchError> {
        for (name, node) in [("source", source), ("target", target)] {
            if !self.graph.contains(node) {
                return Err(SearchError::invalid(format!(
                    "the {} node {:?} is not part of the graph",
                    name, node
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn require_heuristic(
        &self,
        finder: &str,
    ) -> Result<&'a dyn HeuristicFunction<G::Node>, SearchError> {
        self.heuristic
            .ok_or_else(|| SearchError::invalid(format!("{} requires a heuristic function", finder)))
    }

    pub(crate) fn begin(&self, source: G::Node, target: G::Node) {
        if let Some(listener) = self.listener {
            listener.begin(source, target);
        }
    }

    pub(crate) fn reached(&self, node: G::Node) {
        if let Some(listener) = self.listener {
            listener.reached(node);
        }
    }

    pub(crate) fn closed(&self, node: G::Node) {
        if let Some(listener) = self.listener {
            listener.closed(node);
        }
    }

    /// Reports `path` to the listener and hands it back.
    pub(crate) fn done(&self, path: Path<G::Node>) -> Path<G::Node> {
        if let Some(listener) = self.listener {
            listener.done(path.nodes());
        }
        path
    }
}

impl<'a, G: Graph, Q: PriorityQueue<G::Node>> SearchContext<'a, G, Q> {
    pub(crate) fn spawn_queue(&self) -> Q {
        self.queue.spawn()
    }
}

impl<'a, G: Graph, Q: Clone> Clone for SearchContext<'a, G, Q> {
    fn clone(&self) -> Self {
        SearchContext {
            graph: self.graph,
            weights: self.weights,
            heuristic: self.heuristic,
            listener: self.listener,
            queue: self.queue.clone(),
        }
    }
}

impl<'a, G: Graph, Q: fmt::Debug> fmt::Debug for SearchContext<'a, G, Q> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("SearchContext")
            .field("has_heuristic", &self.heuristic.is_some())
            .field("has_listener", &self.listener.is_some())
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

/// Selects one of the Finders at runtime.
///
/// ```
/// use graph_search::search::Algorithm;
///
/// let algorithm: Algorithm = "nba*".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::NbaStar);
/// assert_eq!(algorithm.name(), "NBA*");
/// assert!(algorithm.needs_heuristic());
/// assert!(!Algorithm::Dijkstra.needs_heuristic());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// [`dijkstra`]
    Dijkstra,
    /// [`bidirectional_dijkstra`]
    BidirectionalDijkstra,
    /// [`a_star`]
    AStar,
    /// [`bidirectional_a_star`]
    BidirectionalAStar,
    /// [`nba_star`]
    NbaStar,
    /// `parallel_nba_star`
    #[cfg(feature = "parallel")]
    ParallelNbaStar,
}

impl Algorithm {
    /// All available Finders
    #[cfg(feature = "parallel")]
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Dijkstra,
        Algorithm::BidirectionalDijkstra,
        Algorithm::AStar,
        Algorithm::BidirectionalAStar,
        Algorithm::NbaStar,
        Algorithm::ParallelNbaStar,
    ];

    /// All available Finders
    #[cfg(not(feature = "parallel"))]
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dijkstra,
        Algorithm::BidirectionalDijkstra,
        Algorithm::AStar,
        Algorithm::BidirectionalAStar,
        Algorithm::NbaStar,
    ];

    /// A human readable name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's algorithm",
            Algorithm::BidirectionalDijkstra => "Bidirectional Dijkstra's algorithm",
            Algorithm::AStar => "A*",
            Algorithm::BidirectionalAStar => "Bidirectional A*",
            Algorithm::NbaStar => "NBA*",
            #[cfg(feature = "parallel")]
            Algorithm::ParallelNbaStar => "Parallel NBA*",
        }
    }

    /// Returns `true` if the Finder fails without a heuristic
    pub fn needs_heuristic(self) -> bool {
        !matches!(self, Algorithm::Dijkstra | Algorithm::BidirectionalDijkstra)
    }

    /// Runs the selected Finder.
    pub fn search<G, Q>(
        self,
        ctx: &SearchContext<G, Q>,
        source: G::Node,
        target: G::Node,
    ) -> Result<Path<G::Node>, SearchError>
    where
        G: Graph,
        Q: PriorityQueue<G::Node> + Send + Sync,
    {
        match self {
            Algorithm::Dijkstra => dijkstra(ctx, source, target),
            Algorithm::BidirectionalDijkstra => bidirectional_dijkstra(ctx, source, target),
            Algorithm::AStar => a_star(ctx, source, target),
            Algorithm::BidirectionalAStar => bidirectional_a_star(ctx, source, target),
            Algorithm::NbaStar => nba_star(ctx, source, target),
            #[cfg(feature = "parallel")]
            Algorithm::ParallelNbaStar => parallel_nba_star(ctx, source, target),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Algorithm, SearchError> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Ok(match key.as_str() {
            "dijkstra" | "dijkstra'salgorithm" => Algorithm::Dijkstra,
            "bidirectionaldijkstra" | "bidijkstra" | "bidirectionaldijkstra'salgorithm" => {
                Algorithm::BidirectionalDijkstra
            }
            "a*" | "astar" => Algorithm::AStar,
            "bidirectionala*" | "bidirectionalastar" | "bhpa" => Algorithm::BidirectionalAStar,
            "nba*" | "nbastar" => Algorithm::NbaStar,
            #[cfg(feature = "parallel")]
            "parallelnba*" | "parallelnbastar" | "pnba*" | "pnbastar" => Algorithm::ParallelNbaStar,
            _ => return Err(SearchError::invalid(format!("unknown algorithm {:?}", s))),
        })
    }
}

pub(crate) fn log_meeting<N: fmt::Debug>(node: N, length: Cost) {
    log::trace!("frontiers meet at {:?}, path length {}", node, length);
}
