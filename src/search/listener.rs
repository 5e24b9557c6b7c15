use std::sync::atomic::{AtomicUsize, Ordering};

/// Observes the progress of a search.
///
/// All methods have empty default implementations. The Finders call them synchronously from the
/// searching thread; the parallel Finder calls them from both of its workers, which is why
/// the trait requires `Sync`.
pub trait SearchListener<N>: Sync {
    /// Called once, before the first Node is expanded.
    fn begin(&self, _source: N, _target: N) {}

    /// Called when `node` is added to an OPEN list for the first time.
    fn reached(&self, _node: N) {}

    /// Called when `node` moves from OPEN to CLOSED.
    fn closed(&self, _node: N) {}

    /// Called exactly once when a search finishes without an error.
    ///
    /// `path` is empty if the target was unreachable.
    fn done(&self, _path: &[N]) {}
}

/// A [`SearchListener`] that counts events.
///
/// ## Examples
/// ```
/// use graph_search::graph::{DirectedGraph, WeightMap};
/// use graph_search::search::{dijkstra, SearchContext, SearchStats};
///
/// let mut graph = DirectedGraph::with_nodes(3);
/// let mut weights = WeightMap::new();
/// for (a, b) in [(0, 1), (1, 2)] {
///     graph.add_arc(a, b);
///     weights.insert(a, b, 1.0).unwrap();
/// }
///
/// let stats = SearchStats::new();
/// let ctx = SearchContext::new(&graph, &weights).with_listener(&stats);
/// dijkstra(&ctx, 0, 2).unwrap();
///
/// assert_eq!(stats.reached(), 2);
/// assert_eq!(stats.closed(), 2);
/// assert_eq!(stats.searches(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SearchStats {
    reached: AtomicUsize,
    closed: AtomicUsize,
    searches: AtomicUsize,
    path_nodes: AtomicUsize,
}

impl SearchStats {
    /// Creates a new SearchStats with all counters at zero
    pub fn new() -> SearchStats {
        SearchStats::default()
    }

    /// How many Nodes were added to an OPEN list
    pub fn reached(&self) -> usize {
        self.reached.load(Ordering::Relaxed)
    }

    /// How many Nodes were closed
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::Relaxed)
    }

    /// How many searches finished
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::Relaxed)
    }

    /// The total number of Nodes in all Paths returned so far
    pub fn path_nodes(&self) -> usize {
        self.path_nodes.load(Ordering::Relaxed)
    }

    /// Resets all counters to zero
    pub fn reset(&self) {
        self.reached.store(0, Ordering::Relaxed);
        self.closed.store(0, Ordering::Relaxed);
        self.searches.store(0, Ordering::Relaxed);
        self.path_nodes.store(0, Ordering::Relaxed);
    }
}

impl<N> SearchListener<N> for SearchStats {
    fn reached(&self, _: N) {
        self.reached.fetch_add(1, Ordering::Relaxed);
    }
    fn closed(&self, _: N) {
        self.closed.fetch_add(1, Ordering::Relaxed);
    }
    fn done(&self, path: &[N]) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.path_nodes.fetch_add(path.len(), Ordering::Relaxed);
    }
}
