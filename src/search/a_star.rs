use super::dijkstra::best_first;
use super::SearchContext;
use crate::graph::Graph;
use crate::queue::PriorityQueue;
use crate::{Path, SearchError};

/// Searches the shortest Path from `source` to `target` using the
/// [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm).
///
/// OPEN is ordered by `g + h(node, target)`. The result is optimal as long as the heuristic is
/// admissible.
///
/// ## Examples
/// ```
/// use graph_search::grid::{GridConfig, GridGraph, GridWeights, Octile};
/// use graph_search::search::{a_star, SearchContext};
///
/// let mut grid = GridGraph::new(4, 3, GridConfig::default());
/// grid.set_wall((1, 0));
/// grid.set_wall((1, 1));
///
/// let ctx = SearchContext::new(&grid, &GridWeights).with_heuristic(&Octile);
/// let path = a_star(&ctx, (0, 0), (3, 0)).unwrap();
///
/// assert_eq!(path.source(), Some(&(0, 0)));
/// assert_eq!(path.target(), Some(&(3, 0)));
/// assert!((path.cost() - (1.0 + 3.0 * 2f64.sqrt())).abs() < 1e-9);
/// ```
///
/// ## Errors
/// [`SearchError::InvalidArgument`] if `ctx` has no heuristic or either endpoint is not in the
/// Graph, and [`SearchError::MissingEdgeWeight`] if an expanded edge has no weight.
pub fn a_star<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    let heuristic = ctx.require_heuristic("A*")?;
    ctx.check_endpoints(source, target)?;
    best_first(ctx, source, target, Some(heuristic), "A*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{UndirectedGraph, WeightMap};
    use crate::search::{dijkstra, SearchStats};

    /// a line of `n` Nodes at x = 0..n, with a detour Node far off the line
    fn line(n: u32) -> (UndirectedGraph, WeightMap<u32>) {
        let mut graph = UndirectedGraph::with_nodes(n as usize + 1);
        let mut weights = WeightMap::new();
        for i in 1..n {
            graph.add_edge(i - 1, i);
            weights.insert_symmetric(i - 1, i, 1.0).unwrap();
        }
        graph.add_edge(0, n);
        weights.insert_symmetric(0, n, 1.0).unwrap();
        (graph, weights)
    }

    #[test]
    fn heuristic_prunes_the_detour() {
        let n = 10;
        let (graph, weights) = line(n);
        // the detour sits one unit behind the source
        let heuristic = |a: u32, b: u32| {
            let x = |node: u32| if node == n { -1.0 } else { node as f64 };
            (x(a) - x(b)).abs()
        };

        let stats = SearchStats::new();
        let ctx = SearchContext::new(&graph, &weights)
            .with_heuristic(&heuristic)
            .with_listener(&stats);

        let path = a_star(&ctx, 0, n - 1).unwrap();
        assert_eq!(path.cost(), (n - 1) as f64);
        let a_star_closed = stats.closed();

        stats.reset();
        let path = dijkstra(&ctx, 0, n - 1).unwrap();
        assert_eq!(path.cost(), (n - 1) as f64);
        assert!(a_star_closed < stats.closed());
    }

    #[test]
    fn needs_heuristic() {
        let (graph, weights) = line(3);
        let ctx = SearchContext::new(&graph, &weights);
        assert!(matches!(
            a_star(&ctx, 0, 2),
            Err(SearchError::InvalidArgument(_))
        ));
    }
}
