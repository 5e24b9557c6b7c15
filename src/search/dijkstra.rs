use super::frontier::{Direction, Frontier};
use super::SearchContext;
use crate::graph::{Graph, HeuristicFunction};
use crate::path::traceback;
use crate::queue::PriorityQueue;
use crate::{Path, SearchError};

/// Searches the shortest Path from `source` to `target` using
/// [Dijkstra's Algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// The search stops as soon as `target` is taken out of OPEN, not when it is first reached.
/// Any heuristic in `ctx` is ignored.
///
/// ## Examples
/// ```
/// use graph_search::graph::{DirectedGraph, WeightMap};
/// use graph_search::search::{dijkstra, SearchContext};
///
/// // 0 --1--> 1 --1--> 2
/// //  \________3______/
/// let mut graph = DirectedGraph::with_nodes(4);
/// let mut weights = WeightMap::new();
/// for (a, b, w) in [(0, 1, 1.0), (1, 2, 1.0), (0, 2, 3.0)] {
///     graph.add_arc(a, b);
///     weights.insert(a, b, w).unwrap();
/// }
/// let ctx = SearchContext::new(&graph, &weights);
///
/// let path = dijkstra(&ctx, 0, 2).unwrap();
/// assert_eq!(path, vec![0, 1, 2]);
/// assert_eq!(path.cost(), 2.0);
///
/// // Node 3 has no incoming arcs
/// assert!(dijkstra(&ctx, 0, 3).unwrap().is_empty());
/// ```
///
/// ## Errors
/// [`SearchError::InvalidArgument`] if either endpoint is not in the Graph, and
/// [`SearchError::MissingEdgeWeight`] if an expanded edge has no weight.
pub fn dijkstra<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    ctx.check_endpoints(source, target)?;
    best_first(ctx, source, target, None, "Dijkstra")
}

/// The unidirectional search shared by Dijkstra and A*.
pub(super) fn best_first<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
    heuristic: Option<&dyn HeuristicFunction<G::Node>>,
    name: &str,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    log::debug!("{}: searching {:?} -> {:?}", name, source, target);
    ctx.begin(source, target);

    let mut frontier = Frontier::new(
        Direction::Forward,
        source,
        target,
        heuristic,
        ctx.spawn_queue(),
    );

    while !frontier.open.is_empty() {
        let current = frontier.open.extract_min()?;
        if current == target {
            let cost = frontier.g(target).unwrap_or(0.0);
            let path = Path::new(traceback(target, &frontier.parents), cost);
            log::debug!(
                "{}: found {} nodes with cost {} after closing {}",
                name,
                path.len(),
                cost,
                frontier.closed.len()
            );
            return Ok(ctx.done(path));
        }

        frontier.closed.insert(current);
        ctx.closed(current);

        frontier.expand(ctx, current, |f, next| f.closed.contains(&next), |_, _| {})?;
    }

    log::debug!(
        "{}: {:?} is unreachable, closed {}",
        name,
        target,
        frontier.closed.len()
    );
    Ok(ctx.done(Path::empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, WeightMap};
    use crate::queue::{BinomialHeap, FibonacciHeap};
    use crate::search::SearchStats;

    fn diamond() -> (DirectedGraph, WeightMap<u32>) {
        // 0 -> 1 -> 3 costs 2 + 2, 0 -> 2 -> 3 costs 1 + 2
        let mut graph = DirectedGraph::with_nodes(4);
        let mut weights = WeightMap::new();
        for (a, b, w) in [(0, 1, 2.0), (1, 3, 2.0), (0, 2, 1.0), (2, 3, 2.0)] {
            graph.add_arc(a, b);
            weights.insert(a, b, w).unwrap();
        }
        (graph, weights)
    }

    #[test]
    fn shortest_of_two_routes() {
        let (graph, weights) = diamond();
        let ctx = SearchContext::new(&graph, &weights).with_queue(FibonacciHeap::new());

        let path = dijkstra(&ctx, 0, 3).unwrap();
        assert_eq!(path, vec![0, 2, 3]);
        assert_eq!(path.cost(), 3.0);
    }

    #[test]
    fn source_is_target() {
        let (graph, weights) = diamond();
        let ctx = SearchContext::new(&graph, &weights);

        let path = dijkstra(&ctx, 2, 2).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn arcs_are_directed() {
        let (graph, weights) = diamond();
        let stats = SearchStats::new();
        let ctx = SearchContext::new(&graph, &weights)
            .with_queue(BinomialHeap::new())
            .with_listener(&stats);

        let path = dijkstra(&ctx, 3, 0).unwrap();
        assert!(path.is_empty());
        assert!(path.cost().is_infinite());
        assert_eq!(stats.searches(), 1);
        assert_eq!(stats.path_nodes(), 0);
    }

    #[test]
    fn missing_weight_aborts() {
        let (mut graph, weights) = diamond();
        let extra = graph.add_node();
        graph.add_arc(0, extra);

        let stats = SearchStats::new();
        let ctx = SearchContext::new(&graph, &weights).with_listener(&stats);
        assert!(matches!(
            dijkstra(&ctx, 0, 3),
            Err(SearchError::MissingEdgeWeight { .. })
        ));
        // a failed search is not reported as done
        assert_eq!(stats.searches(), 0);
    }
}
