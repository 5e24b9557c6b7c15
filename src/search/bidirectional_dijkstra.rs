use super::frontier::{Direction, Frontier, Meeting};
use super::SearchContext;
use crate::graph::Graph;
use crate::queue::PriorityQueue;
use crate::{Path, SearchError};

/// Searches the shortest Path from `source` to `target` with two simultaneous Dijkstra
/// searches: one along children from `source`, one along parents from `target`.
///
/// Each step expands the Frontier whose OPEN has the smaller minimum. The search ends once the
/// two minima together are no less than the best Path found through a Node reached by both
/// Frontiers. Any heuristic in `ctx` is ignored.
///
/// ## Examples
/// ```
/// use graph_search::graph::{DirectedGraph, WeightMap};
/// use graph_search::search::{bidirectional_dijkstra, SearchContext};
///
/// let mut graph = DirectedGraph::with_nodes(5);
/// let mut weights = WeightMap::new();
/// for (a, b, w) in [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (0, 4, 1.0), (4, 3, 4.0)] {
///     graph.add_arc(a, b);
///     weights.insert(a, b, w).unwrap();
/// }
///
/// let ctx = SearchContext::new(&graph, &weights);
/// let path = bidirectional_dijkstra(&ctx, 0, 3).unwrap();
/// assert_eq!(path, vec![0, 1, 2, 3]);
/// assert_eq!(path.cost(), 3.0);
/// ```
pub fn bidirectional_dijkstra<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    ctx.check_endpoints(source, target)?;
    log::debug!("Bidirectional Dijkstra: searching {:?} -> {:?}", source, target);
    ctx.begin(source, target);

    if source == target {
        return Ok(ctx.done(Path::single(source)));
    }

    let mut forward = Frontier::new(Direction::Forward, source, target, None, ctx.spawn_queue());
    let mut backward = Frontier::new(Direction::Backward, target, source, None, ctx.spawn_queue());
    let mut best = Meeting::new();

    while !forward.open.is_empty() && !backward.open.is_empty() {
        let min_forward = forward.open.min_priority()?;
        let min_backward = backward.open.min_priority()?;
        if min_forward + min_backward >= best.length {
            break;
        }

        if min_forward <= min_backward {
            forward.step(ctx, &backward, &mut best)?;
        } else {
            backward.step(ctx, &forward, &mut best)?;
        }
    }

    log::debug!(
        "Bidirectional Dijkstra: path length {}, closed {} + {}",
        best.length,
        forward.closed.len(),
        backward.closed.len()
    );
    let path = best.into_path(&forward, &backward);
    Ok(ctx.done(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, WeightMap};
    use crate::search::{dijkstra, SearchStats};

    #[test]
    fn backward_search_uses_arc_orientation() {
        // 0 -> 1 is cheap, 1 -> 0 is not registered at all
        let mut graph = DirectedGraph::with_nodes(3);
        let mut weights = WeightMap::new();
        for (a, b, w) in [(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0)] {
            graph.add_arc(a, b);
            weights.insert(a, b, w).unwrap();
        }
        let ctx = SearchContext::new(&graph, &weights);

        let path = bidirectional_dijkstra(&ctx, 0, 2).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(path.cost(), 3.0);

        assert!(bidirectional_dijkstra(&ctx, 2, 0).unwrap().is_empty());
    }

    #[test]
    fn single_node_path() {
        let graph = DirectedGraph::with_nodes(1);
        let weights = WeightMap::new();
        let stats = SearchStats::new();
        let ctx = SearchContext::new(&graph, &weights).with_listener(&stats);

        let path = bidirectional_dijkstra(&ctx, 0, 0).unwrap();
        assert_eq!(path, vec![0]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(stats.searches(), 1);
    }

    #[test]
    fn agrees_with_dijkstra_on_a_ladder() {
        // two rails 0..8 and 8..16, connected by rungs of varying weight
        let mut graph = DirectedGraph::with_nodes(16);
        let mut weights = WeightMap::new();
        let mut connect = |a: u32, b: u32, w: f64| {
            graph.add_arc(a, b);
            graph.add_arc(b, a);
            weights.insert_symmetric(a, b, w).unwrap();
        };
        for i in 0..7 {
            connect(i, i + 1, 1.0 + (i % 3) as f64);
            connect(i + 8, i + 9, 2.0 - (i % 2) as f64);
        }
        for i in 0..8 {
            connect(i, i + 8, 0.5 + i as f64 * 0.25);
        }
        let ctx = SearchContext::new(&graph, &weights);

        for (source, target) in [(0, 15), (7, 8), (3, 12), (15, 0)] {
            let expected = dijkstra(&ctx, source, target).unwrap();
            let actual = bidirectional_dijkstra(&ctx, source, target).unwrap();
            assert!((expected.cost() - actual.cost()).abs() < 1e-9);
            assert_eq!(actual.source(), Some(&source));
            assert_eq!(actual.target(), Some(&target));
        }
    }
}
