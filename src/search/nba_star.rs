use super::frontier::{Direction, Frontier, Meeting};
use super::SearchContext;
use crate::graph::Graph;
use crate::queue::PriorityQueue;
use crate::{Path, SearchError};
use hashbrown::HashSet;

/// Searches the shortest Path from `source` to `target` with NBA*, the New Bidirectional A*
/// of Pijls and Post.
///
/// Both Frontiers share one CLOSED set and keep a lower bound `F` on their OPEN list. A Node
/// taken out of OPEN is closed, and then rejected without expansion if either
/// - `g + h(node, goal) - h(goal, goal)` is at least the best Path length `L`, or
/// - `g + F_other - h(node, origin)` is at least `L`.
///
/// The Frontier with the smaller OPEN list moves next. The search ends when either OPEN list
/// runs empty.
///
/// The heuristic must be consistent in both directions.
///
/// ## Examples
/// ```
/// use graph_search::graph::{UndirectedGraph, WeightMap};
/// use graph_search::search::{nba_star, SearchContext};
///
/// // a ring of 6 Nodes, all edges weigh 1
/// let mut graph = UndirectedGraph::with_nodes(6);
/// let mut weights = WeightMap::new();
/// for i in 0..6 {
///     graph.add_edge(i, (i + 1) % 6);
///     weights.insert_symmetric(i, (i + 1) % 6, 1.0).unwrap();
/// }
/// let hops = |a: u32, b: u32| {
///     let d = (a as i32 - b as i32).unsigned_abs();
///     d.min(6 - d) as f64
/// };
///
/// let ctx = SearchContext::new(&graph, &weights).with_heuristic(&hops);
/// let path = nba_star(&ctx, 1, 5).unwrap();
/// assert_eq!(path, vec![1, 0, 5]);
/// assert_eq!(path.cost(), 2.0);
/// ```
pub fn nba_star<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    let heuristic = ctx.require_heuristic("NBA*")?;
    ctx.check_endpoints(source, target)?;
    log::debug!("NBA*: searching {:?} -> {:?}", source, target);
    ctx.begin(source, target);

    if source == target {
        return Ok(ctx.done(Path::single(source)));
    }

    let mut forward = Frontier::new(
        Direction::Forward,
        source,
        target,
        Some(heuristic),
        ctx.spawn_queue(),
    );
    let mut backward = Frontier::new(
        Direction::Backward,
        target,
        source,
        Some(heuristic),
        ctx.spawn_queue(),
    );
    let mut bound_forward = heuristic.estimate(source, target);
    let mut bound_backward = heuristic.estimate(target, source);

    let mut closed = HashSet::new();
    let mut best = Meeting::new();
    let mut rejected = 0usize;

    while !forward.open.is_empty() && !backward.open.is_empty() {
        let forward_turn = forward.open.len() < backward.open.len();
        let (this, other, other_bound) = if forward_turn {
            (&mut forward, &backward, bound_backward)
        } else {
            (&mut backward, &forward, bound_forward)
        };

        let current = this.open.extract_min()?;
        if closed.insert(current) {
            ctx.closed(current);
            let g = this.g(current).unwrap_or(f64::INFINITY);
            let reject = g + this.estimate(current) - this.estimate(this.goal) >= best.length
                || g + other_bound - other.estimate(current) >= best.length;

            if reject {
                rejected += 1;
            } else {
                this.expand(
                    ctx,
                    current,
                    |_, next| closed.contains(&next),
                    |next, g| {
                        if let Some(other_g) = other.g(next) {
                            best.offer(next, g + other_g);
                        }
                    },
                )?;
            }
        }

        if let Ok(min) = this.open.min_priority() {
            if forward_turn {
                bound_forward = min;
            } else {
                bound_backward = min;
            }
        }
    }

    log::debug!(
        "NBA*: path length {}, closed {}, rejected {}",
        best.length,
        closed.len(),
        rejected
    );
    let path = best.into_path(&forward, &backward);
    Ok(ctx.done(path))
}
