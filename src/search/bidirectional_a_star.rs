use super::frontier::{Direction, Frontier, Meeting};
use super::SearchContext;
use crate::graph::Graph;
use crate::queue::PriorityQueue;
use crate::{Path, SearchError};

/// Searches the shortest Path from `source` to `target` with two A* searches running toward
/// each other (BHPA).
///
/// The forward Frontier estimates toward `target`, the backward Frontier toward `source`. The
/// Frontier that has seen fewer Nodes is expanded next. The search stops as soon as the best
/// Path found is no longer than the larger of the two Frontiers' lower bounds.
///
/// The heuristic must be consistent in both directions.
pub fn bidirectional_a_star<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    let heuristic = ctx.require_heuristic("Bidirectional A*")?;
    ctx.check_endpoints(source, target)?;
    log::debug!("Bidirectional A*: searching {:?} -> {:?}", source, target);
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
    let mut best = Meeting::new();

    while !forward.open.is_empty() && !backward.open.is_empty() {
        if best.touch.is_some() {
            let bound_forward = forward.open.min_priority()? - forward.estimate(target);
            let bound_backward = backward.open.min_priority()? - backward.estimate(source);
            if best.length <= bound_forward.max(bound_backward) {
                break;
            }
        }

        if forward.size() < backward.size() {
            forward.step(ctx, &backward, &mut best)?;
        } else {
            backward.step(ctx, &forward, &mut best)?;
        }
    }

    log::debug!(
        "Bidirectional A*: path length {}, closed {} + {}",
        best.length,
        forward.closed.len(),
        backward.closed.len()
    );
    let path = best.into_path(&forward, &backward);
    Ok(ctx.done(path))
}
