use super::frontier::Direction;
use super::{log_meeting, SearchContext};
use crate::graph::{Graph, HeuristicFunction};
use crate::path::traceback_bidirectional;
use crate::queue::PriorityQueue;
use crate::{Cost, Path, SearchError};
use dashmap::{DashMap, DashSet};
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::any::Any;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

const FORWARD: usize = 0;
const BACKWARD: usize = 1;

/// An f64 that can be shared between threads, stored as its bit pattern.
#[derive(Debug)]
struct AtomicCost(AtomicU64);

impl AtomicCost {
    fn new(value: Cost) -> AtomicCost {
        AtomicCost(AtomicU64::new(value.to_bits()))
    }
    fn load(&self) -> Cost {
        f64::from_bits(self.0.load(Ordering::SeqCst))
    }
    fn store(&self, value: Cost) {
        self.0.store(value.to_bits(), Ordering::SeqCst)
    }
}

/// The best Path length and its touch Node.
///
/// Reading the length never blocks. Updates are serialized by the lock around the touch Node.
#[derive(Debug)]
struct MeetingPoint<N> {
    length: AtomicCost,
    touch: Mutex<Option<N>>,
}

impl<N: Copy + std::fmt::Debug> MeetingPoint<N> {
    fn read(&self) -> Cost {
        self.length.load()
    }

    fn offer(&self, node: N, length: Cost) {
        if length >= self.read() {
            return;
        }
        let mut touch = self.touch.lock();
        if length < self.read() {
            log_meeting(node, length);
            self.length.store(length);
            *touch = Some(node);
        }
    }
}

/// The state both workers read and write.
struct Shared<N: Eq + Hash> {
    closed: DashSet<N>,
    /// the best known distance of a Node from either side, indexed by `FORWARD` and `BACKWARD`
    distance: DashMap<N, [Cost; 2]>,
    /// the lower bound `F` of each side
    bounds: [AtomicCost; 2],
    best: MeetingPoint<N>,
    finished: AtomicBool,
}

impl<N: Copy + Eq + Hash> Shared<N> {
    fn g(&self, node: N, side: usize) -> Cost {
        self.distance
            .get(&node)
            .map_or(Cost::INFINITY, |entry| entry.value()[side])
    }
}

struct Worker<'c, G: Graph, Q> {
    ctx: &'c SearchContext<'c, G, Q>,
    shared: &'c Shared<G::Node>,
    heuristic: &'c dyn HeuristicFunction<G::Node>,
    side: usize,
    direction: Direction,
    origin: G::Node,
    goal: G::Node,
    open: Q,
    parents: HashMap<G::Node, G::Node>,
    buffer: Vec<G::Node>,
    expanded: usize,
}

impl<'c, G: Graph, Q: PriorityQueue<G::Node>> Worker<'c, G, Q> {
    fn run(mut self) -> Result<(HashMap<G::Node, G::Node>, usize), SearchError> {
        let other = 1 - self.side;
        let h = self.heuristic;

        self.open.add(self.origin, h.estimate(self.origin, self.goal));

        while !self.shared.finished.load(Ordering::SeqCst) {
            if self.open.is_empty() {
                break;
            }
            let current = self.open.extract_min()?;
            if self.shared.closed.contains(&current) {
                continue;
            }

            let g = self.shared.g(current, self.side);
            let length = self.shared.best.read();
            let estimate = g + h.estimate(current, self.goal) - h.estimate(self.goal, self.goal);
            let mixed = g + self.shared.bounds[other].load() - h.estimate(current, self.origin);

            if estimate < length && mixed < length {
                self.expand(current, g)?;
                self.shared.closed.insert(current);
                self.ctx.closed(current);
            }

            if let Ok(min) = self.open.min_priority() {
                self.shared.bounds[self.side].store(min);
            }
        }
        Ok((self.parents, self.expanded))
    }

    fn expand(&mut self, current: G::Node, g: Cost) -> Result<(), SearchError> {
        let other = 1 - self.side;
        self.expanded += 1;

        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        self.direction
            .neighbors(self.ctx.graph(), current, &mut buffer);

        for &next in buffer.iter() {
            if self.shared.closed.contains(&next) {
                continue;
            }
            let tentative = g + self.direction.weight(self.ctx.weights(), current, next)?;

            // write our side and read the other side under the same entry lock
            let (first, other_g) = {
                let mut entry = self
                    .shared
                    .distance
                    .entry(next)
                    .or_insert([Cost::INFINITY; 2]);
                let slot = entry.value_mut();
                let known = slot[self.side];
                if tentative >= known {
                    continue;
                }
                slot[self.side] = tentative;
                (known.is_infinite(), slot[other])
            };

            self.parents.insert(next, current);
            let priority = tentative + self.heuristic.estimate(next, self.goal);
            if self.open.contains(&next) {
                self.open.decrease_priority(next, priority);
            } else {
                self.open.add(next, priority);
            }
            if first {
                self.ctx.reached(next);
            }
            if other_g.is_finite() {
                self.shared.best.offer(next, tentative + other_g);
            }
        }

        self.buffer = buffer;
        Ok(())
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs `worker` to completion and stops the other worker afterwards, whatever the outcome.
fn supervise<G, Q>(worker: Worker<G, Q>) -> Result<(HashMap<G::Node, G::Node>, usize), SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node>,
{
    let shared = worker.shared;
    let name = match worker.direction {
        Direction::Forward => "forward",
        Direction::Backward => "backward",
    };
    let result = panic::catch_unwind(AssertUnwindSafe(|| worker.run()));
    shared.finished.store(true, Ordering::SeqCst);

    result.map_err(|payload| {
        let message = format!("{} worker panicked: {}", name, panic_message(payload));
        log::error!("Parallel NBA*: {}", message);
        SearchError::WorkerFailed(message)
    })?
}

/// Searches the shortest Path from `source` to `target` with NBA* split into two concurrent
/// workers.
///
/// The forward and backward searches run on two [`rayon`] tasks. Each worker owns its OPEN
/// list and its PARENTS map; they share the CLOSED set, the distances of both sides, each
/// other's lower bound `F` and the best Path found so far. A worker applies the same rejection
/// tests as [`nba_star`](super::nba_star), reading the other worker's bound without waiting for
/// it. Whichever worker runs out of OPEN Nodes first stops both.
///
/// The listener of `ctx` is called from both workers.
///
/// ## Examples
/// ```
/// use graph_search::grid::{Euclidean, GridConfig, GridGraph, GridWeights};
/// use graph_search::search::{dijkstra, parallel_nba_star, SearchContext};
///
/// let grid = GridGraph::new(20, 20, GridConfig::default());
/// let ctx = SearchContext::new(&grid, &GridWeights).with_heuristic(&Euclidean);
///
/// let path = parallel_nba_star(&ctx, (0, 0), (19, 12)).unwrap();
/// let expected = dijkstra(&ctx, (0, 0), (19, 12)).unwrap();
/// assert!((path.cost() - expected.cost()).abs() < 1e-9);
/// ```
///
/// ## Errors
/// Besides the errors of the sequential Finders, [`SearchError::WorkerFailed`] if a worker
/// panicked.
pub fn parallel_nba_star<G, Q>(
    ctx: &SearchContext<G, Q>,
    source: G::Node,
    target: G::Node,
) -> Result<Path<G::Node>, SearchError>
where
    G: Graph,
    Q: PriorityQueue<G::Node> + Send + Sync,
{
    let heuristic = ctx.require_heuristic("Parallel NBA*")?;
    ctx.check_endpoints(source, target)?;
    log::debug!("Parallel NBA*: searching {:?} -> {:?}", source, target);
    ctx.begin(source, target);

    if source == target {
        return Ok(ctx.done(Path::single(source)));
    }

    let distance = DashMap::new();
    distance.insert(source, [0.0, Cost::INFINITY]);
    distance.insert(target, [Cost::INFINITY, 0.0]);
    let shared = Shared {
        closed: DashSet::new(),
        distance,
        bounds: [
            AtomicCost::new(heuristic.estimate(source, target)),
            AtomicCost::new(heuristic.estimate(target, source)),
        ],
        best: MeetingPoint {
            length: AtomicCost::new(Cost::INFINITY),
            touch: Mutex::new(None),
        },
        finished: AtomicBool::new(false),
    };

    let worker = |side: usize, origin: G::Node, goal: G::Node, direction: Direction| Worker {
        ctx,
        shared: &shared,
        heuristic,
        side,
        direction,
        origin,
        goal,
        open: ctx.spawn_queue(),
        parents: HashMap::new(),
        buffer: Vec::new(),
        expanded: 0,
    };
    let forward = worker(FORWARD, source, target, Direction::Forward);
    let backward = worker(BACKWARD, target, source, Direction::Backward);

    let (forward, backward) = rayon::join(|| supervise(forward), || supervise(backward));
    let (forward_parents, forward_expanded) = forward?;
    let (backward_parents, backward_expanded) = backward?;

    let touch = *shared.best.touch.lock();
    log::debug!(
        "Parallel NBA*: path length {}, expanded {} + {}",
        shared.best.read(),
        forward_expanded,
        backward_expanded
    );

    let path = match touch {
        Some(touch) => Path::measure(
            traceback_bidirectional(touch, &forward_parents, &backward_parents),
            ctx.weights(),
        )?,
        None => Path::empty(),
    };
    Ok(ctx.done(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{UndirectedGraph, WeightMap};
    use crate::search::{bidirectional_dijkstra, SearchStats};

    fn ring(n: u32) -> (UndirectedGraph, WeightMap<u32>) {
        let mut graph = UndirectedGraph::with_nodes(n as usize);
        let mut weights = WeightMap::new();
        for i in 0..n {
            graph.add_edge(i, (i + 1) % n);
            weights.insert_symmetric(i, (i + 1) % n, 1.0).unwrap();
        }
        (graph, weights)
    }

    #[test]
    fn finds_the_short_way_around() {
        let (graph, weights) = ring(40);
        let hops = |a: u32, b: u32| {
            let d = (a as i32 - b as i32).unsigned_abs();
            d.min(40 - d) as f64
        };
        let ctx = SearchContext::new(&graph, &weights).with_heuristic(&hops);

        for (source, target) in [(0, 10), (3, 35), (20, 21), (0, 20)] {
            let expected = bidirectional_dijkstra(&ctx, source, target).unwrap();
            let path = parallel_nba_star(&ctx, source, target).unwrap();
            assert_eq!(path.cost(), expected.cost());
            assert_eq!(path.source(), Some(&source));
            assert_eq!(path.target(), Some(&target));
        }
    }

    #[test]
    fn unreachable_and_trivial() {
        let (mut graph, weights) = ring(8);
        let lonely = graph.add_node();
        let stats = SearchStats::new();
        let zero = |_: u32, _: u32| 0.0;
        let ctx = SearchContext::new(&graph, &weights)
            .with_heuristic(&zero)
            .with_listener(&stats);

        assert!(parallel_nba_star(&ctx, 0, lonely).unwrap().is_empty());
        assert_eq!(parallel_nba_star(&ctx, 5, 5).unwrap(), vec![5]);
        assert_eq!(stats.searches(), 2);
    }

    #[test]
    fn worker_panic_fails_the_search() {
        let (graph, _) = ring(6);
        let weights = |a: u32, b: u32| {
            if (a, b) == (2, 3) || (a, b) == (3, 2) {
                panic!("no weight for 2 <-> 3");
            }
            Some(1.0)
        };
        let stats = SearchStats::new();
        let zero = |_: u32, _: u32| 0.0;
        let ctx = SearchContext::new(&graph, &weights)
            .with_heuristic(&zero)
            .with_listener(&stats);

        let result = parallel_nba_star(&ctx, 2, 3);
        assert!(matches!(result, Err(SearchError::WorkerFailed(_))));
        assert_eq!(stats.searches(), 0);
    }
}
