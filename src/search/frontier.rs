use super::{log_meeting, SearchContext};
use crate::graph::{Graph, HeuristicFunction, WeightFunction};
use crate::path::traceback_bidirectional;
use crate::queue::PriorityQueue;
use crate::{Cost, Path, SearchError};
use hashbrown::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// The direction in which a Frontier walks the Graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// From the source along children
    Forward,
    /// From the target along parents
    Backward,
}

impl Direction {
    pub fn neighbors<G: Graph>(self, graph: &G, node: G::Node, target: &mut Vec<G::Node>) {
        match self {
            Direction::Forward => graph.children(node, target),
            Direction::Backward => graph.parents(node, target),
        }
    }

    /// The weight of the edge between `current` and `next`, oriented along the Graph.
    pub fn weight<N>(
        self,
        weights: &dyn WeightFunction<N>,
        current: N,
        next: N,
    ) -> Result<Cost, SearchError> {
        match self {
            Direction::Forward => weights.weight(current, next),
            Direction::Backward => weights.weight(next, current),
        }
    }
}

/// The state of one search direction: OPEN, CLOSED, PARENTS and DISTANCE.
///
/// OPEN is keyed by `g + h(node, goal)`, or by `g` alone if the Frontier has no heuristic.
pub(crate) struct Frontier<'a, N, Q> {
    pub direction: Direction,
    pub goal: N,
    heuristic: Option<&'a dyn HeuristicFunction<N>>,
    pub open: Q,
    pub closed: HashSet<N>,
    pub parents: HashMap<N, N>,
    pub distance: HashMap<N, Cost>,
    buffer: Vec<N>,
}

impl<'a, N: Copy + Eq + Hash, Q: PriorityQueue<N>> Frontier<'a, N, Q> {
    pub fn new(
        direction: Direction,
        origin: N,
        goal: N,
        heuristic: Option<&'a dyn HeuristicFunction<N>>,
        mut open: Q,
    ) -> Self {
        let mut distance = HashMap::new();
        distance.insert(origin, 0.0);
        let priority = heuristic.map_or(0.0, |h| h.estimate(origin, goal));
        open.add(origin, priority);
        Frontier {
            direction,
            goal,
            heuristic,
            open,
            closed: HashSet::new(),
            parents: HashMap::new(),
            distance,
            buffer: Vec::new(),
        }
    }

    pub fn estimate(&self, node: N) -> Cost {
        self.heuristic.map_or(0.0, |h| h.estimate(node, self.goal))
    }

    pub fn g(&self, node: N) -> Option<Cost> {
        self.distance.get(&node).copied()
    }

    /// The number of Nodes this Frontier has seen
    pub fn size(&self) -> usize {
        self.open.len() + self.closed.len()
    }

    /// Relaxes every edge of `current` whose other end is not `skip`ped.
    ///
    /// `improved` is called with every Node whose distance went down, together with the new
    /// distance.
    pub fn expand<G, P>(
        &mut self,
        ctx: &SearchContext<G, P>,
        current: N,
        skip: impl Fn(&Self, N) -> bool,
        mut improved: impl FnMut(N, Cost),
    ) -> Result<(), SearchError>
    where
        G: Graph<Node = N>,
    {
        let base = self.g(current).unwrap_or(Cost::INFINITY);
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        self.direction.neighbors(ctx.graph(), current, &mut buffer);

        for &next in buffer.iter() {
            if skip(self, next) {
                continue;
            }
            let tentative = base + self.direction.weight(ctx.weights(), current, next)?;
            let known = self.g(next);
            if known.map_or(false, |g| g <= tentative) {
                continue;
            }
            self.distance.insert(next, tentative);
            self.parents.insert(next, current);
            let priority = tentative + self.estimate(next);
            if self.open.contains(&next) {
                self.open.decrease_priority(next, priority);
            } else {
                self.open.add(next, priority);
            }
            if known.is_none() {
                ctx.reached(next);
            }
            improved(next, tentative);
        }

        self.buffer = buffer;
        Ok(())
    }
}

impl<'a, N: Copy + Eq + Hash + Debug, Q: PriorityQueue<N>> Frontier<'a, N, Q> {
    /// Closes the best Node of OPEN and expands it, recording every Node where this Frontier
    /// meets `other`.
    ///
    /// Used by the bidirectional Finders that keep a CLOSED set per direction.
    pub fn step<G>(
        &mut self,
        ctx: &SearchContext<G, Q>,
        other: &Frontier<'a, N, Q>,
        best: &mut Meeting<N>,
    ) -> Result<(), SearchError>
    where
        G: Graph<Node = N>,
    {
        let current = self.open.extract_min()?;
        self.closed.insert(current);
        ctx.closed(current);

        self.expand(
            ctx,
            current,
            |this, next| this.closed.contains(&next),
            |next, g| {
                if let Some(other_g) = other.g(next) {
                    best.offer(next, g + other_g);
                }
            },
        )
    }
}

/// The best Path found so far by two Frontiers
#[derive(Clone, Debug)]
pub(crate) struct Meeting<N> {
    pub length: Cost,
    pub touch: Option<N>,
}

impl<N: Copy + Eq + Hash + Debug> Meeting<N> {
    pub fn new() -> Meeting<N> {
        Meeting {
            length: Cost::INFINITY,
            touch: None,
        }
    }

    /// Records a Path of `length` through `node` if it is shorter than the current best.
    pub fn offer(&mut self, node: N, length: Cost) {
        if length < self.length {
            log_meeting(node, length);
            self.length = length;
            self.touch = Some(node);
        }
    }

    /// Joins the two halves at the touch Node, or returns an empty Path if they never met.
    pub fn into_path<Q>(self, forward: &Frontier<N, Q>, backward: &Frontier<N, Q>) -> Path<N> {
        match self.touch {
            Some(touch) => Path::new(
                traceback_bidirectional(touch, &forward.parents, &backward.parents),
                self.length,
            ),
            None => Path::empty(),
        }
    }
}
