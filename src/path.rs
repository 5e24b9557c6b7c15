use crate::graph::WeightFunction;
use crate::SearchError;
use hashbrown::HashMap;
use std::hash::Hash;

/// The Type used to represent the weight of an edge or the length of a Path
pub type Cost = f64;

/// A Path found by one of the Finders
///
/// Stores the sequence of Nodes from the source to the target (both inclusive) and the total
/// Cost of walking along them. A Path without Nodes means that the target is not reachable;
/// its Cost is infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<N> {
    nodes: Vec<N>,
    cost: Cost,
}

impl<N> Path<N> {
    /// creates a new Path with the given sequence of Nodes and total Cost
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use graph_search::Path;
    /// let path = Path::new(vec!['a', 'b', 'c'], 4.5);
    ///
    /// assert_eq!(path.nodes(), &['a', 'b', 'c']);
    /// assert_eq!(path.cost(), 4.5);
    /// ```
    pub fn new(nodes: Vec<N>, cost: Cost) -> Path<N> {
        Path { nodes, cost }
    }

    /// The Path to an unreachable target
    /// ```
    /// # use graph_search::Path;
    /// let path = Path::<u32>::empty();
    ///
    /// assert!(path.is_empty());
    /// assert!(path.cost().is_infinite());
    /// ```
    pub fn empty() -> Path<N> {
        Path {
            nodes: Vec::new(),
            cost: Cost::INFINITY,
        }
    }

    /// The Path from a Node to itself
    pub fn single(node: N) -> Path<N> {
        Path {
            nodes: vec![node],
            cost: 0.0,
        }
    }

    /// Creates a Path from `nodes`, summing up the weights of its consecutive edges.
    ///
    /// An empty sequence yields [`Path::empty`]. Fails if any edge has no registered weight.
    /// ## Examples
    /// ```
    /// # use graph_search::{graph::WeightMap, Path};
    /// let mut weights = WeightMap::new();
    /// weights.insert(0, 1, 1.5).unwrap();
    /// weights.insert(1, 2, 2.0).unwrap();
    ///
    /// let path = Path::measure(vec![0, 1, 2], &weights).unwrap();
    /// assert_eq!(path.cost(), 3.5);
    ///
    /// assert!(Path::measure(vec![2, 1], &weights).is_err());
    /// ```
    pub fn measure<W>(nodes: Vec<N>, weights: &W) -> Result<Path<N>, SearchError>
    where
        N: Copy,
        W: WeightFunction<N> + ?Sized,
    {
        if nodes.is_empty() {
            return Ok(Path::empty());
        }
        let mut cost = 0.0;
        for step in nodes.windows(2) {
            cost += weights.weight(step[0], step[1])?;
        }
        Ok(Path::new(nodes, cost))
    }

    /// The Nodes of the Path, starting with the source
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Consumes the Path, returning its Nodes
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// The total Cost of the Path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The number of Nodes in the Path
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the target was not reachable
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first Node of the Path
    pub fn source(&self) -> Option<&N> {
        self.nodes.first()
    }

    /// The last Node of the Path
    pub fn target(&self) -> Option<&N> {
        self.nodes.last()
    }
}

/// Walks `parents` back from `target` and returns the Nodes from the origin to `target`.
pub(crate) fn traceback<N: Copy + Eq + Hash>(target: N, parents: &HashMap<N, N>) -> Vec<N> {
    let mut steps = vec![target];
    let mut current = target;
    while let Some(&prev) = parents.get(&current) {
        steps.push(prev);
        current = prev;
    }
    steps.reverse();
    steps
}

/// Joins the Paths of a forward and a backward search at the Node where they meet.
///
/// `forward` leads back from `touch` to the source, `backward` leads on from `touch` to the target.
pub(crate) fn traceback_bidirectional<N: Copy + Eq + Hash>(
    touch: N,
    forward: &HashMap<N, N>,
    backward: &HashMap<N, N>,
) -> Vec<N> {
    let mut steps = traceback(touch, forward);
    let mut current = touch;
    while let Some(&next) = backward.get(&current) {
        steps.push(next);
        current = next;
    }
    steps
}

use std::ops::{Deref, Index};

impl<N> Index<usize> for Path<N> {
    type Output = N;
    fn index(&self, index: usize) -> &N {
        &self.nodes[index]
    }
}

impl<N> Deref for Path<N> {
    type Target = [N];
    fn deref(&self) -> &[N] {
        &self.nodes
    }
}

impl<N: PartialEq> PartialEq<Vec<N>> for Path<N> {
    fn eq(&self, rhs: &Vec<N>) -> bool {
        self.nodes == *rhs
    }
}

use std::cmp::Ordering;

impl<N: PartialEq> PartialOrd for Path<N> {
    fn partial_cmp(&self, other: &Path<N>) -> Option<Ordering> {
        self.cost.partial_cmp(&other.cost)
    }
}

use std::fmt;
impl<N: fmt::Display> fmt::Display for Path<N> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.nodes.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.nodes[0])?;
            for n in self.nodes.iter().skip(1) {
                write!(fmt, " -> {}", n)?;
            }
            Ok(())
        }
    }
}
