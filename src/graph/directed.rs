use super::{Graph, NodeId, NodeIdSet};

#[derive(Clone, Debug, Default)]
struct Adjacency {
    children: Vec<NodeId>,
    parents: Vec<NodeId>,
    child_set: NodeIdSet,
}

/// A directed Graph whose Nodes are sequential [`NodeId`]s.
///
/// Arcs are stored on both ends: adding the arc `a -> b` makes `b` a child of `a` and `a` a
/// parent of `b`. Children and parents are enumerated in insertion order.
///
/// The Graph only stores the topology. Weights live in a separate
/// [`WeightFunction`](super::WeightFunction), usually a [`WeightMap`](super::WeightMap).
///
/// ## Examples
/// ```
/// use graph_search::graph::{DirectedGraph, Graph};
///
/// let mut graph = DirectedGraph::new();
/// let a = graph.add_node();
/// let b = graph.add_node();
/// graph.add_arc(a, b);
///
/// let mut parents = vec![];
/// graph.parents(b, &mut parents);
/// assert_eq!(parents, vec![a]);
/// assert!(!graph.has_arc(b, a));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DirectedGraph {
    nodes: Vec<Adjacency>,
    arcs: usize,
}

impl DirectedGraph {
    /// Creates an empty Graph.
    pub fn new() -> DirectedGraph {
        DirectedGraph::default()
    }

    /// Creates a Graph with `count` isolated Nodes, numbered `0..count`.
    pub fn with_nodes(count: usize) -> DirectedGraph {
        let mut graph = DirectedGraph::new();
        for _ in 0..count {
            graph.add_node();
        }
        graph
    }

    /// Adds a new isolated Node and returns its id.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Adjacency::default());
        id
    }

    /// Adds the arc `tail -> head`. Returns `false` if it already existed.
    ///
    /// ## Panics
    /// if either Node is not part of the Graph
    #[track_caller]
    pub fn add_arc(&mut self, tail: NodeId, head: NodeId) -> bool {
        assert!(self.contains(tail), "Invalid NodeId {}", tail);
        assert!(self.contains(head), "Invalid NodeId {}", head);
        let tail_node = &mut self.nodes[tail as usize];
        if !tail_node.child_set.insert(head) {
            return false;
        }
        tail_node.children.push(head);
        self.nodes[head as usize].parents.push(tail);
        self.arcs += 1;
        true
    }

    /// Returns `true` if the arc `tail -> head` exists.
    pub fn has_arc(&self, tail: NodeId, head: NodeId) -> bool {
        self.nodes
            .get(tail as usize)
            .map_or(false, |node| node.child_set.contains(&head))
    }

    /// Removes the arc `tail -> head`. Returns `false` if there was no such arc.
    pub fn remove_arc(&mut self, tail: NodeId, head: NodeId) -> bool {
        let Some(tail_node) = self.nodes.get_mut(tail as usize) else {
            return false;
        };
        if !tail_node.child_set.remove(&head) {
            return false;
        }
        tail_node.children.retain(|&id| id != head);
        self.nodes[head as usize].parents.retain(|&id| id != tail);
        self.arcs -= 1;
        true
    }

    /// Removes every arc incident on `node`, in both directions.
    pub fn clear_node(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        let children = std::mem::take(&mut self.nodes[node as usize].children);
        for child in children {
            self.remove_arc_unchecked(node, child);
        }
        let parents = std::mem::take(&mut self.nodes[node as usize].parents);
        for parent in parents {
            self.remove_arc_unchecked(parent, node);
        }
        self.nodes[node as usize].child_set.clear();
    }

    fn remove_arc_unchecked(&mut self, tail: NodeId, head: NodeId) {
        let tail_node = &mut self.nodes[tail as usize];
        tail_node.child_set.remove(&head);
        tail_node.children.retain(|&id| id != head);
        self.nodes[head as usize].parents.retain(|&id| id != tail);
        self.arcs -= 1;
    }

    /// The number of Nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of arcs
    pub fn arc_count(&self) -> usize {
        self.arcs
    }

    /// Iterates over all NodeIds
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.nodes.len() as NodeId
    }
}

impl Graph for DirectedGraph {
    type Node = NodeId;

    fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.nodes.len()
    }
    fn children(&self, node: NodeId, target: &mut Vec<NodeId>) {
        if let Some(adjacency) = self.nodes.get(node as usize) {
            target.extend_from_slice(&adjacency.children);
        }
    }
    fn parents(&self, node: NodeId, target: &mut Vec<NodeId>) {
        if let Some(adjacency) = self.nodes.get(node as usize) {
            target.extend_from_slice(&adjacency.parents);
        }
    }
}

/// An undirected Graph. Every edge can be walked both ways, so parents are children.
#[derive(Clone, Debug, Default)]
pub struct UndirectedGraph {
    inner: DirectedGraph,
}

impl UndirectedGraph {
    /// Creates an empty Graph.
    pub fn new() -> UndirectedGraph {
        UndirectedGraph::default()
    }

    /// Creates a Graph with `count` isolated Nodes, numbered `0..count`.
    pub fn with_nodes(count: usize) -> UndirectedGraph {
        UndirectedGraph {
            inner: DirectedGraph::with_nodes(count),
        }
    }

    /// Adds a new isolated Node and returns its id.
    pub fn add_node(&mut self) -> NodeId {
        self.inner.add_node()
    }

    /// Connects `a` and `b`. Returns `false` if they were already connected.
    ///
    /// ## Panics
    /// if either Node is not part of the Graph
    #[track_caller]
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let added = self.inner.add_arc(a, b);
        if a != b {
            self.inner.add_arc(b, a);
        }
        added
    }

    /// Returns `true` if `a` and `b` are connected.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.inner.has_arc(a, b)
    }

    /// Disconnects `a` and `b`. Returns `false` if they were not connected.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let removed = self.inner.remove_arc(a, b);
        self.inner.remove_arc(b, a);
        removed
    }

    /// Removes every edge incident on `node`.
    pub fn clear_node(&mut self, node: NodeId) {
        self.inner.clear_node(node)
    }

    /// The number of Nodes
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// The number of edges
    pub fn edge_count(&self) -> usize {
        let loops = self.inner.nodes().filter(|&id| self.has_edge(id, id)).count();
        (self.inner.arc_count() - loops) / 2 + loops
    }

    /// Iterates over all NodeIds
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        self.inner.nodes()
    }
}

impl Graph for UndirectedGraph {
    type Node = NodeId;

    fn contains(&self, node: NodeId) -> bool {
        self.inner.contains(node)
    }
    fn children(&self, node: NodeId, target: &mut Vec<NodeId>) {
        self.inner.children(node, target)
    }
    fn parents(&self, node: NodeId, target: &mut Vec<NodeId>) {
        self.inner.children(node, target)
    }
}
