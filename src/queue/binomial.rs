use super::PriorityQueue;
use crate::{Cost, QueueError};
use hashbrown::HashMap;
use slab::Slab;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct Node<E> {
    element: E,
    priority: Cost,
    parent: Option<usize>,
    /// `children[i]` is the root of a subtree of degree `i`
    children: Vec<usize>,
}

/// A Binomial Heap: a forest of binomial trees with at most one tree per degree.
///
/// `trees[k]` holds the root of the tree of degree `k`, if there is one. Adding an element
/// works like incrementing a binary counter. `decrease_priority` swaps the entry upwards through
/// its ancestors and keeps the element map in sync with every swap.
#[derive(Clone, Debug)]
pub struct BinomialHeap<E> {
    nodes: Slab<Node<E>>,
    trees: Vec<Option<usize>>,
    index: HashMap<E, usize>,
}

impl<E: Copy + Eq + Hash> BinomialHeap<E> {
    /// Creates an empty Heap
    pub fn new() -> BinomialHeap<E> {
        BinomialHeap {
            nodes: Slab::new(),
            trees: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The number of trees currently in the forest
    pub fn tree_count(&self) -> usize {
        self.trees.iter().flatten().count()
    }

    /// Links two roots of the same degree, returning the new root.
    fn link(&mut self, a: usize, b: usize) -> usize {
        let (root, child) = if self.nodes[b].priority < self.nodes[a].priority {
            (b, a)
        } else {
            (a, b)
        };
        self.nodes[child].parent = Some(root);
        self.nodes[root].children.push(child);
        root
    }

    fn insert_tree(&mut self, mut root: usize) {
        loop {
            let degree = self.nodes[root].children.len();
            if self.trees.len() <= degree {
                self.trees.resize(degree + 1, None);
            }
            match self.trees[degree].take() {
                None => {
                    self.trees[degree] = Some(root);
                    return;
                }
                Some(other) => root = self.link(root, other),
            }
        }
    }

    fn min_root(&self) -> Option<usize> {
        self.trees
            .iter()
            .flatten()
            .copied()
            .reduce(|a, b| {
                if self.nodes[b].priority < self.nodes[a].priority {
                    b
                } else {
                    a
                }
            })
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        let (ea, pa) = (self.nodes[a].element, self.nodes[a].priority);
        let (eb, pb) = (self.nodes[b].element, self.nodes[b].priority);
        self.nodes[a].element = eb;
        self.nodes[a].priority = pb;
        self.nodes[b].element = ea;
        self.nodes[b].priority = pa;
        self.index.insert(eb, a);
        self.index.insert(ea, b);
    }
}

impl<E: Copy + Eq + Hash> Default for BinomialHeap<E> {
    fn default() -> Self {
        BinomialHeap::new()
    }
}

impl<E: Copy + Eq + Hash> PriorityQueue<E> for BinomialHeap<E> {
    fn add(&mut self, element: E, priority: Cost) {
        if self.index.contains_key(&element) {
            return;
        }
        let id = self.nodes.insert(Node {
            element,
            priority,
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(element, id);
        self.insert_tree(id);
    }

    fn decrease_priority(&mut self, element: E, new_priority: Cost) {
        let Some(&id) = self.index.get(&element) else {
            return;
        };
        if new_priority >= self.nodes[id].priority {
            return;
        }
        self.nodes[id].priority = new_priority;

        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].priority <= self.nodes[current].priority {
                break;
            }
            self.swap_entries(current, parent);
            current = parent;
        }
    }

    fn extract_min(&mut self) -> Result<E, QueueError> {
        let root = self.min_root().ok_or(QueueError::Empty)?;
        let node = self.nodes.remove(root);
        self.trees[node.children.len()] = None;
        while self.trees.last() == Some(&None) {
            self.trees.pop();
        }
        self.index.remove(&node.element);

        for child in node.children {
            self.nodes[child].parent = None;
            self.insert_tree(child);
        }
        Ok(node.element)
    }

    fn min(&self) -> Result<E, QueueError> {
        self.min_root()
            .map(|id| self.nodes[id].element)
            .ok_or(QueueError::Empty)
    }

    fn min_priority(&self) -> Result<Cost, QueueError> {
        self.min_root()
            .map(|id| self.nodes[id].priority)
            .ok_or(QueueError::Empty)
    }

    fn priority(&self, element: &E) -> Option<Cost> {
        self.index.get(element).map(|&id| self.nodes[id].priority)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.trees.clear();
        self.index.clear();
    }

    fn spawn(&self) -> Self {
        BinomialHeap::new()
    }
}
