use super::PriorityQueue;
use crate::{Cost, QueueError};
use hashbrown::HashMap;
use slab::Slab;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct Node<E> {
    element: E,
    priority: Cost,
    /// leftmost child
    child: Option<usize>,
    /// right sibling
    next: Option<usize>,
    /// left sibling, or the parent for a leftmost child
    prev: Option<usize>,
}

/// A Pairing Heap: a single heap-ordered multiway tree.
///
/// Children are kept in a sibling list whose nodes link back to their left sibling (or to the
/// parent, for the leftmost child), so any subtree can be detached in constant time.
/// `extract_min` merges the children of the root with the two-pass strategy: pairwise from left
/// to right, then accumulated from right to left.
#[derive(Clone, Debug)]
pub struct PairingHeap<E> {
    nodes: Slab<Node<E>>,
    root: Option<usize>,
    index: HashMap<E, usize>,
}

impl<E: Copy + Eq + Hash> PairingHeap<E> {
    /// Creates an empty Heap
    pub fn new() -> PairingHeap<E> {
        PairingHeap {
            nodes: Slab::new(),
            root: None,
            index: HashMap::new(),
        }
    }

    /// Melds two detached trees and returns the root of the result.
    fn meld(&mut self, a: usize, b: usize) -> usize {
        let (root, child) = if self.nodes[b].priority < self.nodes[a].priority {
            (b, a)
        } else {
            (a, b)
        };
        let first = self.nodes[root].child;
        if let Some(first) = first {
            self.nodes[first].prev = Some(child);
        }
        self.nodes[child].next = first;
        self.nodes[child].prev = Some(root);
        self.nodes[root].child = Some(child);
        root
    }

    fn meld_into_root(&mut self, id: usize) {
        self.root = Some(match self.root {
            None => id,
            Some(root) => self.meld(root, id),
        });
    }

    /// Cuts the subtree rooted at `id` out of its sibling list.
    fn detach(&mut self, id: usize) {
        let Some(prev) = self.nodes[id].prev.take() else {
            return;
        };
        let next = self.nodes[id].next.take();
        if self.nodes[prev].child == Some(id) {
            self.nodes[prev].child = next;
        } else {
            self.nodes[prev].next = next;
        }
        if let Some(next) = next {
            self.nodes[next].prev = Some(prev);
        }
    }

    fn merge_pairs(&mut self, first: Option<usize>) -> Option<usize> {
        let mut siblings = vec![];
        let mut current = first;
        while let Some(id) = current {
            current = self.nodes[id].next.take();
            self.nodes[id].prev = None;
            siblings.push(id);
        }

        let mut paired = Vec::with_capacity(siblings.len() / 2 + 1);
        let mut iter = siblings.into_iter();
        while let Some(a) = iter.next() {
            paired.push(match iter.next() {
                Some(b) => self.meld(a, b),
                None => a,
            });
        }

        let mut result = paired.pop()?;
        while let Some(tree) = paired.pop() {
            result = self.meld(tree, result);
        }
        Some(result)
    }
}

impl<E: Copy + Eq + Hash> Default for PairingHeap<E> {
    fn default() -> Self {
        PairingHeap::new()
    }
}

impl<E: Copy + Eq + Hash> PriorityQueue<E> for PairingHeap<E> {
    fn add(&mut self, element: E, priority: Cost) {
        if self.index.contains_key(&element) {
            return;
        }
        let id = self.nodes.insert(Node {
            element,
            priority,
            child: None,
            next: None,
            prev: None,
        });
        self.index.insert(element, id);
        self.meld_into_root(id);
    }

    fn decrease_priority(&mut self, element: E, new_priority: Cost) {
        let Some(&id) = self.index.get(&element) else {
            return;
        };
        if new_priority >= self.nodes[id].priority {
            return;
        }
        self.nodes[id].priority = new_priority;
        if self.root == Some(id) {
            return;
        }
        self.detach(id);
        self.meld_into_root(id);
    }

    fn extract_min(&mut self) -> Result<E, QueueError> {
        let root = self.root.ok_or(QueueError::Empty)?;
        let node = self.nodes.remove(root);
        self.index.remove(&node.element);
        self.root = self.merge_pairs(node.child);
        Ok(node.element)
    }

    fn min(&self) -> Result<E, QueueError> {
        self.root
            .map(|id| self.nodes[id].element)
            .ok_or(QueueError::Empty)
    }

    fn min_priority(&self) -> Result<Cost, QueueError> {
        self.root
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
        self.root = None;
        self.index.clear();
    }

    fn spawn(&self) -> Self {
        PairingHeap::new()
    }
}
