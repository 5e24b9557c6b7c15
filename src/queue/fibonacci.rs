use super::PriorityQueue;
use crate::{Cost, QueueError};
use hashbrown::HashMap;
use slab::Slab;
use std::hash::Hash;

const PHI: f64 = 1.618_033_988_749_895;

#[derive(Clone, Debug)]
struct Node<E> {
    element: E,
    priority: Cost,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
}

/// A Fibonacci Heap.
///
/// Roots and siblings form circular doubly linked lists. `add` and `decrease_priority` only
/// touch the root list. The trees are consolidated by degree during `extract_min`, and a node
/// that loses a second child is cut from its parent (cascading cut), which bounds the degree
/// of every node by `log_φ(n)`.
#[derive(Clone, Debug)]
pub struct FibonacciHeap<E> {
    nodes: Slab<Node<E>>,
    min: Option<usize>,
    index: HashMap<E, usize>,
}

impl<E: Copy + Eq + Hash> FibonacciHeap<E> {
    /// Creates an empty Heap
    pub fn new() -> FibonacciHeap<E> {
        FibonacciHeap {
            nodes: Slab::new(),
            min: None,
            index: HashMap::new(),
        }
    }

    /// Makes `id` a single-element circular list.
    fn isolate(&mut self, id: usize) {
        let node = &mut self.nodes[id];
        node.left = id;
        node.right = id;
    }

    /// Inserts the isolated `id` to the right of `anchor`.
    fn insert_after(&mut self, anchor: usize, id: usize) {
        let right = self.nodes[anchor].right;
        self.nodes[id].left = anchor;
        self.nodes[id].right = right;
        self.nodes[anchor].right = id;
        self.nodes[right].left = id;
    }

    /// Removes `id` from whatever circular list it is in.
    fn unlink(&mut self, id: usize) {
        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.isolate(id);
    }

    /// Adds the isolated root `id` to the root list and updates the minimum.
    fn add_root(&mut self, id: usize) {
        self.nodes[id].parent = None;
        match self.min {
            None => {
                self.isolate(id);
                self.min = Some(id);
            }
            Some(min) => {
                self.insert_after(min, id);
                if self.nodes[id].priority < self.nodes[min].priority {
                    self.min = Some(id);
                }
            }
        }
    }

    fn list(&self, start: usize) -> Vec<usize> {
        let mut result = vec![start];
        let mut current = self.nodes[start].right;
        while current != start {
            result.push(current);
            current = self.nodes[current].right;
        }
        result
    }

    /// Makes the root `child` a child of the root `parent`.
    fn link(&mut self, child: usize, parent: usize) {
        self.isolate(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[child].marked = false;
        match self.nodes[parent].child {
            None => self.nodes[parent].child = Some(child),
            Some(first) => self.insert_after(first, child),
        }
        self.nodes[parent].degree += 1;
    }

    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };
        let bound = ((self.nodes.len() as f64).ln() / PHI.ln()).floor() as usize + 2;
        let mut by_degree: Vec<Option<usize>> = vec![None; bound];

        for mut root in self.list(start) {
            let mut degree = self.nodes[root].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut other) = by_degree[degree].take() else {
                    break;
                };
                if self.nodes[other].priority < self.nodes[root].priority {
                    std::mem::swap(&mut root, &mut other);
                }
                self.link(other, root);
                degree += 1;
            }
            by_degree[degree] = Some(root);
        }

        self.min = None;
        for root in by_degree.into_iter().flatten() {
            self.isolate(root);
            self.add_root(root);
        }
    }

    fn cut(&mut self, id: usize, parent: usize) {
        if self.nodes[id].right == id {
            self.nodes[parent].child = None;
        } else {
            if self.nodes[parent].child == Some(id) {
                self.nodes[parent].child = Some(self.nodes[id].right);
            }
            self.unlink(id);
        }
        self.nodes[parent].degree -= 1;
        self.nodes[id].marked = false;
        self.add_root(id);
    }

    fn cascading_cut(&mut self, mut id: usize) {
        while let Some(parent) = self.nodes[id].parent {
            if !self.nodes[id].marked {
                self.nodes[id].marked = true;
                return;
            }
            self.cut(id, parent);
            id = parent;
        }
    }
}

impl<E: Copy + Eq + Hash> Default for FibonacciHeap<E> {
    fn default() -> Self {
        FibonacciHeap::new()
    }
}

impl<E: Copy + Eq + Hash> PriorityQueue<E> for FibonacciHeap<E> {
    fn add(&mut self, element: E, priority: Cost) {
        if self.index.contains_key(&element) {
            return;
        }
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node {
            element,
            priority,
            parent: None,
            child: None,
            left: id,
            right: id,
            degree: 0,
            marked: false,
        });
        self.index.insert(element, id);
        self.add_root(id);
    }

    fn decrease_priority(&mut self, element: E, new_priority: Cost) {
        let Some(&id) = self.index.get(&element) else {
            return;
        };
        if new_priority >= self.nodes[id].priority {
            return;
        }
        self.nodes[id].priority = new_priority;

        if let Some(parent) = self.nodes[id].parent {
            if new_priority < self.nodes[parent].priority {
                self.cut(id, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if new_priority < self.nodes[min].priority {
                self.min = Some(id);
            }
        }
    }

    fn extract_min(&mut self) -> Result<E, QueueError> {
        let min = self.min.ok_or(QueueError::Empty)?;

        if let Some(first) = self.nodes[min].child.take() {
            for child in self.list(first) {
                self.isolate(child);
                self.nodes[child].parent = None;
                self.insert_after(min, child);
            }
        }

        let next = self.nodes[min].right;
        self.unlink(min);
        let node = self.nodes.remove(min);
        self.index.remove(&node.element);

        if next == min {
            self.min = None;
        } else {
            self.min = Some(next);
            self.consolidate();
        }
        Ok(node.element)
    }

    fn min(&self) -> Result<E, QueueError> {
        self.min
            .map(|id| self.nodes[id].element)
            .ok_or(QueueError::Empty)
    }

    fn min_priority(&self) -> Result<Cost, QueueError> {
        self.min
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
        self.min = None;
        self.index.clear();
    }

    fn spawn(&self) -> Self {
        FibonacciHeap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut FibonacciHeap<u32>) -> Vec<u32> {
        std::iter::from_fn(|| heap.extract_min().ok()).collect()
    }

    #[test]
    fn extracts_in_order() {
        let mut heap = FibonacciHeap::new();
        for (element, priority) in [(1, 5.0), (2, 3.0), (3, 8.0), (4, 1.0)] {
            heap.add(element, priority);
        }
        assert_eq!(drain(&mut heap), vec![4, 2, 1, 3]);
    }

    #[test]
    fn cascading_cuts() {
        let mut heap = FibonacciHeap::new();
        for i in 0..32u32 {
            heap.add(i, i as Cost + 100.0);
        }
        // builds deep trees through consolidation
        assert_eq!(heap.extract_min(), Ok(0));

        // cut several children of the same parents, forcing marked ancestors to be cut
        for i in (8..32).rev() {
            heap.decrease_priority(i, 31.0 - i as Cost);
        }
        assert_eq!(heap.len(), 31);
        assert_eq!(heap.min(), Ok(31));

        let order = drain(&mut heap);
        let expected: Vec<u32> = (8..32).rev().chain(1..8).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn decrease_below_min() {
        let mut heap = FibonacciHeap::new();
        heap.add(1, 5.0);
        heap.add(2, 3.0);
        heap.add(3, 8.0);
        heap.add(4, 1.0);
        heap.decrease_priority(3, 0.0);
        heap.decrease_priority(1, 9.0);
        assert_eq!(heap.min_priority(), Ok(0.0));
        assert_eq!(drain(&mut heap), vec![3, 4, 2, 1]);
    }

    #[test]
    fn empty() {
        let mut heap = FibonacciHeap::<u32>::new();
        assert_eq!(heap.extract_min(), Err(QueueError::Empty));
        heap.add(9, 0.5);
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.min(), Err(QueueError::Empty));
    }
}
