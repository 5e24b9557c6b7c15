use super::PriorityQueue;
use crate::{Cost, QueueError, SearchError};
use hashbrown::HashMap;
use std::hash::Hash;

/// An implicit d-ary Heap stored in a single array.
///
/// The children of the slot `i` are the slots `d * i + 1 ..= d * i + d`. A larger degree makes
/// the Heap flatter, trading cheaper `add` and `decrease_priority` for a more expensive
/// `extract_min`.
///
/// ## Examples
/// ```
/// use graph_search::queue::{DaryHeap, PriorityQueue};
///
/// let mut heap = DaryHeap::with_degree(4).unwrap();
/// heap.add("far", 10.0);
/// heap.add("near", 2.0);
/// assert_eq!(heap.min(), Ok("near"));
///
/// heap.decrease_priority("far", 1.0);
/// assert_eq!(heap.extract_min(), Ok("far"));
/// assert_eq!(heap.spawn().degree(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct DaryHeap<E> {
    degree: usize,
    slots: Vec<(E, Cost)>,
    index: HashMap<E, usize>,
}

impl<E> DaryHeap<E> {
    /// The degree used by [`DaryHeap::new`]
    pub const DEFAULT_DEGREE: usize = 2;

    pub(crate) fn check_degree(degree: usize) -> Result<(), SearchError> {
        if degree < 2 {
            return Err(SearchError::invalid(format!(
                "the degree of a d-ary heap must be at least 2, got {}",
                degree
            )));
        }
        Ok(())
    }

    /// The number of children per slot
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl<E: Copy + Eq + Hash> DaryHeap<E> {
    /// Creates an empty binary Heap
    pub fn new() -> DaryHeap<E> {
        DaryHeap {
            degree: Self::DEFAULT_DEGREE,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates an empty Heap where every slot has up to `degree` children.
    ///
    /// Fails with [`SearchError::InvalidArgument`] if `degree < 2`.
    pub fn with_degree(degree: usize) -> Result<DaryHeap<E>, SearchError> {
        Self::check_degree(degree)?;
        Ok(DaryHeap {
            degree,
            ..DaryHeap::new()
        })
    }

    fn parent(&self, slot: usize) -> usize {
        (slot - 1) / self.degree
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.index.insert(self.slots[a].0, a);
        self.index.insert(self.slots[b].0, b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = self.parent(slot);
            if self.slots[slot].1 >= self.slots[parent].1 {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let first = self.degree * slot + 1;
            if first >= self.slots.len() {
                break;
            }
            let last = (first + self.degree).min(self.slots.len());
            let mut min_child = first;
            for child in first + 1..last {
                if self.slots[child].1 < self.slots[min_child].1 {
                    min_child = child;
                }
            }
            if self.slots[min_child].1 >= self.slots[slot].1 {
                break;
            }
            self.swap(slot, min_child);
            slot = min_child;
        }
    }
}

impl<E: Copy + Eq + Hash> Default for DaryHeap<E> {
    fn default() -> Self {
        DaryHeap::new()
    }
}

impl<E: Copy + Eq + Hash> PriorityQueue<E> for DaryHeap<E> {
    fn add(&mut self, element: E, priority: Cost) {
        if self.index.contains_key(&element) {
            return;
        }
        let slot = self.slots.len();
        self.slots.push((element, priority));
        self.index.insert(element, slot);
        self.sift_up(slot);
    }

    fn decrease_priority(&mut self, element: E, new_priority: Cost) {
        let Some(&slot) = self.index.get(&element) else {
            return;
        };
        if new_priority >= self.slots[slot].1 {
            return;
        }
        self.slots[slot].1 = new_priority;
        self.sift_up(slot);
    }

    fn extract_min(&mut self) -> Result<E, QueueError> {
        if self.slots.is_empty() {
            return Err(QueueError::Empty);
        }
        let (element, _) = self.slots.swap_remove(0);
        self.index.remove(&element);
        if let Some(&(moved, _)) = self.slots.first() {
            self.index.insert(moved, 0);
            self.sift_down(0);
        }
        Ok(element)
    }

    fn min(&self) -> Result<E, QueueError> {
        self.slots.first().map(|s| s.0).ok_or(QueueError::Empty)
    }

    fn min_priority(&self) -> Result<Cost, QueueError> {
        self.slots.first().map(|s| s.1).ok_or(QueueError::Empty)
    }

    fn priority(&self, element: &E) -> Option<Cost> {
        self.index.get(element).map(|&slot| self.slots[slot].1)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    fn spawn(&self) -> Self {
        DaryHeap {
            degree: self.degree,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }
}
