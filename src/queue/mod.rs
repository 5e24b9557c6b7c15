//! Minimum Priority Queues with a `decrease_priority` operation.
//!
//! All Finders are generic over the [`PriorityQueue`] they use for their OPEN lists. Every Queue
//! keeps a map from element to its internal slot, so decreasing the priority of an element
//! does not require a linear scan.
//!
//! | Queue               | add       | decrease_priority | extract_min        |
//! |---------------------|-----------|-------------------|--------------------|
//! | [`DaryHeap`]        | O(log n)  | O(log n)          | O(d log n)         |
//! | [`BinomialHeap`]    | O(log n)  | O(log n)          | O(log n)           |
//! | [`FibonacciHeap`]   | O(1)      | O(1) amortized    | O(log n) amortized |
//! | [`PairingHeap`]     | O(1)      | O(1) amortized    | O(log n) amortized |
//!
//! The linked heaps store their trees in an arena ([`slab::Slab`]) and address nodes by index.
//!
//! ## Examples
//! ```
//! use graph_search::queue::{PairingHeap, PriorityQueue};
//!
//! let mut queue = PairingHeap::new();
//! queue.add('A', 5.0);
//! queue.add('B', 3.0);
//! queue.add('C', 8.0);
//! queue.decrease_priority('C', 1.0);
//!
//! assert_eq!(queue.extract_min(), Ok('C'));
//! assert_eq!(queue.extract_min(), Ok('B'));
//! assert_eq!(queue.len(), 1);
//!
//! // a spawned Queue is empty, but of the same kind
//! let other = queue.spawn();
//! assert!(other.is_empty());
//! ```

use crate::{Cost, QueueError, SearchError};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

mod dary;
pub use dary::DaryHeap;

mod binomial;
pub use binomial::BinomialHeap;

mod fibonacci;
pub use fibonacci::FibonacciHeap;

mod pairing;
pub use pairing::PairingHeap;

/// The contract shared by all Queues.
///
/// Elements are identified by equality. An element is stored at most once: adding an element
/// that is already present does nothing (use [`decrease_priority`](Self::decrease_priority)
/// instead).
///
/// None of the implementations are meant to be shared between threads. Every search owns its
/// Queues exclusively.
pub trait PriorityQueue<E: Copy + Eq + Hash> {
    /// Inserts `element` with the given priority, unless it is already present.
    fn add(&mut self, element: E, priority: Cost);

    /// Lowers the priority of `element` to `new_priority`.
    ///
    /// Does nothing if `element` is not present or if `new_priority` is not lower than its
    /// current priority.
    fn decrease_priority(&mut self, element: E, new_priority: Cost);

    /// Removes and returns the element with the lowest priority.
    fn extract_min(&mut self) -> Result<E, QueueError>;

    /// Returns the element with the lowest priority without removing it.
    fn min(&self) -> Result<E, QueueError>;

    /// Returns the lowest priority in the Queue.
    fn min_priority(&self) -> Result<Cost, QueueError>;

    /// Returns the current priority of `element`, if it is present.
    fn priority(&self, element: &E) -> Option<Cost>;

    /// Returns `true` if `element` is present.
    fn contains(&self, element: &E) -> bool {
        self.priority(element).is_some()
    }

    /// The number of elements in the Queue
    fn len(&self) -> usize;

    /// Returns `true` if the Queue holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements.
    fn clear(&mut self);

    /// Creates a new, empty Queue of the same kind and configuration as `self`.
    ///
    /// The Finders call this on the Queue they were configured with to obtain their OPEN lists.
    fn spawn(&self) -> Self
    where
        Self: Sized;
}

/// Selects one of the Queue implementations at runtime.
///
/// Parses from and formats to `"dary"`, `"dary:<degree>"`, `"binomial"`, `"fibonacci"` and
/// `"pairing"`.
/// ```
/// use graph_search::queue::{PriorityQueue, QueueKind};
///
/// let kind: QueueKind = "dary:4".parse().unwrap();
/// assert_eq!(kind, QueueKind::Dary(4));
/// assert_eq!(kind.to_string(), "dary:4");
///
/// let mut queue = kind.build::<u32>().unwrap();
/// queue.add(1, 1.0);
/// assert_eq!(queue.min(), Ok(1));
///
/// assert!("dary:1".parse::<QueueKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueKind {
    /// A [`DaryHeap`] with the given degree
    Dary(usize),
    /// A [`BinomialHeap`]
    Binomial,
    /// A [`FibonacciHeap`]
    Fibonacci,
    /// A [`PairingHeap`]
    Pairing,
}

impl QueueKind {
    /// All kinds, with the d-ary Heap in its default (binary) configuration
    pub const ALL: [QueueKind; 4] = [
        QueueKind::Dary(DaryHeap::<u8>::DEFAULT_DEGREE),
        QueueKind::Binomial,
        QueueKind::Fibonacci,
        QueueKind::Pairing,
    ];

    /// Creates an empty Queue of this kind.
    ///
    /// Fails if the degree of a d-ary Heap is less than 2.
    pub fn build<E: Copy + Eq + Hash>(self) -> Result<AnyQueue<E>, SearchError> {
        Ok(match self {
            QueueKind::Dary(degree) => AnyQueue::Dary(DaryHeap::with_degree(degree)?),
            QueueKind::Binomial => AnyQueue::Binomial(BinomialHeap::new()),
            QueueKind::Fibonacci => AnyQueue::Fibonacci(FibonacciHeap::new()),
            QueueKind::Pairing => AnyQueue::Pairing(PairingHeap::new()),
        })
    }
}

impl Default for QueueKind {
    fn default() -> QueueKind {
        QueueKind::Dary(DaryHeap::<u8>::DEFAULT_DEGREE)
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueueKind::Dary(degree) => write!(fmt, "dary:{}", degree),
            QueueKind::Binomial => write!(fmt, "binomial"),
            QueueKind::Fibonacci => write!(fmt, "fibonacci"),
            QueueKind::Pairing => write!(fmt, "pairing"),
        }
    }
}

impl FromStr for QueueKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<QueueKind, SearchError> {
        let s = s.trim().to_ascii_lowercase();
        let kind = match s.split_once(':') {
            Some(("dary", degree)) => {
                let degree = degree
                    .parse()
                    .map_err(|_| SearchError::invalid(format!("invalid d-ary degree {:?}", degree)))?;
                QueueKind::Dary(degree)
            }
            None if s == "dary" => QueueKind::default(),
            None if s == "binomial" => QueueKind::Binomial,
            None if s == "fibonacci" => QueueKind::Fibonacci,
            None if s == "pairing" => QueueKind::Pairing,
            _ => return Err(SearchError::invalid(format!("unknown queue kind {:?}", s))),
        };
        if let QueueKind::Dary(degree) = kind {
            DaryHeap::<u8>::check_degree(degree)?;
        }
        Ok(kind)
    }
}

/// One of the four Queues, chosen at runtime through [`QueueKind`].
#[derive(Clone, Debug)]
pub enum AnyQueue<E> {
    #[allow(missing_docs)]
    Dary(DaryHeap<E>),
    #[allow(missing_docs)]
    Binomial(BinomialHeap<E>),
    #[allow(missing_docs)]
    Fibonacci(FibonacciHeap<E>),
    #[allow(missing_docs)]
    Pairing(PairingHeap<E>),
}

impl<E> AnyQueue<E> {
    /// The kind (and configuration) of this Queue
    pub fn kind(&self) -> QueueKind {
        match self {
            AnyQueue::Dary(heap) => QueueKind::Dary(heap.degree()),
            AnyQueue::Binomial(_) => QueueKind::Binomial,
            AnyQueue::Fibonacci(_) => QueueKind::Fibonacci,
            AnyQueue::Pairing(_) => QueueKind::Pairing,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $queue:ident => $body:expr) => {
        match $self {
            AnyQueue::Dary($queue) => $body,
            AnyQueue::Binomial($queue) => $body,
            AnyQueue::Fibonacci($queue) => $body,
            AnyQueue::Pairing($queue) => $body,
        }
    };
}

impl<E: Copy + Eq + Hash> PriorityQueue<E> for AnyQueue<E> {
    fn add(&mut self, element: E, priority: Cost) {
        dispatch!(self, q => q.add(element, priority))
    }
    fn decrease_priority(&mut self, element: E, new_priority: Cost) {
        dispatch!(self, q => q.decrease_priority(element, new_priority))
    }
    fn extract_min(&mut self) -> Result<E, QueueError> {
        dispatch!(self, q => q.extract_min())
    }
    fn min(&self) -> Result<E, QueueError> {
        dispatch!(self, q => q.min())
    }
    fn min_priority(&self) -> Result<Cost, QueueError> {
        dispatch!(self, q => q.min_priority())
    }
    fn priority(&self, element: &E) -> Option<Cost> {
        dispatch!(self, q => q.priority(element))
    }
    fn len(&self) -> usize {
        dispatch!(self, q => q.len())
    }
    fn clear(&mut self) {
        dispatch!(self, q => q.clear())
    }
    fn spawn(&self) -> Self {
        match self {
            AnyQueue::Dary(q) => AnyQueue::Dary(q.spawn()),
            AnyQueue::Binomial(q) => AnyQueue::Binomial(q.spawn()),
            AnyQueue::Fibonacci(q) => AnyQueue::Fibonacci(q.spawn()),
            AnyQueue::Pairing(q) => AnyQueue::Pairing(q.spawn()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kinds() {
        assert_eq!("dary".parse::<QueueKind>(), Ok(QueueKind::Dary(2)));
        assert_eq!(" Fibonacci ".parse::<QueueKind>(), Ok(QueueKind::Fibonacci));
        assert_eq!("pairing".parse::<QueueKind>(), Ok(QueueKind::Pairing));
        assert!("dary:x".parse::<QueueKind>().is_err());
        assert!("splay".parse::<QueueKind>().is_err());

        for kind in QueueKind::ALL {
            assert_eq!(kind.to_string().parse::<QueueKind>(), Ok(kind));
        }
    }

    #[test]
    fn any_queue_keeps_kind_when_spawning() {
        for kind in [QueueKind::Dary(5), QueueKind::Binomial, QueueKind::Pairing] {
            let mut queue = kind.build::<u32>().unwrap();
            queue.add(3, 3.0);
            queue.add(1, 1.0);
            let spawned = queue.spawn();
            assert_eq!(spawned.kind(), kind);
            assert!(spawned.is_empty());
            assert_eq!(queue.extract_min(), Ok(1));
            assert_eq!(queue.len(), 1);
        }
    }
}
