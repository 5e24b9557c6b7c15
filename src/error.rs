//! Error types shared by the Queues and the Path Finders.

use thiserror::Error;

/// Errors raised by a [`PriorityQueue`](crate::queue::PriorityQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `extract_min` or `min` was called on a Queue without elements.
    #[error("reading from an empty priority queue")]
    Empty,
}

/// Errors that terminate a search.
///
/// Note that an unreachable target is **not** an error: every Finder returns an
/// [empty Path](crate::Path::empty) in that case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// A missing or malformed argument, detected before any search state is built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A Queue was read while empty. This indicates a logic error in the caller.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// The weight of an edge that was never registered was requested.
    #[error("no weight registered for the edge {tail} -> {head}")]
    MissingEdgeWeight {
        /// Debug rendering of the tail Node
        tail: String,
        /// Debug rendering of the head Node
        head: String,
    },
    /// A worker of a concurrent search did not run to completion.
    #[error("search worker failed: {0}")]
    WorkerFailed(String),
}

impl SearchError {
    pub(crate) fn invalid(message: impl Into<String>) -> SearchError {
        SearchError::InvalidArgument(message.into())
    }

    pub(crate) fn missing_edge<N: std::fmt::Debug>(tail: N, head: N) -> SearchError {
        SearchError::MissingEdgeWeight {
            tail: format!("{:?}", tail),
            head: format!("{:?}", head),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_error_converts() {
        let err: SearchError = QueueError::Empty.into();
        assert_eq!(err, SearchError::Queue(QueueError::Empty));
        assert_eq!(err.to_string(), "reading from an empty priority queue");
    }

    #[test]
    fn missing_edge_display() {
        let err = SearchError::missing_edge(3u32, 7u32);
        assert_eq!(err.to_string(), "no weight registered for the edge 3 -> 7");
    }
}
