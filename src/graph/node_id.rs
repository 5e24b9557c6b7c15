//! A Module with some utilities for working with NodeIds

/// The Type used to reference a Node in a [`DirectedGraph`](super::DirectedGraph) or
/// [`UndirectedGraph`](super::UndirectedGraph)
pub type NodeId = u32;
use std::hash::{BuildHasherDefault, Hasher};

/// A specialized [`HashMap`](hashbrown::HashMap) for NodeIds with a faster Hasher
pub type NodeIdMap<V> = hashbrown::HashMap<NodeId, V, BuildHasherDefault<NodeIdHasher>>;
/// A specialized [`HashSet`](hashbrown::HashSet) for NodeIds with a faster Hasher
pub type NodeIdSet = hashbrown::HashSet<NodeId, BuildHasherDefault<NodeIdHasher>>;

/// A [`Hasher`] specialized on NodeIds
///
/// NodeIds are handed out sequentially, so the identity (spread by a multiplicative
/// constant) is already a good hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NodeIdHasher(u64);

impl Hasher for NodeIdHasher {
    /// panics, since only NodeIds are supposed to be used
    fn write(&mut self, _: &[u8]) {
        unreachable!("This Hasher only works with NodeIds")
    }
    /// Writes a single NodeId into this hasher.
    fn write_u32(&mut self, id: NodeId) {
        self.0 = (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
    fn finish(&self) -> u64 {
        self.0
    }
}
