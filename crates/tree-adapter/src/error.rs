use thiserror::Error;

/// Errors returned by [`TreeAdapter`](crate::TreeAdapter) operations
///
/// Malformed records never produce an error; they are healed while the
/// tree is built. These variants indicate the host holding a stale key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The key does not name a node in the current tree
    #[error("unknown node key {0:?}")]
    UnknownKey(String),

    /// A replacement child would reuse a key that lives elsewhere in the tree
    #[error("key {0:?} already exists outside the replaced subtree")]
    DuplicateKey(String),
}

/// Result alias for adapter operations
pub type Result<T, E = AdapterError> = std::result::Result<T, E>;
