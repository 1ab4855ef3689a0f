//! Tree Adapter
//!
//! A stateful façade over a [`tree_model::Forest`] that keeps the display
//! tree consistent under interactive edits and flattens it back into
//! records for persistence.
//!
//! # Core Concepts
//!
//! - **TreeAdapter**: Owns one forest snapshot and exposes every mutation
//! - **Requests**: `UpdateRequest` and `DropRequest` describe structural edits
//! - **AdapterError**: Raised for operations on keys the adapter does not know
//!
//! One adapter is built per tree widget and handed to the renderer. It is
//! driven synchronously from UI callbacks: every call runs to completion
//! and the type is not meant to be shared between threads without external
//! locking.
//!
//! # Example
//!
//! ```
//! use tree_adapter::prelude::*;
//!
//! let mut adapter = TreeAdapter::new(vec![
//!     FlatRecord::new("1", None, "Root"),
//!     FlatRecord::new("2", Some("1"), "Child"),
//! ]);
//!
//! adapter.set_checked("2", true)?;
//! assert_eq!(adapter.get_tree().get("1").unwrap().checked, CheckState::Checked);
//!
//! let records = adapter.to_list();
//! assert_eq!(records.len(), 2);
//! # Ok::<(), tree_adapter::AdapterError>(())
//! ```

mod adapter;
mod edit;
mod error;
mod request;
mod state;

pub use adapter::TreeAdapter;
pub use error::{AdapterError, Result};
pub use request::{DropOutcome, DropPosition, DropRejection, DropRequest, UpdateRequest};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        AdapterError, DropOutcome, DropPosition, DropRejection, DropRequest, TreeAdapter,
        UpdateRequest,
    };
    pub use tree_model::prelude::*;
}
