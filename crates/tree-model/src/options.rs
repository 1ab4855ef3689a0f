//! Configuration options for building trees.
//!
//! `TreeOptions` controls how records are turned into nodes: how the
//! display title is derived and what initial expand state nodes get.

use std::fmt;
use std::sync::Arc;

use crate::FlatRecord;

/// Function deriving a node title from its record
pub type NameResolver<P> = Arc<dyn Fn(&FlatRecord<P>) -> String + Send + Sync>;

/// Options applied when records are converted into nodes.
pub struct TreeOptions<P = ()> {
    /// Custom title derivation. `None` uses `record.name`.
    pub name_resolver: Option<NameResolver<P>>,

    /// Initial `expanded` flag for newly created nodes.
    pub default_expanded: bool,
}

impl<P> Default for TreeOptions<P> {
    fn default() -> Self {
        Self {
            name_resolver: None,
            default_expanded: false,
        }
    }
}

impl<P> Clone for TreeOptions<P> {
    fn clone(&self) -> Self {
        Self {
            name_resolver: self.name_resolver.clone(),
            default_expanded: self.default_expanded,
        }
    }
}

impl<P> fmt::Debug for TreeOptions<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeOptions")
            .field("name_resolver", &self.name_resolver.as_ref().map(|_| "<fn>"))
            .field("default_expanded", &self.default_expanded)
            .finish()
    }
}

impl<P> TreeOptions<P> {
    /// Create new tree options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the function used to derive node titles.
    pub fn name_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&FlatRecord<P>) -> String + Send + Sync + 'static,
    {
        self.name_resolver = Some(Arc::new(resolver));
        self
    }

    /// Set whether new nodes start expanded.
    pub fn default_expanded(mut self, expanded: bool) -> Self {
        self.default_expanded = expanded;
        self
    }

    /// Derive the title for a record.
    pub fn resolve_title(&self, record: &FlatRecord<P>) -> String {
        match &self.name_resolver {
            Some(resolver) => resolver(record),
            None => record.name.clone(),
        }
    }
}
