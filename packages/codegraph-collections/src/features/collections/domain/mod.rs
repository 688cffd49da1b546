//! Collection domain: the execution-state slice the protocols thread through

use crate::config::CollectionConfig;
use crate::features::expr::Expr;
use crate::features::store::{MemoryStore, PathConstraints};

/// Store snapshot plus path constraints of one execution state.
///
/// Forking an execution state is a clone; the two branches can later be
/// rejoined with `ObjectMap::merge_into`.
#[derive(Debug, Clone, Default)]
pub struct CollectionState<S = MemoryStore, P = PathConstraints> {
    pub store: S,
    pub constraints: P,
}

impl<S, P> CollectionState<S, P> {
    pub fn new(store: S, constraints: P) -> Self {
        Self { store, constraints }
    }
}

impl CollectionState {
    /// Fresh state over the in-memory store
    pub fn in_memory(config: &CollectionConfig) -> Self {
        Self::new(MemoryStore::from_config(config), PathConstraints::new())
    }

    pub fn fork(&self) -> Self {
        self.clone()
    }
}

/// `ite(size >= 0, size, 0)`
pub(crate) fn clamp_non_negative(size: Expr) -> Expr {
    Expr::ite(
        Expr::ge(size.clone(), Expr::size(0)),
        size,
        Expr::size(0),
    )
}

/// `0 <= size <= max`
pub(crate) fn size_bounds(size: Expr, max: i64) -> Expr {
    Expr::and(
        Expr::ge(size.clone(), Expr::size(0)),
        Expr::le(size, Expr::size(max)),
    )
}
