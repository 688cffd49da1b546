//! Store ports
//!
//! The collection protocols only ever talk to these two traits: the guarded
//! symbolic store holding per-instance data, and the sink accumulating path
//! constraints for the solver layer.

use crate::features::expr::{Expr, Sort};
use crate::features::store::domain::{Descriptor, StoreResult};

/// Guarded, descriptor-namespaced symbolic store
pub trait SymbolicStore {
    /// Fresh concrete instance reference (never `null`)
    fn allocate(&mut self) -> Expr;

    fn read(&self, descriptor: Descriptor, instance: &Expr, key: &Expr) -> StoreResult<Expr>;

    fn write(
        &mut self,
        descriptor: Descriptor,
        instance: &Expr,
        key: &Expr,
        value: Expr,
        guard: Expr,
    ) -> StoreResult<()>;

    /// Merge `src` into `dst`; per key, `src` wins where its flag under
    /// `contains` holds.
    fn merge_store(
        &mut self,
        descriptor: Descriptor,
        contains: Descriptor,
        src: &Expr,
        dst: &Expr,
        guard: Expr,
    ) -> StoreResult<()>;

    fn read_length(&self, descriptor: Descriptor, instance: &Expr) -> StoreResult<Expr>;

    fn write_length(
        &mut self,
        descriptor: Descriptor,
        instance: &Expr,
        size: Expr,
        guard: Expr,
    ) -> StoreResult<()>;

    /// Declarative bulk copy of the inclusive key range `from_dst..=to_dst`
    #[allow(clippy::too_many_arguments)]
    fn copy_range(
        &mut self,
        descriptor: Descriptor,
        src: &Expr,
        dst: &Expr,
        from_src: &Expr,
        from_dst: &Expr,
        to_dst: &Expr,
        guard: Expr,
    ) -> StoreResult<()>;
}

/// Path constraint accumulation
pub trait PathConstraintSink {
    fn add_constraint(&mut self, constraint: Expr);

    /// Fresh free constant, unique across forks of this sink
    fn fresh_const(&mut self, prefix: &str, sort: Sort) -> Expr;
}
