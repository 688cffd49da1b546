//! Symbolic object map protocol
//!
//! A map instance owns two parallel element stores over the same key space
//! (values under `map<sort>`, membership flags under `map_contains<sort>`)
//! and one length scalar, kept under the membership descriptor.
//!
//! Absence is never encoded in the value store: a missing key reads as the
//! sampled default value together with a `false` membership flag.

use crate::config::CollectionConfig;
use crate::errors::Result;
use crate::features::collections::domain::{clamp_non_negative, size_bounds, CollectionState};
use crate::features::expr::{Expr, Sort};
use crate::features::store::{Descriptor, PathConstraintSink, SymbolicStore};
use tracing::debug;

/// Prefix of the fresh size variable introduced by a merge
pub const MERGED_SIZE_PREFIX: &str = "merged_map_size";

#[derive(Debug, Clone)]
pub struct ObjectMap {
    values: Descriptor,
    contains: Descriptor,
    config: CollectionConfig,
}

impl ObjectMap {
    pub fn new(value_sort: Sort, config: CollectionConfig) -> Self {
        Self {
            values: Descriptor::map_value(value_sort),
            contains: Descriptor::map_contains(value_sort),
            config,
        }
    }

    pub fn value_descriptor(&self) -> Descriptor {
        self.values
    }

    pub fn contains_descriptor(&self) -> Descriptor {
        self.contains
    }

    /// Allocate an empty map
    pub fn create<S, P>(&self, state: &mut CollectionState<S, P>) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        let map = state.store.allocate();
        state
            .store
            .write_length(self.contains, &map, Expr::size(0), Expr::TRUE)?;
        debug!("[ObjectMap] created {} ({})", map, self.values);
        Ok(map)
    }

    /// Number of present keys; input sizes are clamped at 0 when configured
    pub fn size<S, P>(&self, state: &CollectionState<S, P>, map: &Expr) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        let length = state.store.read_length(self.contains, map)?;
        if self.config.clamp_input_sizes && !map.is_concrete_ref() {
            return Ok(clamp_non_negative(length));
        }
        Ok(length)
    }

    pub fn get<S, P>(&self, state: &CollectionState<S, P>, map: &Expr, key: &Expr) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        Ok(state.store.read(self.values, map, key)?)
    }

    pub fn contains<S, P>(
        &self,
        state: &CollectionState<S, P>,
        map: &Expr,
        key: &Expr,
    ) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        Ok(state.store.read(self.contains, map, key)?)
    }

    /// Store `value` under `key`; the size grows only if `key` was absent
    pub fn put<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        map: &Expr,
        key: &Expr,
        value: Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        let was_present = self.contains(state, map, key)?;
        let size = self.size(state, map)?;

        state.store.write(self.values, map, key, value, Expr::TRUE)?;
        state
            .store
            .write(self.contains, map, key, Expr::TRUE, Expr::TRUE)?;
        state.store.write_length(
            self.contains,
            map,
            Expr::add(size, Expr::size(1)),
            Expr::not(was_present),
        )?;
        Ok(())
    }

    /// Drop `key`; the size shrinks only if `key` was present
    pub fn remove<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        map: &Expr,
        key: &Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        let was_present = self.contains(state, map, key)?;
        let size = self.size(state, map)?;

        state
            .store
            .write(self.contains, map, key, Expr::FALSE, Expr::TRUE)?;
        state.store.write_length(
            self.contains,
            map,
            Expr::sub(size, Expr::size(1)),
            was_present,
        )?;
        Ok(())
    }

    /// Merge every entry of `src` into `dst`; `src` wins on shared keys.
    ///
    /// The merged size is a fresh variable `m` bounded from below by
    /// `max(|src|, |dst|)` and by `|src| + |dst|`; it is not computed exactly.
    pub fn merge_into<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        dst: &Expr,
        src: &Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
        P: PathConstraintSink,
    {
        let src_size = self.size(state, src)?;
        let dst_size = self.size(state, dst)?;

        // values first: their precedence flags must predate the flag merge
        state
            .store
            .merge_store(self.values, self.contains, src, dst, Expr::TRUE)?;
        state
            .store
            .merge_store(self.contains, self.contains, src, dst, Expr::TRUE)?;

        let merged = state.constraints.fresh_const(MERGED_SIZE_PREFIX, Sort::Size);
        state.constraints.add_constraint(Expr::ge(
            merged.clone(),
            Expr::max(src_size.clone(), dst_size.clone()),
        ));
        state
            .constraints
            .add_constraint(Expr::ge(merged.clone(), Expr::add(src_size, dst_size)));
        debug!("[ObjectMap] merged {} into {}, size := {}", src, dst, merged);

        state
            .store
            .write_length(self.contains, dst, merged, Expr::TRUE)?;
        Ok(())
    }

    /// Assert `0 <= size(map) <= max_input_size` on the current path
    pub fn ensure_size_correct<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        map: &Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
        P: PathConstraintSink,
    {
        let size = self.size(state, map)?;
        state
            .constraints
            .add_constraint(size_bounds(size, self.config.max_input_size));
        Ok(())
    }
}
