//! Symbolic list protocol
//!
//! A list instance is a heap reference owning one element store entry per
//! index (`list<sort>` descriptor) and one length scalar. Shifts caused by
//! insert / remove are single declarative range copies, never per-element
//! loops, so they work against symbolic sizes and indices alike.

use crate::config::CollectionConfig;
use crate::errors::Result;
use crate::features::collections::domain::{clamp_non_negative, size_bounds, CollectionState};
use crate::features::expr::{Expr, Sort};
use crate::features::store::{Descriptor, PathConstraintSink, SymbolicStore};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SymbolicList {
    descriptor: Descriptor,
    config: CollectionConfig,
}

impl SymbolicList {
    pub fn new(element_sort: Sort, config: CollectionConfig) -> Self {
        Self {
            descriptor: Descriptor::list(element_sort),
            config,
        }
    }

    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    pub fn element_sort(&self) -> Sort {
        self.descriptor.sort
    }

    /// Allocate an empty list
    pub fn create<S, P>(&self, state: &mut CollectionState<S, P>) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        let list = state.store.allocate();
        state
            .store
            .write_length(self.descriptor, &list, Expr::size(0), Expr::TRUE)?;
        debug!("[SymbolicList] created {} ({})", list, self.descriptor);
        Ok(list)
    }

    /// Current length; input lengths are clamped at 0 when configured
    pub fn size<S, P>(&self, state: &CollectionState<S, P>, list: &Expr) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        let length = state.store.read_length(self.descriptor, list)?;
        if self.config.clamp_input_sizes && !list.is_concrete_ref() {
            return Ok(clamp_non_negative(length));
        }
        Ok(length)
    }

    pub fn get<S, P>(
        &self,
        state: &CollectionState<S, P>,
        list: &Expr,
        index: &Expr,
    ) -> Result<Expr>
    where
        S: SymbolicStore,
    {
        Ok(state.store.read(self.descriptor, list, index)?)
    }

    /// Overwrite the element at `index`; the length is unchanged
    pub fn set<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        list: &Expr,
        index: &Expr,
        value: Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        state
            .store
            .write(self.descriptor, list, index, value, Expr::TRUE)?;
        Ok(())
    }

    /// Append at the current end
    pub fn add<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        list: &Expr,
        value: Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        let size = self.size(state, list)?;
        state
            .store
            .write(self.descriptor, list, &size, value, Expr::TRUE)?;
        state.store.write_length(
            self.descriptor,
            list,
            Expr::add(size, Expr::size(1)),
            Expr::TRUE,
        )?;
        Ok(())
    }

    /// Shift `[index, size)` up by one, then store `value` at `index`
    pub fn insert<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        list: &Expr,
        index: &Expr,
        value: Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        let size = self.size(state, list)?;
        let shifted_from = Expr::add(index.clone(), Expr::size(1));
        debug!(
            "[SymbolicList] insert {}[{}]: shift {}..={} up",
            list, index, shifted_from, size
        );
        // new last index == old size
        state.store.copy_range(
            self.descriptor,
            list,
            list,
            index,
            &shifted_from,
            &size,
            Expr::TRUE,
        )?;
        state
            .store
            .write(self.descriptor, list, index, value, Expr::TRUE)?;
        state.store.write_length(
            self.descriptor,
            list,
            Expr::add(size, Expr::size(1)),
            Expr::TRUE,
        )?;
        Ok(())
    }

    /// Shift `(index, size)` down by one, dropping the element at `index`
    pub fn remove<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        list: &Expr,
        index: &Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        let size = self.size(state, list)?;
        let last_after_remove = Expr::sub(size.clone(), Expr::size(2));
        debug!(
            "[SymbolicList] remove {}[{}]: shift down to {}..={}",
            list, index, index, last_after_remove
        );
        state.store.copy_range(
            self.descriptor,
            list,
            list,
            &Expr::add(index.clone(), Expr::size(1)),
            index,
            &last_after_remove,
            Expr::TRUE,
        )?;
        state.store.write_length(
            self.descriptor,
            list,
            Expr::sub(size, Expr::size(1)),
            Expr::TRUE,
        )?;
        Ok(())
    }

    /// `dst[dst_from + i] := src[src_from + i]` for every `i` in `0..length`.
    ///
    /// Lengths of `src` and `dst` are not touched.
    pub fn copy_range<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        src: &Expr,
        dst: &Expr,
        src_from: &Expr,
        dst_from: &Expr,
        length: &Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
    {
        let dst_to = Expr::add(dst_from.clone(), Expr::sub(length.clone(), Expr::size(1)));
        state.store.copy_range(
            self.descriptor,
            src,
            dst,
            src_from,
            dst_from,
            &dst_to,
            Expr::TRUE,
        )?;
        Ok(())
    }

    /// Assert `0 <= size(list) <= max_input_size` on the current path
    pub fn ensure_size_correct<S, P>(
        &self,
        state: &mut CollectionState<S, P>,
        list: &Expr,
    ) -> Result<()>
    where
        S: SymbolicStore,
        P: PathConstraintSink,
    {
        let size = self.size(state, list)?;
        state
            .constraints
            .add_constraint(size_bounds(size, self.config.max_input_size));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup() -> (CollectionState, SymbolicList) {
        let config = CollectionConfig::default();
        (
            CollectionState::in_memory(&config),
            SymbolicList::new(Sort::Size, config),
        )
    }

    #[test]
    fn test_create_is_empty() {
        let (mut state, list) = setup();
        let l = list.create(&mut state).unwrap();
        assert_eq!(list.size(&state, &l).unwrap(), Expr::size(0));
    }

    #[test]
    fn test_add_then_get() {
        let (mut state, list) = setup();
        let l = list.create(&mut state).unwrap();
        list.add(&mut state, &l, Expr::size(10)).unwrap();
        list.add(&mut state, &l, Expr::size(20)).unwrap();

        assert_eq!(list.size(&state, &l).unwrap(), Expr::size(2));
        assert_eq!(list.get(&state, &l, &Expr::size(0)).unwrap(), Expr::size(10));
        assert_eq!(list.get(&state, &l, &Expr::size(1)).unwrap(), Expr::size(20));
    }

    #[test]
    fn test_insert_shifts_tail() {
        let (mut state, list) = setup();
        let l = list.create(&mut state).unwrap();
        for v in [1, 2, 3] {
            list.add(&mut state, &l, Expr::size(v)).unwrap();
        }
        list.insert(&mut state, &l, &Expr::size(1), Expr::size(9)).unwrap();

        let contents: Vec<Expr> = (0..4)
            .map(|i| list.get(&state, &l, &Expr::size(i)).unwrap())
            .collect();
        assert_eq!(
            contents,
            vec![Expr::size(1), Expr::size(9), Expr::size(2), Expr::size(3)]
        );
        assert_eq!(list.size(&state, &l).unwrap(), Expr::size(4));
    }

    #[test]
    fn test_remove_shifts_tail() {
        let (mut state, list) = setup();
        let l = list.create(&mut state).unwrap();
        for v in [1, 2, 3] {
            list.add(&mut state, &l, Expr::size(v)).unwrap();
        }
        list.remove(&mut state, &l, &Expr::size(0)).unwrap();

        assert_eq!(list.size(&state, &l).unwrap(), Expr::size(2));
        assert_eq!(list.get(&state, &l, &Expr::size(0)).unwrap(), Expr::size(2));
        assert_eq!(list.get(&state, &l, &Expr::size(1)).unwrap(), Expr::size(3));
    }

    #[test]
    fn test_clamping_applies_to_input_lists_only() {
        let config = CollectionConfig::default().clamp_input_sizes(true);
        let mut state = CollectionState::in_memory(&config);
        let list = SymbolicList::new(Sort::Size, config);

        let input = Expr::constant("l", Sort::Ref);
        let raw = Expr::input("list<size>", input.clone(), None, Sort::Size);
        assert_eq!(
            list.size(&state, &input).unwrap(),
            Expr::ite(Expr::ge(raw.clone(), Expr::size(0)), raw, Expr::size(0))
        );

        let allocated = list.create(&mut state).unwrap();
        assert_eq!(list.size(&state, &allocated).unwrap(), Expr::size(0));
    }
}
