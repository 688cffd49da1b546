//! In-memory guarded symbolic store
//!
//! Keeps one append-only update log per descriptor for element stores and one
//! per descriptor for length scalars. Reads walk the log newest first:
//! - entries whose key region is disjoint from the read are skipped
//! - an unconditional write at a provably equal key ends the walk
//! - everything else contributes one `ite` layer
//!
//! Instances the store never allocated (symbolic references) start out with
//! uninterpreted input readings; allocated instances start out with the
//! sampled default of the value sort.

use super::update_log::{LengthLog, UpdateLog};
use crate::config::CollectionConfig;
use crate::features::expr::{Expr, Sort};
use crate::features::key_info::{
    ArrayIndexKeyInfo, CompositeKeyInfo, HeapRefKeyInfo, IndexKeyInfo, KeyInfo, MapKeyInfo,
};
use crate::features::regions::Region;
use crate::features::store::domain::{
    CollectionKind, Descriptor, LengthWrite, StoreError, StoreResult, UpdateNode,
};
use crate::features::store::ports::SymbolicStore;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// First address handed out; 0 is `null`
const FIRST_ADDRESS: u64 = 1;

/// Resolved slots of one read, keyed by `(descriptor, instance, key, version)`
type ReadCache = FxHashMap<(Descriptor, Expr, Expr, usize), Expr>;

/// Contribution of one update node to a read
enum Step {
    /// The node cannot touch the read slot
    Skip,
    /// The node definitely determines the read slot
    Value(Expr),
    /// `ite(cond, value, older)`
    Layer(Expr, Expr),
}

impl Step {
    /// Classify a node by its applicability condition; `value` is only
    /// resolved when the condition is not folded to `false`
    fn guarded(cond: Expr, value: impl FnOnce() -> StoreResult<Expr>) -> StoreResult<Self> {
        if cond.is_false() {
            return Ok(Self::Skip);
        }
        let value = value()?;
        Ok(if cond.is_true() {
            Self::Value(value)
        } else {
            Self::Layer(cond, value)
        })
    }
}

/// Store snapshot of one execution state.
///
/// Cloning forks the snapshot. Forks share the allocation counter, so two
/// branches never hand out the same address.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    next_address: Arc<AtomicU64>,
    elements: FxHashMap<Descriptor, UpdateLog>,
    lengths: FxHashMap<Descriptor, LengthLog>,
    index_keys: IndexKeyInfo,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(IndexKeyInfo::default())
    }
}

impl MemoryStore {
    pub fn new(index_keys: IndexKeyInfo) -> Self {
        debug!(
            "[MemoryStore] created (range enumeration limit = {})",
            index_keys.range_limit
        );
        Self {
            next_address: Arc::new(AtomicU64::new(FIRST_ADDRESS)),
            elements: FxHashMap::default(),
            lengths: FxHashMap::default(),
            index_keys,
        }
    }

    pub fn from_config(config: &CollectionConfig) -> Self {
        Self::new(IndexKeyInfo::new(config.range_enumeration_limit))
    }

    /// Element updates recorded under `descriptor`, oldest first
    pub fn updates(&self, descriptor: Descriptor) -> &[UpdateNode] {
        self.elements
            .get(&descriptor)
            .map(UpdateLog::nodes)
            .unwrap_or(&[])
    }

    pub fn update_count(&self, descriptor: Descriptor) -> usize {
        self.elements.get(&descriptor).map_or(0, UpdateLog::len)
    }

    pub fn length_update_count(&self, descriptor: Descriptor) -> usize {
        self.lengths.get(&descriptor).map_or(0, LengthLog::len)
    }

    fn version(&self, descriptor: Descriptor) -> usize {
        self.update_count(descriptor)
    }

    fn array_keys(&self) -> ArrayIndexKeyInfo {
        CompositeKeyInfo::new(HeapRefKeyInfo, self.index_keys)
    }

    fn map_keys(&self) -> MapKeyInfo<HeapRefKeyInfo> {
        CompositeKeyInfo::new(HeapRefKeyInfo, HeapRefKeyInfo)
    }

    /// Initial content of a slot nobody wrote
    fn initial_value(&self, descriptor: Descriptor, instance: &Expr, key: Option<&Expr>) -> Expr {
        let sort = match key {
            Some(_) => descriptor.value_sort(),
            None => Sort::Size,
        };
        if instance.is_concrete_ref() {
            Expr::sample_default(sort)
        } else {
            Expr::input(descriptor.label(), instance.clone(), key.cloned(), sort)
        }
    }

    /// Resolve an element read against the first `version` updates
    fn resolve(
        &self,
        descriptor: Descriptor,
        instance: &Expr,
        key: &Expr,
        version: usize,
        cache: &mut ReadCache,
    ) -> StoreResult<Expr> {
        match descriptor.kind {
            CollectionKind::List => {
                self.resolve_with(&self.array_keys(), descriptor, instance, key, version, cache)
            }
            CollectionKind::MapValue | CollectionKind::MapContains => {
                self.resolve_with(&self.map_keys(), descriptor, instance, key, version, cache)
            }
        }
    }

    /// Walks down from `version` until a memoized version, a definite value or
    /// the initial content, then folds the guarded layers back up, memoizing
    /// every intermediate version of this slot on the way.
    fn resolve_with<K>(
        &self,
        keys: &CompositeKeyInfo<HeapRefKeyInfo, K>,
        descriptor: Descriptor,
        instance: &Expr,
        key: &Expr,
        version: usize,
        cache: &mut ReadCache,
    ) -> StoreResult<Expr>
    where
        K: KeyInfo<Key = Expr>,
    {
        let nodes = self
            .elements
            .get(&descriptor)
            .map_or(&[][..], |log| log.prefix(version));
        let read_key = (instance.clone(), key.clone());
        let read_region = keys.key_to_region(&read_key);
        let slot = |version: usize| (descriptor, instance.clone(), key.clone(), version);

        let mut pending = Vec::new();
        let mut position = nodes.len();
        let bottom = loop {
            if let Some(known) = cache.get(&slot(position)) {
                break known.clone();
            }
            if position == 0 {
                break self.initial_value(descriptor, instance, Some(key));
            }
            let index = position - 1;
            let step = match &nodes[index] {
                UpdateNode::Write {
                    instance: written_instance,
                    key: written_key,
                    value,
                    guard,
                } => {
                    let write_key = (written_instance.clone(), written_key.clone());
                    if read_region.is_disjoint(&keys.key_to_region(&write_key)) {
                        Step::Skip
                    } else if guard.is_true() && keys.eq_concrete(&write_key, &read_key) {
                        Step::Value(value.clone())
                    } else {
                        Step::guarded(
                            Expr::and(guard.clone(), keys.eq_symbolic(&write_key, &read_key)),
                            || Ok(value.clone()),
                        )?
                    }
                }
                UpdateNode::RangeCopy {
                    src,
                    dst,
                    from_src,
                    from_dst,
                    to_dst,
                    guard,
                } => {
                    let range = keys.key_range_region(
                        &(dst.clone(), from_dst.clone()),
                        &(dst.clone(), to_dst.clone()),
                    )?;
                    if read_region.is_disjoint(&range) {
                        Step::Skip
                    } else {
                        let inside = Expr::and_all([
                            guard.clone(),
                            keys.first.eq_symbolic(dst, instance),
                            keys.second.cmp_symbolic(from_dst, key)?,
                            keys.second.cmp_symbolic(key, to_dst)?,
                        ]);
                        Step::guarded(inside, || {
                            // k - from_dst + from_src
                            let src_key = Expr::add(
                                Expr::sub(key.clone(), from_dst.clone()),
                                from_src.clone(),
                            );
                            self.resolve_with(keys, descriptor, src, &src_key, index, cache)
                        })?
                    }
                }
                UpdateNode::Merge {
                    src,
                    dst,
                    contains,
                    contains_version,
                    guard,
                } => {
                    if read_region.first.is_disjoint(&keys.first.key_to_region(dst)) {
                        Step::Skip
                    } else {
                        let src_contains =
                            self.resolve(*contains, src, key, *contains_version, cache)?;
                        let cond = Expr::and_all([
                            guard.clone(),
                            keys.first.eq_symbolic(dst, instance),
                            src_contains,
                        ]);
                        Step::guarded(cond, || {
                            self.resolve_with(keys, descriptor, src, key, index, cache)
                        })?
                    }
                }
            };

            match step {
                Step::Skip => pending.push((position, None)),
                Step::Value(value) => {
                    pending.push((position, None));
                    break value;
                }
                Step::Layer(cond, value) => pending.push((position, Some((cond, value)))),
            }
            position = index;
        };

        let mut resolved = bottom;
        for (position, layer) in pending.into_iter().rev() {
            if let Some((cond, value)) = layer {
                resolved = Expr::ite(cond, value, resolved);
            }
            cache.insert(slot(position), resolved.clone());
        }
        Ok(resolved)
    }

    fn check_sort(role: &'static str, expected: Sort, expr: &Expr) -> StoreResult<()> {
        let found = expr.sort();
        if found == expected {
            Ok(())
        } else {
            Err(StoreError::sort_mismatch(role, expected, found))
        }
    }

    fn check_slot(descriptor: Descriptor, instance: &Expr, key: &Expr) -> StoreResult<()> {
        Self::check_sort("instance", Sort::Ref, instance)?;
        Self::check_sort("key", descriptor.key_sort(), key)
    }
}

impl SymbolicStore for MemoryStore {
    fn allocate(&mut self) -> Expr {
        let address = self.next_address.fetch_add(1, Ordering::Relaxed);
        Expr::heap_ref(address)
    }

    fn read(&self, descriptor: Descriptor, instance: &Expr, key: &Expr) -> StoreResult<Expr> {
        Self::check_slot(descriptor, instance, key)?;
        let mut cache = ReadCache::default();
        self.resolve(descriptor, instance, key, self.version(descriptor), &mut cache)
    }

    fn write(
        &mut self,
        descriptor: Descriptor,
        instance: &Expr,
        key: &Expr,
        value: Expr,
        guard: Expr,
    ) -> StoreResult<()> {
        Self::check_slot(descriptor, instance, key)?;
        Self::check_sort("value", descriptor.value_sort(), &value)?;
        Self::check_sort("guard", Sort::Bool, &guard)?;
        if guard.is_false() {
            return Ok(());
        }
        self.elements
            .entry(descriptor)
            .or_default()
            .push(UpdateNode::Write {
                instance: instance.clone(),
                key: key.clone(),
                value,
                guard,
            });
        Ok(())
    }

    fn merge_store(
        &mut self,
        descriptor: Descriptor,
        contains: Descriptor,
        src: &Expr,
        dst: &Expr,
        guard: Expr,
    ) -> StoreResult<()> {
        if descriptor.is_list() {
            return Err(StoreError::UnsupportedOperation {
                operation: "merge_store",
                descriptor: descriptor.to_string(),
            });
        }
        if contains.kind != CollectionKind::MapContains {
            return Err(StoreError::UnsupportedOperation {
                operation: "merge_store (precedence)",
                descriptor: contains.to_string(),
            });
        }
        Self::check_sort("source instance", Sort::Ref, src)?;
        Self::check_sort("destination instance", Sort::Ref, dst)?;
        if guard.is_false() {
            return Ok(());
        }

        let contains_version = self.version(contains);
        debug!(
            "[MemoryStore] merge {} -> {} under {} (precedence {}@{})",
            src, dst, descriptor, contains, contains_version
        );
        self.elements
            .entry(descriptor)
            .or_default()
            .push(UpdateNode::Merge {
                src: src.clone(),
                dst: dst.clone(),
                contains,
                contains_version,
                guard,
            });
        Ok(())
    }

    fn read_length(&self, descriptor: Descriptor, instance: &Expr) -> StoreResult<Expr> {
        Self::check_sort("instance", Sort::Ref, instance)?;
        let initial = || self.initial_value(descriptor, instance, None);
        Ok(match self.lengths.get(&descriptor) {
            Some(log) => log.resolve(instance, initial),
            None => initial(),
        })
    }

    fn write_length(
        &mut self,
        descriptor: Descriptor,
        instance: &Expr,
        size: Expr,
        guard: Expr,
    ) -> StoreResult<()> {
        Self::check_sort("instance", Sort::Ref, instance)?;
        Self::check_sort("length", Sort::Size, &size)?;
        if guard.is_false() {
            return Ok(());
        }
        self.lengths
            .entry(descriptor)
            .or_default()
            .push(LengthWrite {
                instance: instance.clone(),
                size,
                guard,
            });
        Ok(())
    }

    fn copy_range(
        &mut self,
        descriptor: Descriptor,
        src: &Expr,
        dst: &Expr,
        from_src: &Expr,
        from_dst: &Expr,
        to_dst: &Expr,
        guard: Expr,
    ) -> StoreResult<()> {
        let non_empty = match descriptor.kind {
            CollectionKind::List => self.index_keys.cmp_symbolic(from_dst, to_dst)?,
            CollectionKind::MapValue | CollectionKind::MapContains => {
                HeapRefKeyInfo.cmp_symbolic(from_dst, to_dst)?
            }
        };
        Self::check_slot(descriptor, src, from_src)?;
        Self::check_slot(descriptor, dst, from_dst)?;
        Self::check_sort("key", descriptor.key_sort(), to_dst)?;

        if non_empty.is_false() || guard.is_false() {
            debug!(
                "[MemoryStore] copy_range {}[{}..={}] is empty, skipped",
                dst, from_dst, to_dst
            );
            return Ok(());
        }

        self.elements
            .entry(descriptor)
            .or_default()
            .push(UpdateNode::RangeCopy {
                src: src.clone(),
                dst: dst.clone(),
                from_src: from_src.clone(),
                from_dst: from_dst.clone(),
                to_dst: to_dst.clone(),
                guard,
            });
        Ok(())
    }
}
