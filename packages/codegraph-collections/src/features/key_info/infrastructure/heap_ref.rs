//! Heap reference keys: unordered identity

use crate::features::expr::{Expr, HeapAddress};
use crate::features::key_info::domain::{KeyInfoError, KeyInfoResult};
use crate::features::key_info::ports::KeyInfo;
use crate::features::regions::SetRegion;

/// Key-info for heap references.
///
/// Allocated references map to singletons; symbolic references may alias
/// anything and map to the universe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapRefKeyInfo;

impl KeyInfo for HeapRefKeyInfo {
    type Key = Expr;
    type Region = SetRegion<HeapAddress>;

    fn eq_symbolic(&self, lhs: &Expr, rhs: &Expr) -> Expr {
        Expr::eq(lhs.clone(), rhs.clone())
    }

    fn eq_concrete(&self, lhs: &Expr, rhs: &Expr) -> bool {
        lhs == rhs
    }

    fn cmp_symbolic(&self, _lhs: &Expr, _rhs: &Expr) -> KeyInfoResult<Expr> {
        Err(KeyInfoError::not_comparable("Heap reference"))
    }

    fn cmp_concrete(&self, _lhs: &Expr, _rhs: &Expr) -> KeyInfoResult<bool> {
        Err(KeyInfoError::not_comparable("Heap reference"))
    }

    fn key_to_region(&self, key: &Expr) -> SetRegion<HeapAddress> {
        match key.as_heap_ref() {
            Some(address) => SetRegion::singleton(address),
            None => SetRegion::universe(),
        }
    }

    fn key_range_region(&self, _from: &Expr, _to: &Expr) -> KeyInfoResult<SetRegion<HeapAddress>> {
        Err(KeyInfoError::not_comparable("Heap reference"))
    }

    fn top_region(&self) -> SetRegion<HeapAddress> {
        SetRegion::universe()
    }

    fn bottom_region(&self) -> SetRegion<HeapAddress> {
        SetRegion::empty()
    }
}
