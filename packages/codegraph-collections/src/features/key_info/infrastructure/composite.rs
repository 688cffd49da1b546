//! Composite (instance, inner key) key-info

use super::heap_ref::HeapRefKeyInfo;
use super::index::IndexKeyInfo;
use crate::features::expr::Expr;
use crate::features::key_info::domain::{KeyInfoError, KeyInfoResult};
use crate::features::key_info::ports::KeyInfo;
use crate::features::regions::ProductRegion;

/// Two-dimensional key-info delegating each dimension to its own table.
///
/// Keys are pairs; regions are products. Ordering is lexicographic, so it is
/// only defined when the first dimension is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeKeyInfo<A, B> {
    pub first: A,
    pub second: B,
}

/// (list instance, index)
pub type ArrayIndexKeyInfo = CompositeKeyInfo<HeapRefKeyInfo, IndexKeyInfo>;

/// (map instance, key of the map's key sort)
pub type MapKeyInfo<K> = CompositeKeyInfo<HeapRefKeyInfo, K>;

impl<A, B> CompositeKeyInfo<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: KeyInfo, B: KeyInfo> KeyInfo for CompositeKeyInfo<A, B> {
    type Key = (A::Key, B::Key);
    type Region = ProductRegion<A::Region, B::Region>;

    fn eq_symbolic(&self, lhs: &Self::Key, rhs: &Self::Key) -> Expr {
        Expr::and(
            self.first.eq_symbolic(&lhs.0, &rhs.0),
            self.second.eq_symbolic(&lhs.1, &rhs.1),
        )
    }

    fn eq_concrete(&self, lhs: &Self::Key, rhs: &Self::Key) -> bool {
        self.first.eq_concrete(&lhs.0, &rhs.0) && self.second.eq_concrete(&lhs.1, &rhs.1)
    }

    fn cmp_symbolic(&self, lhs: &Self::Key, rhs: &Self::Key) -> KeyInfoResult<Expr> {
        let first_le = self.first.cmp_symbolic(&lhs.0, &rhs.0)?;
        let first_ge = self.first.cmp_symbolic(&rhs.0, &lhs.0)?;
        let second_le = self.second.cmp_symbolic(&lhs.1, &rhs.1)?;
        // lhs.0 < rhs.0 || (lhs.0 == rhs.0 && lhs.1 <= rhs.1)
        Ok(Expr::or(
            Expr::and(first_le.clone(), Expr::not(first_ge)),
            Expr::and(self.first.eq_symbolic(&lhs.0, &rhs.0), second_le),
        ))
    }

    fn cmp_concrete(&self, lhs: &Self::Key, rhs: &Self::Key) -> KeyInfoResult<bool> {
        let first_le = self.first.cmp_concrete(&lhs.0, &rhs.0)?;
        if self.first.eq_concrete(&lhs.0, &rhs.0) {
            return self.second.cmp_concrete(&lhs.1, &rhs.1);
        }
        Ok(first_le && !self.first.cmp_concrete(&rhs.0, &lhs.0)?)
    }

    fn key_to_region(&self, key: &Self::Key) -> Self::Region {
        ProductRegion::new(
            self.first.key_to_region(&key.0),
            self.second.key_to_region(&key.1),
        )
    }

    fn key_range_region(&self, from: &Self::Key, to: &Self::Key) -> KeyInfoResult<Self::Region> {
        if !self.first.eq_concrete(&from.0, &to.0) {
            return Err(KeyInfoError::RangeBaseMismatch {
                from: format!("{:?}", from.0),
                to: format!("{:?}", to.0),
            });
        }
        Ok(ProductRegion::new(
            self.first.key_to_region(&from.0),
            self.second.key_range_region(&from.1, &to.1)?,
        ))
    }

    fn top_region(&self) -> Self::Region {
        ProductRegion::new(self.first.top_region(), self.second.top_region())
    }

    fn bottom_region(&self) -> Self::Region {
        ProductRegion::new(self.first.bottom_region(), self.second.bottom_region())
    }
}
