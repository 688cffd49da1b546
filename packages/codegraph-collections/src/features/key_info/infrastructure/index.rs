//! Size-sorted index keys: linearly ordered

use crate::features::expr::Expr;
use crate::features::key_info::domain::KeyInfoResult;
use crate::features::key_info::ports::KeyInfo;
use crate::features::regions::SetRegion;

/// Default bound on concrete ranges enumerated into an explicit set
pub const DEFAULT_RANGE_LIMIT: usize = 4096;

/// Key-info for list indices.
///
/// Concrete ranges wider than `range_limit` are widened to the universe
/// instead of being enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexKeyInfo {
    pub range_limit: usize,
}

impl IndexKeyInfo {
    pub fn new(range_limit: usize) -> Self {
        Self { range_limit }
    }
}

impl Default for IndexKeyInfo {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_LIMIT)
    }
}

impl KeyInfo for IndexKeyInfo {
    type Key = Expr;
    type Region = SetRegion<i64>;

    fn eq_symbolic(&self, lhs: &Expr, rhs: &Expr) -> Expr {
        Expr::eq(lhs.clone(), rhs.clone())
    }

    fn eq_concrete(&self, lhs: &Expr, rhs: &Expr) -> bool {
        Expr::eq(lhs.clone(), rhs.clone()).is_true()
    }

    fn cmp_symbolic(&self, lhs: &Expr, rhs: &Expr) -> KeyInfoResult<Expr> {
        Ok(Expr::le(lhs.clone(), rhs.clone()))
    }

    fn cmp_concrete(&self, lhs: &Expr, rhs: &Expr) -> KeyInfoResult<bool> {
        Ok(Expr::le(lhs.clone(), rhs.clone()).is_true())
    }

    fn key_to_region(&self, key: &Expr) -> SetRegion<i64> {
        match key.as_size() {
            Some(index) => SetRegion::singleton(index),
            None => SetRegion::universe(),
        }
    }

    fn key_range_region(&self, from: &Expr, to: &Expr) -> KeyInfoResult<SetRegion<i64>> {
        let (Some(from), Some(to)) = (from.as_size(), to.as_size()) else {
            return Ok(SetRegion::universe());
        };
        if to < from {
            return Ok(SetRegion::empty());
        }
        let width = (to as i128 - from as i128 + 1) as u128;
        if width > self.range_limit as u128 {
            tracing::warn!(
                "[IndexKeyInfo] Range {}..={} exceeds enumeration limit {}, widening to universe",
                from,
                to,
                self.range_limit
            );
            return Ok(SetRegion::universe());
        }
        Ok(SetRegion::from_values(from..=to))
    }

    fn top_region(&self) -> SetRegion<i64> {
        SetRegion::universe()
    }

    fn bottom_region(&self) -> SetRegion<i64> {
        SetRegion::empty()
    }
}
