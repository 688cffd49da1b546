//! Key-info of keyless collections

use crate::features::expr::Expr;
use crate::features::key_info::domain::KeyInfoResult;
use crate::features::key_info::ports::KeyInfo;
use crate::features::regions::TrivialRegion;

/// Key type of a keyless collection: uninhabited, so no key can be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoKey {}

/// Key-info for keyless collections whose only field is a scalar.
///
/// Key operations are statically unreachable; region operations yield a
/// [`TrivialRegion`] that panics when used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoKeyInfo;

impl KeyInfo for NoKeyInfo {
    type Key = NoKey;
    type Region = TrivialRegion;

    fn eq_symbolic(&self, lhs: &NoKey, _rhs: &NoKey) -> Expr {
        match *lhs {}
    }

    fn eq_concrete(&self, lhs: &NoKey, _rhs: &NoKey) -> bool {
        match *lhs {}
    }

    fn cmp_symbolic(&self, lhs: &NoKey, _rhs: &NoKey) -> KeyInfoResult<Expr> {
        match *lhs {}
    }

    fn cmp_concrete(&self, lhs: &NoKey, _rhs: &NoKey) -> KeyInfoResult<bool> {
        match *lhs {}
    }

    fn key_to_region(&self, key: &NoKey) -> TrivialRegion {
        match *key {}
    }

    fn key_range_region(&self, from: &NoKey, _to: &NoKey) -> KeyInfoResult<TrivialRegion> {
        match *from {}
    }

    fn top_region(&self) -> TrivialRegion {
        TrivialRegion
    }

    fn bottom_region(&self) -> TrivialRegion {
        TrivialRegion
    }
}
