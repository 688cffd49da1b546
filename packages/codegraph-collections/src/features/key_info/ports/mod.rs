//! Key-info port
//!
//! Per key-type operation table the store uses to compare keys and to map
//! them into the region lattice. Implementations are stateless values.

use crate::features::expr::Expr;
use crate::features::key_info::domain::KeyInfoResult;
use crate::features::regions::Region;
use std::fmt;

pub trait KeyInfo {
    type Key: Clone + fmt::Debug;
    type Region: Region;

    /// Symbolic equality of two keys
    fn eq_symbolic(&self, lhs: &Self::Key, rhs: &Self::Key) -> Expr;

    /// Keys are provably equal without consulting the solver
    fn eq_concrete(&self, lhs: &Self::Key, rhs: &Self::Key) -> bool;

    /// Symbolic `lhs <= rhs`; fails on unordered dimensions
    fn cmp_symbolic(&self, lhs: &Self::Key, rhs: &Self::Key) -> KeyInfoResult<Expr>;

    /// `lhs <= rhs` holds without consulting the solver; fails on unordered dimensions
    fn cmp_concrete(&self, lhs: &Self::Key, rhs: &Self::Key) -> KeyInfoResult<bool>;

    fn key_to_region(&self, key: &Self::Key) -> Self::Region;

    /// Region spanned by the inclusive range `from..=to`
    fn key_range_region(&self, from: &Self::Key, to: &Self::Key) -> KeyInfoResult<Self::Region>;

    fn top_region(&self) -> Self::Region;

    fn bottom_region(&self) -> Self::Region;
}
