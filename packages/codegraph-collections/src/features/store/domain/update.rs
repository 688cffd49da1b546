//! Guarded store updates
//!
//! Every mutation of a collection is recorded as one guarded node; nothing is
//! ever overwritten in place. Reads resolve against the log newest first.

use super::descriptor::Descriptor;
use crate::features::expr::Expr;

/// One guarded update of an element store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateNode {
    /// `store[instance][key] := value` when `guard` holds
    Write {
        instance: Expr,
        key: Expr,
        value: Expr,
        guard: Expr,
    },

    /// For every `k` in `from_dst..=to_dst`:
    /// `store[dst][k] := store[src][k - from_dst + from_src]` when `guard` holds
    RangeCopy {
        src: Expr,
        dst: Expr,
        from_src: Expr,
        from_dst: Expr,
        to_dst: Expr,
        guard: Expr,
    },

    /// For every key `k` with `contains[src][k]`:
    /// `store[dst][k] := store[src][k]` when `guard` holds.
    ///
    /// `contains_version` is the length of the membership log at merge time,
    /// so the precedence flags are read as they were before the merge.
    Merge {
        src: Expr,
        dst: Expr,
        contains: Descriptor,
        contains_version: usize,
        guard: Expr,
    },
}

/// Guarded write of a length scalar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthWrite {
    pub instance: Expr,
    pub size: Expr,
    pub guard: Expr,
}
