//! Region lattice trait
//!
//! A region over-approximates the set of concrete keys a (possibly symbolic)
//! key may denote. Operations may lose precision but never in the unsound
//! direction: a region that answers `Disjoint` must really share no key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of comparing two regions: `self.compare(other)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionComparison {
    /// `self ⊇ other`
    Includes,
    /// `self ∩ other = ∅`
    Disjoint,
    /// Anything in between (sound default)
    Intersects,
}

/// Over-approximating key-set abstraction
///
/// # Laws
/// - `a.intersect(b)` ⊇ true intersection, `a.union(b)` ⊇ true union
/// - `a.subtract(b)` ⊇ true difference
/// - `compare` returns `Disjoint` / `Includes` only when provable
pub trait Region: Clone + fmt::Debug + PartialEq {
    fn is_empty(&self) -> bool;

    fn compare(&self, other: &Self) -> RegionComparison;

    fn intersect(&self, other: &Self) -> Self;

    fn union(&self, other: &Self) -> Self;

    fn subtract(&self, other: &Self) -> Self;

    fn includes(&self, other: &Self) -> bool {
        self.compare(other) == RegionComparison::Includes
    }

    /// Provably no common key
    fn is_disjoint(&self, other: &Self) -> bool {
        other.is_empty() || self.compare(other) == RegionComparison::Disjoint
    }
}
