//! Two-dimensional product region (e.g. instance identity × index)

use super::region::{Region, RegionComparison};

/// Componentwise product of two independent key dimensions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductRegion<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Region, B: Region> ProductRegion<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Region, B: Region> Region for ProductRegion<A, B> {
    fn is_empty(&self) -> bool {
        self.first.is_empty() || self.second.is_empty()
    }

    fn compare(&self, other: &Self) -> RegionComparison {
        if other.is_empty() {
            return RegionComparison::Includes;
        }
        if self.is_empty() {
            return RegionComparison::Disjoint;
        }
        let first = self.first.compare(&other.first);
        let second = self.second.compare(&other.second);
        match (first, second) {
            // One disagreeing dimension is enough to separate the products
            (RegionComparison::Disjoint, _) | (_, RegionComparison::Disjoint) => {
                RegionComparison::Disjoint
            }
            (RegionComparison::Includes, RegionComparison::Includes) => RegionComparison::Includes,
            _ => RegionComparison::Intersects,
        }
    }

    fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.first.intersect(&other.first),
            self.second.intersect(&other.second),
        )
    }

    /// Componentwise union: the bounding box of both products
    fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::new(
            self.first.union(&other.first),
            self.second.union(&other.second),
        )
    }

    /// Exact only when the subtrahend covers a whole dimension of `self`;
    /// otherwise `self` is kept unchanged.
    fn subtract(&self, other: &Self) -> Self {
        if self.is_disjoint(other) {
            return self.clone();
        }
        if other.first.includes(&self.first) {
            return Self::new(self.first.clone(), self.second.subtract(&other.second));
        }
        if other.second.includes(&self.second) {
            return Self::new(self.first.subtract(&other.first), self.second.clone());
        }
        self.clone()
    }
}
