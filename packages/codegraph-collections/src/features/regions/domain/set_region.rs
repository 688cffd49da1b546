//! Finite-set region over an ordered key dimension

use super::region::{Region, RegionComparison};
use std::collections::BTreeSet;
use std::fmt;

/// Set-shaped region: `Empty ⊑ Singleton ⊑ ExplicitSet ⊑ Universe`
///
/// Constructed through [`SetRegion::from_values`] the representation is
/// normalized: an `ExplicitSet` always holds at least two values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetRegion<T: Ord + Clone> {
    Empty,
    Singleton(T),
    ExplicitSet(BTreeSet<T>),
    Universe,
}

impl<T: Ord + Clone> SetRegion<T> {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn universe() -> Self {
        Self::Universe
    }

    pub fn singleton(value: T) -> Self {
        Self::Singleton(value)
    }

    /// Normalized region of a finite set of values
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut set: BTreeSet<T> = values.into_iter().collect();
        match set.len() {
            0 => Self::Empty,
            1 => match set.pop_first() {
                Some(value) => Self::Singleton(value),
                None => Self::Empty,
            },
            _ => Self::ExplicitSet(set),
        }
    }

    pub fn is_universe(&self) -> bool {
        matches!(self, Self::Universe)
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Empty => false,
            Self::Singleton(v) => v == value,
            Self::ExplicitSet(set) => set.contains(value),
            Self::Universe => true,
        }
    }

    /// Concrete members, `None` for `Universe`
    fn members(&self) -> Option<BTreeSet<T>> {
        match self {
            Self::Empty => Some(BTreeSet::new()),
            Self::Singleton(v) => Some(BTreeSet::from([v.clone()])),
            Self::ExplicitSet(set) => Some(set.clone()),
            Self::Universe => None,
        }
    }
}

impl<T: Ord + Clone + fmt::Debug> Region for SetRegion<T> {
    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn compare(&self, other: &Self) -> RegionComparison {
        match (self, other) {
            (_, Self::Empty) | (Self::Universe, _) => RegionComparison::Includes,
            (Self::Empty, _) => RegionComparison::Disjoint,
            (_, Self::Universe) => RegionComparison::Intersects,
            (lhs, rhs) => {
                let (Some(lhs), Some(rhs)) = (lhs.members(), rhs.members()) else {
                    return RegionComparison::Intersects;
                };
                if rhs.is_subset(&lhs) {
                    RegionComparison::Includes
                } else if lhs.is_disjoint(&rhs) {
                    RegionComparison::Disjoint
                } else {
                    RegionComparison::Intersects
                }
            }
        }
    }

    fn intersect(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Universe, r) | (r, Self::Universe) => r.clone(),
            (lhs, rhs) => match (lhs.members(), rhs.members()) {
                (Some(a), Some(b)) => Self::from_values(a.intersection(&b).cloned()),
                _ => Self::Universe,
            },
        }
    }

    fn union(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Universe, _) | (_, Self::Universe) => Self::Universe,
            (Self::Empty, r) | (r, Self::Empty) => r.clone(),
            (lhs, rhs) => match (lhs.members(), rhs.members()) {
                (Some(a), Some(b)) => Self::from_values(a.union(&b).cloned()),
                _ => Self::Universe,
            },
        }
    }

    fn subtract(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) => Self::Empty,
            (r, Self::Empty) => r.clone(),
            (_, Self::Universe) => Self::Empty,
            // Complement of a finite set is not representable; stay at top
            (Self::Universe, _) => Self::Universe,
            (lhs, rhs) => match (lhs.members(), rhs.members()) {
                (Some(a), Some(b)) => Self::from_values(a.difference(&b).cloned()),
                _ => lhs.clone(),
            },
        }
    }
}
