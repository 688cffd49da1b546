//! Region of a keyless dimension

use super::region::{Region, RegionComparison};

/// Region type of keyless collections (e.g. a length slot).
///
/// It exists to type-check keyless collections; there is no key space to
/// reason about, so every lattice operation is a programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrivialRegion;

const MISUSE: &str = "keyless dimension has no region algebra";

impl Region for TrivialRegion {
    fn is_empty(&self) -> bool {
        panic!("{}", MISUSE)
    }

    fn compare(&self, _other: &Self) -> RegionComparison {
        panic!("{}", MISUSE)
    }

    fn intersect(&self, _other: &Self) -> Self {
        panic!("{}", MISUSE)
    }

    fn union(&self, _other: &Self) -> Self {
        panic!("{}", MISUSE)
    }

    fn subtract(&self, _other: &Self) -> Self {
        panic!("{}", MISUSE)
    }
}
