//! Region lattice
//!
//! Abstract over-approximations of key sets with disjointness and inclusion
//! queries. Update logs consult regions to skip entries that provably cannot
//! affect a read.

pub mod domain;

pub use domain::{ProductRegion, Region, RegionComparison, SetRegion, TrivialRegion};
