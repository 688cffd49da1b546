//! Region lattice domain

mod product_region;
mod region;
mod set_region;
mod trivial_region;

pub use product_region::ProductRegion;
pub use region::{Region, RegionComparison};
pub use set_region::SetRegion;
pub use trivial_region::TrivialRegion;
