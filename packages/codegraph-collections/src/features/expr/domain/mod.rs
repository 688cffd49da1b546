//! Expression domain: sorts, folding constructors and models

mod expr;
mod model;
mod sort;

pub use expr::{Expr, InputReading};
pub use model::{Model, ModelValue};
pub use sort::{HeapAddress, Sort, NULL_ADDRESS};
