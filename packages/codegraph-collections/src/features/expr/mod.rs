//! Symbolic expression layer
//!
//! Minimal expression language the collection protocols build keys, values,
//! guards and constraints from. Solving is out of scope; [`Model`] evaluates
//! expressions under a concrete assignment so constraints can be checked.

pub mod domain;

pub use domain::{Expr, HeapAddress, InputReading, Model, ModelValue, Sort, NULL_ADDRESS};
