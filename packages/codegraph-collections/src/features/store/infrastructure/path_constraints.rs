//! In-memory path constraint accumulation

use crate::features::expr::{Expr, Model, Sort};
use crate::features::store::ports::PathConstraintSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Conjunction of path constraints of one execution state.
///
/// Clones model forked states: constraint lists diverge while the fresh-name
/// counter stays shared, so fresh constants never clash across branches.
#[derive(Debug, Clone, Default)]
pub struct PathConstraints {
    constraints: Vec<Expr>,
    fresh_counter: Arc<AtomicU64>,
}

impl PathConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constraints(&self) -> &[Expr] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// A constraint folded to `false` was asserted
    pub fn is_trivially_unsat(&self) -> bool {
        self.constraints.iter().any(Expr::is_false)
    }

    pub fn is_satisfied_by(&self, model: &Model) -> bool {
        model.satisfies(&self.constraints)
    }
}

impl PathConstraintSink for PathConstraints {
    fn add_constraint(&mut self, constraint: Expr) {
        if !constraint.is_true() {
            self.constraints.push(constraint);
        }
    }

    fn fresh_const(&mut self, prefix: &str, sort: Sort) -> Expr {
        let id = self.fresh_counter.fetch_add(1, Ordering::Relaxed);
        Expr::constant(format!("{}!{}", prefix, id), sort)
    }
}
