//! Append-only update logs

use crate::features::expr::Expr;
use crate::features::key_info::{HeapRefKeyInfo, KeyInfo};
use crate::features::regions::Region;
use crate::features::store::domain::{LengthWrite, UpdateNode};

/// Element updates of one descriptor, oldest first
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    nodes: Vec<UpdateNode>,
}

impl UpdateLog {
    pub fn push(&mut self, node: UpdateNode) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[UpdateNode] {
        &self.nodes
    }

    /// The first `version` nodes: the log as it was when it had that length
    pub fn prefix(&self, version: usize) -> &[UpdateNode] {
        &self.nodes[..version.min(self.nodes.len())]
    }
}

/// Length-scalar writes of one descriptor, oldest first
#[derive(Debug, Clone, Default)]
pub struct LengthLog {
    writes: Vec<LengthWrite>,
}

impl LengthLog {
    pub fn push(&mut self, write: LengthWrite) {
        self.writes.push(write);
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Length of `instance`, falling back to `initial` when no write applies
    pub fn resolve(&self, instance: &Expr, initial: impl FnOnce() -> Expr) -> Expr {
        let refs = HeapRefKeyInfo;
        let region = refs.key_to_region(instance);
        let mut layers = Vec::new();
        let mut resolved = None;

        for write in self.writes.iter().rev() {
            if region.is_disjoint(&refs.key_to_region(&write.instance)) {
                continue;
            }
            if write.guard.is_true() && refs.eq_concrete(&write.instance, instance) {
                resolved = Some(write.size.clone());
                break;
            }
            let cond = Expr::and(
                write.guard.clone(),
                refs.eq_symbolic(&write.instance, instance),
            );
            if cond.is_false() {
                continue;
            }
            if cond.is_true() {
                resolved = Some(write.size.clone());
                break;
            }
            layers.push((cond, write.size.clone()));
        }

        fold_layers(layers, resolved.unwrap_or_else(initial))
    }
}

/// Build `ite(c1, v1, ite(c2, v2, ... bottom))` from newest-first layers
fn fold_layers(layers: Vec<(Expr, Expr)>, bottom: Expr) -> Expr {
    layers
        .into_iter()
        .rev()
        .fold(bottom, |acc, (cond, value)| Expr::ite(cond, value, acc))
}
