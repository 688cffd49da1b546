//! Concrete models for symbolic expressions
//!
//! A model assigns values to free constants and to input collection slots.
//! Anything not assigned evaluates to the sampled default of its sort, so a
//! model is total over every expression.

use super::expr::Expr;
use super::sort::{HeapAddress, Sort, NULL_ADDRESS};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Concrete value of a symbolic expression under a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelValue {
    Bool(bool),
    Size(i64),
    Ref(HeapAddress),
}

impl ModelValue {
    pub fn default_of(sort: Sort) -> Self {
        match sort {
            Sort::Bool => Self::Bool(false),
            Sort::Size => Self::Size(0),
            Sort::Ref => Self::Ref(NULL_ADDRESS),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<i64> {
        match self {
            Self::Size(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_expr(self) -> Expr {
        match self {
            Self::Bool(v) => Expr::Bool(v),
            Self::Size(v) => Expr::Size(v),
            Self::Ref(address) => Expr::Ref(address),
        }
    }
}

type InputSlot = (Arc<str>, ModelValue, Option<ModelValue>);

/// Assignment of free constants and input collection contents
#[derive(Debug, Clone, Default)]
pub struct Model {
    constants: FxHashMap<Arc<str>, ModelValue>,
    inputs: FxHashMap<InputSlot, ModelValue>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style constant assignment
    pub fn with_constant(mut self, name: impl Into<Arc<str>>, value: ModelValue) -> Self {
        self.set_constant(name, value);
        self
    }

    pub fn set_constant(&mut self, name: impl Into<Arc<str>>, value: ModelValue) {
        self.constants.insert(name.into(), value);
    }

    /// Assign the initial content of an input collection slot.
    ///
    /// `collection` is the descriptor label the store uses for the reading
    /// (e.g. `list<size>`); `key` is `None` for the length slot.
    pub fn set_input(
        &mut self,
        collection: impl Into<Arc<str>>,
        instance: ModelValue,
        key: Option<ModelValue>,
        value: ModelValue,
    ) {
        self.inputs.insert((collection.into(), instance, key), value);
    }

    pub fn eval(&self, expr: &Expr) -> ModelValue {
        match expr {
            Expr::Bool(v) => ModelValue::Bool(*v),
            Expr::Size(v) => ModelValue::Size(*v),
            Expr::Ref(address) => ModelValue::Ref(*address),
            Expr::Const { name, sort } => self
                .constants
                .get(name)
                .copied()
                .unwrap_or_else(|| ModelValue::default_of(*sort)),
            Expr::Input(reading) => {
                let instance = self.eval(&reading.instance);
                let key = reading.key.as_ref().map(|k| self.eval(k));
                self.inputs
                    .get(&(reading.collection.clone(), instance, key))
                    .copied()
                    .unwrap_or_else(|| ModelValue::default_of(reading.sort))
            }
            Expr::Not(inner) => ModelValue::Bool(!self.eval_bool(inner)),
            Expr::And(items) => ModelValue::Bool(items.iter().all(|e| self.eval_bool(e))),
            Expr::Or(items) => ModelValue::Bool(items.iter().any(|e| self.eval_bool(e))),
            Expr::Eq(a, b) => ModelValue::Bool(self.eval(a) == self.eval(b)),
            Expr::Le(a, b) => ModelValue::Bool(self.eval_size(a) <= self.eval_size(b)),
            Expr::Add(a, b) => ModelValue::Size(self.eval_size(a).wrapping_add(self.eval_size(b))),
            Expr::Sub(a, b) => ModelValue::Size(self.eval_size(a).wrapping_sub(self.eval_size(b))),
            Expr::Ite {
                cond,
                then,
                otherwise,
            } => {
                if self.eval_bool(cond) {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
        }
    }

    pub fn eval_bool(&self, expr: &Expr) -> bool {
        self.eval(expr).as_bool().unwrap_or(false)
    }

    pub fn eval_size(&self, expr: &Expr) -> i64 {
        self.eval(expr).as_size().unwrap_or(0)
    }

    /// Whether every constraint evaluates to `true`
    pub fn satisfies<'a>(&self, constraints: impl IntoIterator<Item = &'a Expr>) -> bool {
        constraints.into_iter().all(|c| self.eval_bool(c))
    }
}
