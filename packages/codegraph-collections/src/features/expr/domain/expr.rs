//! Symbolic Expressions
//!
//! Boolean / size / reference expressions used as keys, values, guards and
//! path constraints by the collection protocols.
//!
//! Constructors fold eagerly:
//! - literal arithmetic and comparisons are evaluated
//! - `x + c1` vs `x + c2` comparisons are decided from the offsets
//! - `and` / `or` flatten and drop neutral elements
//! - `ite` with a literal condition (or equal branches) collapses
//!
//! Folding is what keeps reads over concretely allocated collections free of
//! `ite` chains: equality of two concrete keys never reaches the solver.
//!
//! Children are `Arc`-shared, so resolution results reused across many
//! reads form a DAG rather than copies of one tree.
//!
//! Size arithmetic is 64-bit two's complement. Offset folding assumes sizes
//! stay far from the overflow boundary, which the engine guarantees through
//! `CollectionConfig::max_input_size`.

use super::sort::{HeapAddress, Sort, NULL_ADDRESS};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Uninterpreted initial content of a collection slot of an instance that was
/// not allocated by the engine (an input object).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputReading {
    /// Namespace label of the collection (descriptor rendering)
    pub collection: Arc<str>,
    /// Instance reference being read
    pub instance: Expr,
    /// Logical key inside the instance (`None` for the length slot)
    pub key: Option<Expr>,
    /// Sort of the value
    pub sort: Sort,
}

/// Symbolic expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Boolean literal
    Bool(bool),
    /// Size literal
    Size(i64),
    /// Concrete heap reference
    Ref(HeapAddress),
    /// Free constant
    Const { name: Arc<str>, sort: Sort },
    /// Initial content of an input collection slot
    Input(Arc<InputReading>),
    /// Logical NOT
    Not(Arc<Expr>),
    /// Logical AND
    And(Vec<Expr>),
    /// Logical OR
    Or(Vec<Expr>),
    /// Equality: e1 == e2
    Eq(Arc<Expr>, Arc<Expr>),
    /// Signed comparison: e1 <= e2
    Le(Arc<Expr>, Arc<Expr>),
    /// Addition: e1 + e2
    Add(Arc<Expr>, Arc<Expr>),
    /// Subtraction: e1 - e2
    Sub(Arc<Expr>, Arc<Expr>),
    /// Conditional: if cond then e1 else e2
    Ite {
        cond: Arc<Expr>,
        then: Arc<Expr>,
        otherwise: Arc<Expr>,
    },
}

impl Expr {
    pub const TRUE: Expr = Expr::Bool(true);
    pub const FALSE: Expr = Expr::Bool(false);

    // ═══════════════════════════════════════════════════════════════════════
    // Leaves
    // ═══════════════════════════════════════════════════════════════════════

    pub fn size(value: i64) -> Self {
        Self::Size(value)
    }

    pub fn heap_ref(address: HeapAddress) -> Self {
        Self::Ref(address)
    }

    pub fn null() -> Self {
        Self::Ref(NULL_ADDRESS)
    }

    /// Free constant of the given sort
    pub fn constant(name: impl Into<Arc<str>>, sort: Sort) -> Self {
        Self::Const {
            name: name.into(),
            sort,
        }
    }

    /// Uninterpreted reading of an input collection slot
    pub fn input(
        collection: impl Into<Arc<str>>,
        instance: Expr,
        key: Option<Expr>,
        sort: Sort,
    ) -> Self {
        Self::Input(Arc::new(InputReading {
            collection: collection.into(),
            instance,
            key,
            sort,
        }))
    }

    /// Sampled default value of a sort: `false`, `0` or `null`
    pub fn sample_default(sort: Sort) -> Self {
        match sort {
            Sort::Bool => Self::FALSE,
            Sort::Size => Self::Size(0),
            Sort::Ref => Self::null(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════

    pub fn sort(&self) -> Sort {
        match self {
            Self::Bool(_)
            | Self::Not(_)
            | Self::And(_)
            | Self::Or(_)
            | Self::Eq(..)
            | Self::Le(..) => Sort::Bool,
            Self::Size(_) | Self::Add(..) | Self::Sub(..) => Sort::Size,
            Self::Ref(_) => Sort::Ref,
            Self::Const { sort, .. } => *sort,
            Self::Input(reading) => reading.sort,
            Self::Ite { then, .. } => then.sort(),
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Self::Bool(false))
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

    /// Concrete heap address, if this is an allocated reference
    pub fn as_heap_ref(&self) -> Option<HeapAddress> {
        match self {
            Self::Ref(address) => Some(*address),
            _ => None,
        }
    }

    pub fn is_concrete_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Size(_) | Self::Ref(_))
    }

    /// Number of distinct nodes, counting each shared subterm once
    pub fn node_count(&self) -> usize {
        let mut seen = FxHashSet::default();
        self.count_nodes(&mut seen)
    }

    fn count_nodes(&self, seen: &mut FxHashSet<*const Expr>) -> usize {
        fn shared(child: &Arc<Expr>, seen: &mut FxHashSet<*const Expr>) -> usize {
            if seen.insert(Arc::as_ptr(child)) {
                child.count_nodes(seen)
            } else {
                0
            }
        }

        1 + match self {
            Self::Bool(_) | Self::Size(_) | Self::Ref(_) | Self::Const { .. } => 0,
            Self::Input(reading) => {
                reading.instance.count_nodes(seen)
                    + reading.key.as_ref().map_or(0, |key| key.count_nodes(seen))
            }
            Self::Not(inner) => shared(inner, seen),
            Self::And(items) | Self::Or(items) => {
                items.iter().map(|item| item.count_nodes(seen)).sum()
            }
            Self::Eq(a, b) | Self::Le(a, b) | Self::Add(a, b) | Self::Sub(a, b) => {
                shared(a, seen) + shared(b, seen)
            }
            Self::Ite {
                cond,
                then,
                otherwise,
            } => shared(cond, seen) + shared(then, seen) + shared(otherwise, seen),
        }
    }

    /// All free constants occurring in this expression
    pub fn constants(&self) -> BTreeSet<(Arc<str>, Sort)> {
        let mut constants = BTreeSet::new();
        self.collect_constants(&mut constants);
        constants
    }

    fn collect_constants(&self, constants: &mut BTreeSet<(Arc<str>, Sort)>) {
        match self {
            Self::Bool(_) | Self::Size(_) | Self::Ref(_) => {}
            Self::Const { name, sort } => {
                constants.insert((name.clone(), *sort));
            }
            Self::Input(reading) => {
                reading.instance.collect_constants(constants);
                if let Some(key) = &reading.key {
                    key.collect_constants(constants);
                }
            }
            Self::Not(inner) => inner.collect_constants(constants),
            Self::And(items) | Self::Or(items) => {
                for item in items {
                    item.collect_constants(constants);
                }
            }
            Self::Eq(a, b) | Self::Le(a, b) | Self::Add(a, b) | Self::Sub(a, b) => {
                a.collect_constants(constants);
                b.collect_constants(constants);
            }
            Self::Ite {
                cond,
                then,
                otherwise,
            } => {
                cond.collect_constants(constants);
                then.collect_constants(constants);
                otherwise.collect_constants(constants);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Boolean connectives
    // ═══════════════════════════════════════════════════════════════════════

    pub fn not(expr: Expr) -> Self {
        match expr {
            Self::Bool(v) => Self::Bool(!v),
            Self::Not(inner) => Arc::unwrap_or_clone(inner),
            other => Self::Not(Arc::new(other)),
        }
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Self::and_all([lhs, rhs])
    }

    pub fn and_all(conditions: impl IntoIterator<Item = Expr>) -> Self {
        let mut filtered = Vec::new();
        for condition in conditions {
            match condition {
                Self::Bool(true) => {}
                Self::Bool(false) => return Self::FALSE,
                Self::And(nested) => filtered.extend(nested),
                other => filtered.push(other),
            }
        }
        match filtered.len() {
            0 => Self::TRUE,
            1 => filtered.swap_remove(0),
            _ => Self::And(filtered),
        }
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Self::or_all([lhs, rhs])
    }

    pub fn or_all(conditions: impl IntoIterator<Item = Expr>) -> Self {
        let mut filtered = Vec::new();
        for condition in conditions {
            match condition {
                Self::Bool(false) => {}
                Self::Bool(true) => return Self::TRUE,
                Self::Or(nested) => filtered.extend(nested),
                other => filtered.push(other),
            }
        }
        match filtered.len() {
            0 => Self::FALSE,
            1 => filtered.swap_remove(0),
            _ => Self::Or(filtered),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Comparisons
    // ═══════════════════════════════════════════════════════════════════════

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        if lhs == rhs {
            return Self::TRUE;
        }
        match (&lhs, &rhs) {
            (Self::Bool(a), Self::Bool(b)) => return Self::Bool(a == b),
            (Self::Size(a), Self::Size(b)) => return Self::Bool(a == b),
            (Self::Ref(a), Self::Ref(b)) => return Self::Bool(a == b),
            (Self::Bool(true), _) => return rhs,
            (_, Self::Bool(true)) => return lhs,
            (Self::Bool(false), _) => return Self::not(rhs),
            (_, Self::Bool(false)) => return Self::not(lhs),
            _ => {}
        }
        if lhs.sort() == Sort::Size {
            let (lhs_base, lhs_offset) = split_offset(&lhs);
            let (rhs_base, rhs_offset) = split_offset(&rhs);
            if lhs_base == rhs_base {
                return Self::Bool(lhs_offset == rhs_offset);
            }
        }
        Self::Eq(Arc::new(lhs), Arc::new(rhs))
    }

    /// Signed `lhs <= rhs`
    pub fn le(lhs: Expr, rhs: Expr) -> Self {
        let (lhs_base, lhs_offset) = split_offset(&lhs);
        let (rhs_base, rhs_offset) = split_offset(&rhs);
        if lhs_base == rhs_base {
            return Self::Bool(lhs_offset <= rhs_offset);
        }
        Self::Le(Arc::new(lhs), Arc::new(rhs))
    }

    /// Signed `lhs < rhs`
    pub fn lt(lhs: Expr, rhs: Expr) -> Self {
        Self::not(Self::le(rhs, lhs))
    }

    /// Signed `lhs >= rhs`
    pub fn ge(lhs: Expr, rhs: Expr) -> Self {
        Self::le(rhs, lhs)
    }

    /// Signed `lhs > rhs`
    pub fn gt(lhs: Expr, rhs: Expr) -> Self {
        Self::lt(rhs, lhs)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Arithmetic
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        let (lhs_base, lhs_offset) = split_offset(&lhs);
        let (rhs_base, rhs_offset) = split_offset(&rhs);
        let offset = lhs_offset.wrapping_add(rhs_offset);
        match (lhs_base, rhs_base) {
            (None, None) => Self::Size(offset),
            (Some(base), None) | (None, Some(base)) => with_offset(base.clone(), offset),
            (Some(a), Some(b)) => match cancel_sub(a, b).or_else(|| cancel_sub(b, a)) {
                Some(base) => with_offset(base, offset),
                None => with_offset(Self::Add(Arc::new(a.clone()), Arc::new(b.clone())), offset),
            },
        }
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        let (lhs_base, lhs_offset) = split_offset(&lhs);
        let (rhs_base, rhs_offset) = split_offset(&rhs);
        let offset = lhs_offset.wrapping_sub(rhs_offset);
        match (lhs_base, rhs_base) {
            (None, None) => Self::Size(offset),
            (Some(base), None) => with_offset(base.clone(), offset),
            (Some(a), Some(b)) if a == b => Self::Size(offset),
            (a, Some(b)) => {
                if let Some(base) = a.and_then(|a| cancel_add(a, b)) {
                    return with_offset(base, offset);
                }
                let minuend = a.cloned().unwrap_or(Self::Size(0));
                with_offset(Self::Sub(Arc::new(minuend), Arc::new(b.clone())), offset)
            }
        }
    }

    pub fn ite(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        match cond {
            Self::Bool(true) => return then,
            Self::Bool(false) => return otherwise,
            _ => {}
        }
        if then == otherwise {
            return then;
        }
        match (&then, &otherwise) {
            (Self::Bool(true), Self::Bool(false)) => cond,
            (Self::Bool(false), Self::Bool(true)) => Self::not(cond),
            _ => Self::Ite {
                cond: Arc::new(cond),
                then: Arc::new(then),
                otherwise: Arc::new(otherwise),
            },
        }
    }

    /// Signed maximum
    pub fn max(lhs: Expr, rhs: Expr) -> Self {
        Self::ite(Self::ge(lhs.clone(), rhs.clone()), lhs, rhs)
    }
}

/// Split a size expression into `(symbolic base, constant offset)`.
///
/// Literals have no base; `x + c` splits into `(x, c)`; anything else is its
/// own base with offset 0.
fn split_offset(expr: &Expr) -> (Option<&Expr>, i64) {
    match expr {
        Expr::Size(value) => (None, *value),
        Expr::Add(base, offset) => match offset.as_ref() {
            Expr::Size(value) => (Some(base.as_ref()), *value),
            _ => (Some(expr), 0),
        },
        _ => (Some(expr), 0),
    }
}

fn with_offset(base: Expr, offset: i64) -> Expr {
    match base {
        Expr::Size(value) => Expr::Size(value.wrapping_add(offset)),
        base if offset == 0 => base,
        base => Expr::Add(Arc::new(base), Arc::new(Expr::Size(offset))),
    }
}

/// `(x - y) + y` is `x`
fn cancel_sub(diff: &Expr, addend: &Expr) -> Option<Expr> {
    match diff {
        Expr::Sub(x, y) if y.as_ref() == addend => Some(x.as_ref().clone()),
        _ => None,
    }
}

/// `(x + y) - y` is `x`, `(x + y) - x` is `y`
fn cancel_add(sum: &Expr, subtrahend: &Expr) -> Option<Expr> {
    match sum {
        Expr::Add(x, y) if y.as_ref() == subtrahend => Some(x.as_ref().clone()),
        Expr::Add(x, y) if x.as_ref() == subtrahend => Some(y.as_ref().clone()),
        _ => None,
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Size(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, op: &str, items: &[&Expr]) -> fmt::Result {
            write!(f, "({}", op)?;
            for item in items {
                write!(f, " {}", item)?;
            }
            write!(f, ")")
        }

        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Size(v) => write!(f, "{}", v),
            Self::Ref(NULL_ADDRESS) => write!(f, "null"),
            Self::Ref(address) => write!(f, "#{}", address),
            Self::Const { name, .. } => write!(f, "{}", name),
            Self::Input(reading) => match &reading.key {
                Some(key) => write!(f, "{}[{}, {}]", reading.collection, reading.instance, key),
                None => write!(f, "{}[{}]", reading.collection, reading.instance),
            },
            Self::Not(inner) => list(f, "not", &[&**inner]),
            Self::And(items) => list(f, "and", &items.iter().collect::<Vec<_>>()),
            Self::Or(items) => list(f, "or", &items.iter().collect::<Vec<_>>()),
            Self::Eq(a, b) => list(f, "=", &[&**a, &**b]),
            Self::Le(a, b) => list(f, "<=", &[&**a, &**b]),
            Self::Add(a, b) => list(f, "+", &[&**a, &**b]),
            Self::Sub(a, b) => list(f, "-", &[&**a, &**b]),
            Self::Ite {
                cond,
                then,
                otherwise,
            } => list(f, "ite", &[&**cond, &**then, &**otherwise]),
        }
    }
}
