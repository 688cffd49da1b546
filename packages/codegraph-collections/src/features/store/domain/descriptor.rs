//! Collection descriptors: namespace tags inside the shared store

use crate::features::expr::Sort;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// List elements keyed by (instance, index)
    List,
    /// Map values keyed by (instance, key)
    MapValue,
    /// Map membership flags keyed by (instance, key)
    MapContains,
}

/// Namespace tag: one per collection kind and element sort.
///
/// Unrelated collections never collide because every store entry is
/// addressed by its descriptor first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Descriptor {
    pub kind: CollectionKind,
    pub sort: Sort,
}

impl Descriptor {
    pub fn list(element_sort: Sort) -> Self {
        Self {
            kind: CollectionKind::List,
            sort: element_sort,
        }
    }

    pub fn map_value(value_sort: Sort) -> Self {
        Self {
            kind: CollectionKind::MapValue,
            sort: value_sort,
        }
    }

    pub fn map_contains(value_sort: Sort) -> Self {
        Self {
            kind: CollectionKind::MapContains,
            sort: value_sort,
        }
    }

    /// Sort of the values stored under this descriptor
    pub fn value_sort(&self) -> Sort {
        match self.kind {
            CollectionKind::MapContains => Sort::Bool,
            CollectionKind::List | CollectionKind::MapValue => self.sort,
        }
    }

    /// Sort of the inner (non-instance) key dimension
    pub fn key_sort(&self) -> Sort {
        match self.kind {
            CollectionKind::List => Sort::Size,
            CollectionKind::MapValue | CollectionKind::MapContains => Sort::Ref,
        }
    }

    pub fn is_list(&self) -> bool {
        self.kind == CollectionKind::List
    }

    /// Label used for input readings of this descriptor
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            CollectionKind::List => "list",
            CollectionKind::MapValue => "map",
            CollectionKind::MapContains => "map_contains",
        };
        write!(f, "{}<{}>", kind, self.sort)
    }
}
