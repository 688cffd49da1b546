//! Property-based tests for the region lattice and key-info tables
//!
//! Invariants that should hold for ALL inputs:
//! - Soundness: lattice operations never drop a concrete key
//! - Disjointness: `Disjoint` answers are never wrong
//! - Products: disjoint iff some component is disjoint

use codegraph_collections::features::key_info::{
    ArrayIndexKeyInfo, HeapRefKeyInfo, IndexKeyInfo, KeyInfo, KeyInfoError,
};
use codegraph_collections::features::regions::{
    ProductRegion, Region, RegionComparison, SetRegion,
};
use codegraph_collections::{Expr, Sort};
use proptest::prelude::*;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use std::collections::BTreeSet;

fn region_strategy() -> impl Strategy<Value = SetRegion<i64>> {
    prop_oneof![
        Just(SetRegion::Empty),
        Just(SetRegion::Universe),
        (-8i64..8).prop_map(SetRegion::singleton),
        prop::collection::btree_set(-8i64..8, 0..6).prop_map(SetRegion::from_values),
    ]
}

// ============================================================================
// QuickCheck Tests
// ============================================================================

#[quickcheck]
fn qc_distinct_concrete_indices_are_disjoint(a: i64, b: i64) -> TestResult {
    if a == b {
        return TestResult::discard();
    }
    let info = IndexKeyInfo::default();
    let ra = info.key_to_region(&Expr::size(a));
    let rb = info.key_to_region(&Expr::size(b));
    TestResult::from_bool(ra.is_disjoint(&rb) && rb.is_disjoint(&ra))
}

#[quickcheck]
fn qc_distinct_concrete_refs_are_disjoint(a: u64, b: u64) -> TestResult {
    if a == b {
        return TestResult::discard();
    }
    let info = HeapRefKeyInfo;
    let ra = info.key_to_region(&Expr::heap_ref(a));
    let rb = info.key_to_region(&Expr::heap_ref(b));
    TestResult::from_bool(ra.is_disjoint(&rb))
}

#[quickcheck]
fn qc_symbolic_keys_map_to_universe(offset: i64) -> bool {
    let n = Expr::constant("n", Sort::Size);
    let key = Expr::add(n, Expr::size(offset));
    let r = Expr::constant("r", Sort::Ref);

    IndexKeyInfo::default().key_to_region(&key).is_universe()
        && HeapRefKeyInfo.key_to_region(&r).is_universe()
}

#[quickcheck]
fn qc_heap_refs_never_ordered(a: u64, b: u64) -> bool {
    let info = HeapRefKeyInfo;
    let (a, b) = (Expr::heap_ref(a), Expr::heap_ref(b));
    matches!(
        info.cmp_symbolic(&a, &b),
        Err(KeyInfoError::NotComparable { .. })
    ) && matches!(
        info.cmp_concrete(&a, &b),
        Err(KeyInfoError::NotComparable { .. })
    )
}

#[quickcheck]
fn qc_composite_ref_first_not_comparable(instance: u64, i: i64, j: i64) -> bool {
    let info = ArrayIndexKeyInfo::default();
    let a = (Expr::heap_ref(instance), Expr::size(i));
    let b = (Expr::heap_ref(instance), Expr::size(j));
    info.cmp_symbolic(&a, &b).is_err() && info.cmp_concrete(&a, &b).is_err()
}

// ============================================================================
// Proptest Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_product_disjoint_iff_component_disjoint(
        r1 in 0u64..4, r2 in 0u64..4,
        i1 in 0i64..4, i2 in 0i64..4,
    ) {
        let info = ArrayIndexKeyInfo::default();
        let a = info.key_to_region(&(Expr::heap_ref(r1), Expr::size(i1)));
        let b = info.key_to_region(&(Expr::heap_ref(r2), Expr::size(i2)));

        // ref equal + index disjoint, or ref disjoint + index equal: still disjoint
        prop_assert_eq!(a.is_disjoint(&b), r1 != r2 || i1 != i2);
    }

    #[test]
    fn prop_product_compare_matches_components(
        a1 in region_strategy(), a2 in region_strategy(),
        b1 in region_strategy(), b2 in region_strategy(),
    ) {
        let a = ProductRegion::new(a1.clone(), a2.clone());
        let b = ProductRegion::new(b1.clone(), b2.clone());
        if !a.is_empty() && !b.is_empty() {
            let expected = a1.is_disjoint(&b1) || a2.is_disjoint(&b2);
            prop_assert_eq!(a.is_disjoint(&b), expected);
        }
    }

    #[test]
    fn prop_set_operations_are_sound(
        a in prop::collection::btree_set(-8i64..8, 0..6),
        b in prop::collection::btree_set(-8i64..8, 0..6),
    ) {
        let ra = SetRegion::from_values(a.iter().copied());
        let rb = SetRegion::from_values(b.iter().copied());

        for v in -8i64..8 {
            let (in_a, in_b) = (a.contains(&v), b.contains(&v));
            if in_a && in_b {
                prop_assert!(ra.intersect(&rb).contains(&v));
            }
            if in_a || in_b {
                prop_assert!(ra.union(&rb).contains(&v));
            }
            if in_a && !in_b {
                prop_assert!(ra.subtract(&rb).contains(&v));
            }
        }
    }

    #[test]
    fn prop_compare_is_never_unsound(
        a in prop::collection::btree_set(-8i64..8, 0..6),
        b in prop::collection::btree_set(-8i64..8, 0..6),
    ) {
        let ra = SetRegion::from_values(a.iter().copied());
        let rb = SetRegion::from_values(b.iter().copied());

        match ra.compare(&rb) {
            RegionComparison::Disjoint => prop_assert!(a.is_disjoint(&b)),
            RegionComparison::Includes => prop_assert!(b.is_subset(&a)),
            RegionComparison::Intersects => {
                prop_assert!(!a.is_disjoint(&b));
                prop_assert!(!b.is_subset(&a));
            }
        }
    }

    #[test]
    fn prop_universe_absorbs(r in region_strategy()) {
        let universe = SetRegion::<i64>::universe();
        prop_assert!(universe.includes(&r));
        prop_assert_eq!(universe.union(&r), SetRegion::Universe);
        prop_assert_eq!(universe.intersect(&r), r.clone());
        prop_assert!(r.subtract(&universe).is_empty());
    }

    #[test]
    fn prop_concrete_range_matches_enumeration(from in -20i64..20, len in 0i64..30) {
        let info = IndexKeyInfo::default();
        let to = from + len - 1;
        let region = info.key_range_region(&Expr::size(from), &Expr::size(to)).unwrap();
        let expected: BTreeSet<i64> = (from..=to).collect();
        prop_assert_eq!(region, SetRegion::from_values(expected));
    }
}
