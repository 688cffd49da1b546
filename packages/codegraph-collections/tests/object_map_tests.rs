//! Symbolic object map protocol tests

use codegraph_collections::features::collections::MERGED_SIZE_PREFIX;
use codegraph_collections::features::expr::HeapAddress;
use codegraph_collections::{
    CollectionConfig, CollectionState, Expr, Model, ModelValue, ObjectMap, Sort, SymbolicStore,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const INPUT_MAP: HeapAddress = 2_000;
const OTHER_MAP: HeapAddress = 3_000;

fn setup() -> (CollectionState, ObjectMap) {
    let config = CollectionConfig::default();
    (
        CollectionState::in_memory(&config),
        ObjectMap::new(Sort::Size, config),
    )
}

fn constant_name(expr: &Expr) -> Arc<str> {
    match expr {
        Expr::Const { name, .. } => name.clone(),
        other => panic!("expected a free constant, got {}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Size invariants
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_put_same_key_twice_grows_by_one() {
    let (mut state, map) = setup();
    let m = map.create(&mut state).unwrap();
    let k = state.store.allocate();

    map.put(&mut state, &m, &k, Expr::size(1)).unwrap();
    map.put(&mut state, &m, &k, Expr::size(2)).unwrap();

    assert_eq!(map.size(&state, &m).unwrap(), Expr::size(1));
    assert_eq!(map.get(&state, &m, &k).unwrap(), Expr::size(2));
}

#[test]
fn test_put_same_symbolic_key_twice_grows_by_one() {
    let (mut state, map) = setup();
    let m = map.create(&mut state).unwrap();
    let k = Expr::constant("k", Sort::Ref);

    map.put(&mut state, &m, &k, Expr::size(1)).unwrap();
    map.put(&mut state, &m, &k, Expr::size(2)).unwrap();

    assert_eq!(map.size(&state, &m).unwrap(), Expr::size(1));
}

#[test]
fn test_put_two_symbolic_keys_depends_on_aliasing() {
    let (mut state, map) = setup();
    let m = map.create(&mut state).unwrap();
    let k1 = Expr::constant("k1", Sort::Ref);
    let k2 = Expr::constant("k2", Sort::Ref);

    map.put(&mut state, &m, &k1, Expr::size(1)).unwrap();
    map.put(&mut state, &m, &k2, Expr::size(2)).unwrap();
    let size = map.size(&state, &m).unwrap();
    let first = map.get(&state, &m, &k1).unwrap();

    let aliased = Model::new()
        .with_constant("k1", ModelValue::Ref(50))
        .with_constant("k2", ModelValue::Ref(50));
    let distinct = Model::new()
        .with_constant("k1", ModelValue::Ref(50))
        .with_constant("k2", ModelValue::Ref(51));

    assert_eq!(aliased.eval_size(&size), 1);
    assert_eq!(aliased.eval_size(&first), 2);
    assert_eq!(distinct.eval_size(&size), 2);
    assert_eq!(distinct.eval_size(&first), 1);
}

#[test]
fn test_remove_twice_shrinks_by_at_most_one() {
    let (mut state, map) = setup();
    let m = map.create(&mut state).unwrap();
    let k = state.store.allocate();
    let other = state.store.allocate();

    map.put(&mut state, &m, &k, Expr::size(1)).unwrap();
    map.put(&mut state, &m, &other, Expr::size(1)).unwrap();
    map.remove(&mut state, &m, &k).unwrap();
    map.remove(&mut state, &m, &k).unwrap();

    assert_eq!(map.size(&state, &m).unwrap(), Expr::size(1));
    assert_eq!(map.contains(&state, &m, &k).unwrap(), Expr::FALSE);
    assert_eq!(map.contains(&state, &m, &other).unwrap(), Expr::TRUE);
}

#[test]
fn test_remove_twice_on_input_map() {
    let (mut state, map) = setup();
    let m = Expr::constant("m", Sort::Ref);
    let k = Expr::constant("k", Sort::Ref);

    let before = map.size(&state, &m).unwrap();
    map.remove(&mut state, &m, &k).unwrap();
    map.remove(&mut state, &m, &k).unwrap();
    let after = map.size(&state, &m).unwrap();

    let contains_label = map.contains_descriptor().label();
    for present in [false, true] {
        for s in 1..4i64 {
            let mut model = Model::new()
                .with_constant("m", ModelValue::Ref(INPUT_MAP))
                .with_constant("k", ModelValue::Ref(60));
            model.set_input(
                contains_label.as_str(),
                ModelValue::Ref(INPUT_MAP),
                None,
                ModelValue::Size(s),
            );
            model.set_input(
                contains_label.as_str(),
                ModelValue::Ref(INPUT_MAP),
                Some(ModelValue::Ref(60)),
                ModelValue::Bool(present),
            );

            let expected = if present { s - 1 } else { s };
            assert_eq!(model.eval_size(&before), s);
            assert_eq!(model.eval_size(&after), expected);
        }
    }
}

#[test]
fn test_absent_key_is_not_null_punned() {
    let (mut state, map) = setup();
    let m = map.create(&mut state).unwrap();
    let k = state.store.allocate();

    assert_eq!(map.contains(&state, &m, &k).unwrap(), Expr::FALSE);
    assert_eq!(map.get(&state, &m, &k).unwrap(), Expr::size(0));

    let refs = ObjectMap::new(Sort::Ref, CollectionConfig::default());
    let r = refs.create(&mut state).unwrap();
    assert_eq!(refs.get(&state, &r, &k).unwrap(), Expr::null());
}

#[test]
fn test_maps_do_not_alias() {
    let (mut state, map) = setup();
    let a = map.create(&mut state).unwrap();
    let b = map.create(&mut state).unwrap();
    let k = state.store.allocate();

    map.put(&mut state, &a, &k, Expr::size(1)).unwrap();

    assert_eq!(map.contains(&state, &b, &k).unwrap(), Expr::FALSE);
    assert_eq!(map.size(&state, &b).unwrap(), Expr::size(0));
}

// ═══════════════════════════════════════════════════════════════════════════
// Merge
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_merge_size_is_sound_lower_bound() {
    let (mut state, map) = setup();
    let dst = map.create(&mut state).unwrap();
    let src = map.create(&mut state).unwrap();

    for v in 0..3 {
        let k = state.store.allocate();
        map.put(&mut state, &dst, &k, Expr::size(v)).unwrap();
    }
    for v in 0..2 {
        let k = state.store.allocate();
        map.put(&mut state, &src, &k, Expr::size(v)).unwrap();
    }

    map.merge_into(&mut state, &dst, &src).unwrap();
    let merged = map.size(&state, &dst).unwrap();
    let name = constant_name(&merged);
    assert!(name.starts_with(MERGED_SIZE_PREFIX));

    let satisfying: Vec<i64> = (0..=10)
        .filter(|m| {
            let model = Model::new().with_constant(name.clone(), ModelValue::Size(*m));
            state.constraints.is_satisfied_by(&model)
        })
        .collect();

    // m >= 3 and m >= 5 hold in every model; m is not pinned to 5
    assert!(satisfying.iter().all(|m| *m >= 3 && *m >= 5));
    assert!(satisfying.contains(&5));
    assert!(satisfying.contains(&6));
    assert_eq!(satisfying, (5..=10).collect::<Vec<_>>());
}

#[test]
fn test_merge_src_wins_on_shared_keys() {
    let (mut state, map) = setup();
    let dst = map.create(&mut state).unwrap();
    let src = map.create(&mut state).unwrap();
    let shared = state.store.allocate();
    let dst_only = state.store.allocate();
    let src_only = state.store.allocate();
    let nowhere = state.store.allocate();

    map.put(&mut state, &dst, &shared, Expr::size(1)).unwrap();
    map.put(&mut state, &dst, &dst_only, Expr::size(2)).unwrap();
    map.put(&mut state, &src, &shared, Expr::size(3)).unwrap();
    map.put(&mut state, &src, &src_only, Expr::size(4)).unwrap();
    map.merge_into(&mut state, &dst, &src).unwrap();

    assert_eq!(map.get(&state, &dst, &shared).unwrap(), Expr::size(3));
    assert_eq!(map.get(&state, &dst, &dst_only).unwrap(), Expr::size(2));
    assert_eq!(map.get(&state, &dst, &src_only).unwrap(), Expr::size(4));
    assert_eq!(map.contains(&state, &dst, &src_only).unwrap(), Expr::TRUE);
    assert_eq!(map.contains(&state, &dst, &nowhere).unwrap(), Expr::FALSE);

    // src itself is untouched
    assert_eq!(map.contains(&state, &src, &dst_only).unwrap(), Expr::FALSE);
    assert_eq!(map.size(&state, &src).unwrap(), Expr::size(2));
}

#[test]
fn test_merge_with_symbolic_source_key() {
    let (mut state, map) = setup();
    let dst = map.create(&mut state).unwrap();
    let src = map.create(&mut state).unwrap();
    let fixed = state.store.allocate();
    let ks = Expr::constant("ks", Sort::Ref);

    map.put(&mut state, &dst, &fixed, Expr::size(1)).unwrap();
    map.put(&mut state, &src, &ks, Expr::size(9)).unwrap();
    map.merge_into(&mut state, &dst, &src).unwrap();

    let read = map.get(&state, &dst, &fixed).unwrap();
    let fixed_address = fixed.as_heap_ref().unwrap();

    let hit = Model::new().with_constant("ks", ModelValue::Ref(fixed_address));
    let miss = Model::new().with_constant("ks", ModelValue::Ref(fixed_address + 100));
    assert_eq!(hit.eval_size(&read), 9);
    assert_eq!(miss.eval_size(&read), 1);
}

#[test]
fn test_put_after_merge_uses_merged_size() {
    let (mut state, map) = setup();
    let dst = map.create(&mut state).unwrap();
    let src = map.create(&mut state).unwrap();
    map.merge_into(&mut state, &dst, &src).unwrap();

    let merged = map.size(&state, &dst).unwrap();
    let k = state.store.allocate();
    map.put(&mut state, &dst, &k, Expr::size(1)).unwrap();

    assert_eq!(
        map.size(&state, &dst).unwrap(),
        Expr::add(merged, Expr::size(1))
    );
}

#[test]
fn test_merge_of_forked_branches() {
    let (mut state, map) = setup();
    let m = map.create(&mut state).unwrap();
    let k = state.store.allocate();

    let mut branch = state.fork();
    let shadow = map.create(&mut branch).unwrap();
    map.put(&mut branch, &shadow, &k, Expr::size(7)).unwrap();
    map.merge_into(&mut branch, &m, &shadow).unwrap();

    assert_eq!(map.get(&branch, &m, &k).unwrap(), Expr::size(7));
    assert_eq!(map.contains(&state, &m, &k).unwrap(), Expr::FALSE);
}

#[test]
fn test_merge_symbolic_source_into_concrete_map() {
    let (mut state, map) = setup();
    let src = Expr::constant("src", Sort::Ref);
    let dst = map.create(&mut state).unwrap();
    let k = state.store.allocate();
    map.put(&mut state, &dst, &k, Expr::size(1)).unwrap();

    map.merge_into(&mut state, &dst, &src).unwrap();
    let read = map.get(&state, &dst, &k).unwrap();
    let merged = constant_name(&map.size(&state, &dst).unwrap());

    let key = ModelValue::Ref(k.as_heap_ref().unwrap());
    let values_label = map.value_descriptor().label();
    let contains_label = map.contains_descriptor().label();
    for present in [false, true] {
        let mut model = Model::new().with_constant("src", ModelValue::Ref(INPUT_MAP));
        model.set_input(
            contains_label.as_str(),
            ModelValue::Ref(INPUT_MAP),
            Some(key),
            ModelValue::Bool(present),
        );
        model.set_input(
            values_label.as_str(),
            ModelValue::Ref(INPUT_MAP),
            Some(key),
            ModelValue::Size(8),
        );
        assert_eq!(model.eval_size(&read), if present { 8 } else { 1 });
    }

    // |src| = 3, |dst| = 1: the merged size is at least 4
    let mut model = Model::new().with_constant("src", ModelValue::Ref(INPUT_MAP));
    model.set_input(
        contains_label.as_str(),
        ModelValue::Ref(INPUT_MAP),
        None,
        ModelValue::Size(3),
    );
    let at = |m: i64| model.clone().with_constant(merged.clone(), ModelValue::Size(m));
    assert!(state.constraints.is_satisfied_by(&at(4)));
    assert!(!state.constraints.is_satisfied_by(&at(3)));
}

#[test]
fn test_merge_concrete_source_into_symbolic_map() {
    let (mut state, map) = setup();
    let src = map.create(&mut state).unwrap();
    let dst = Expr::constant("dst", Sort::Ref);
    let k = state.store.allocate();
    let untouched = state.store.allocate();
    map.put(&mut state, &src, &k, Expr::size(4)).unwrap();

    map.merge_into(&mut state, &dst, &src).unwrap();

    assert_eq!(map.get(&state, &dst, &k).unwrap(), Expr::size(4));
    assert_eq!(map.contains(&state, &dst, &k).unwrap(), Expr::TRUE);
    assert_eq!(
        map.get(&state, &dst, &untouched).unwrap(),
        Expr::input(
            map.value_descriptor().label(),
            dst.clone(),
            Some(untouched.clone()),
            Sort::Size
        )
    );
}

#[test]
fn test_merge_between_symbolic_maps() {
    let (mut state, map) = setup();
    let src = Expr::constant("src", Sort::Ref);
    let dst = Expr::constant("dst", Sort::Ref);
    let written = state.store.allocate();
    let inherited = state.store.allocate();
    map.put(&mut state, &src, &written, Expr::size(5)).unwrap();

    map.merge_into(&mut state, &dst, &src).unwrap();
    assert_eq!(map.get(&state, &dst, &written).unwrap(), Expr::size(5));

    let read = map.get(&state, &dst, &inherited).unwrap();
    let key = ModelValue::Ref(inherited.as_heap_ref().unwrap());
    let values_label = map.value_descriptor().label();
    let contains_label = map.contains_descriptor().label();
    for present in [false, true] {
        let mut model = Model::new()
            .with_constant("src", ModelValue::Ref(INPUT_MAP))
            .with_constant("dst", ModelValue::Ref(OTHER_MAP));
        model.set_input(
            contains_label.as_str(),
            ModelValue::Ref(INPUT_MAP),
            Some(key),
            ModelValue::Bool(present),
        );
        model.set_input(
            values_label.as_str(),
            ModelValue::Ref(INPUT_MAP),
            Some(key),
            ModelValue::Size(6),
        );
        model.set_input(
            values_label.as_str(),
            ModelValue::Ref(OTHER_MAP),
            Some(key),
            ModelValue::Size(7),
        );
        assert_eq!(model.eval_size(&read), if present { 6 } else { 7 });
    }
}

#[test]
fn test_ensure_size_correct_on_input_map() {
    let config = CollectionConfig::default().max_input_size(10);
    let mut state = CollectionState::in_memory(&config);
    let map = ObjectMap::new(Sort::Bool, config);
    let m = Expr::constant("m", Sort::Ref);
    map.ensure_size_correct(&mut state, &m).unwrap();

    let label = map.contains_descriptor().label();
    for (size, ok) in [(-1, false), (0, true), (10, true), (11, false)] {
        let mut model = Model::new().with_constant("m", ModelValue::Ref(INPUT_MAP));
        model.set_input(label.as_str(), ModelValue::Ref(INPUT_MAP), None, ModelValue::Size(size));
        assert_eq!(state.constraints.is_satisfied_by(&model), ok, "size={}", size);
    }
}
