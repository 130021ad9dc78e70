// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use duokey::{
    errors::{Argument, Error, MissingKey},
    CompositeKey, DuoKeyMap,
};
use duokey_test_utils::{
    eq_props::{assert_eq_props, assert_ne_props},
    naive_map::NaiveMap,
    test_entry::{
        entry_permutation_strategy, make_map, sorted_entries, HashBuilder,
        TestEntry, TestKey,
    },
};
use proptest::prelude::*;
use test_strategy::{proptest, Arbitrary};

#[test]
fn debug_impls() {
    let mut map = make_map();
    map.add(1, 'a', 10).unwrap();

    assert_eq!(format!("{map:?}"), "{{id: 1, name: 'a'}: 10}");
    assert_eq!(
        format!("{:?}", map.get_by_id(&1).unwrap()),
        "ById { id: 1, remaining: ['a'], .. }"
    );
}

#[test]
fn with_capacity() {
    let map = DuoKeyMap::<u8, char, u32, HashBuilder>::with_capacity_and_hasher(
        1024,
        HashBuilder::default(),
    );
    assert!(map.capacity() >= 1024);
    assert!(map.is_empty());
}

#[test]
fn add_rejects_duplicate_pairs() {
    let mut map = make_map();
    map.add(1, 'a', 10).unwrap();

    assert_eq!(
        map.add(1, 'a', 20),
        Err(Error::KeyAlreadyExists { id: 1, name: 'a' })
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1, &'a'), Ok(&10));
    map.validate().expect("map should be valid");

    // The same id with another name, or the same name with another id, is a
    // different key.
    map.add(1, 'b', 30).unwrap();
    map.add(2, 'a', 40).unwrap();
    assert_eq!(map.len(), 3);
    map.validate().expect("map should be valid");
}

#[test]
fn add_rejects_null_arguments() {
    let mut map: DuoKeyMap<Option<u8>, Option<char>, Option<u32>, HashBuilder> =
        DuoKeyMap::with_hasher(HashBuilder::default());

    assert_eq!(
        map.add(None, None, None),
        Err(Error::NullArgument { argument: Argument::Id })
    );
    assert_eq!(
        map.add(Some(1), None, None),
        Err(Error::NullArgument { argument: Argument::Name })
    );
    assert_eq!(
        map.add(Some(1), Some('a'), None),
        Err(Error::NullArgument { argument: Argument::Value })
    );
    assert_eq!(
        map.set(Some(1), None, Some(1)),
        Err(Error::NullArgument { argument: Argument::Name })
    );
    assert!(map.is_empty());
    assert!(!map.contains_id(&Some(1)));
    map.validate().expect("map should be valid");

    map.add(Some(1), Some('a'), Some(5)).unwrap();
    assert_eq!(map.get(&Some(1), &Some('a')), Ok(&Some(5)));
}

#[test]
fn remove_rejects_null_key_parts() {
    let mut map: DuoKeyMap<Option<u8>, Option<char>, u32, HashBuilder> =
        DuoKeyMap::with_hasher(HashBuilder::default());
    map.add(Some(1), Some('a'), 1).unwrap();

    assert_eq!(
        map.remove(&None, &Some('a')),
        Err(Error::NullArgument { argument: Argument::Id })
    );
    assert_eq!(
        map.remove(&None, &None),
        Err(Error::NullArgument { argument: Argument::Id })
    );
    assert_eq!(
        map.take(&Some(1), &None),
        Err(Error::NullArgument { argument: Argument::Name })
    );
    // A null part is rejected even when the other part is unknown.
    assert_eq!(
        map.remove(&Some(9), &None),
        Err(Error::NullArgument { argument: Argument::Name })
    );
    assert_eq!(map.len(), 1);
    map.validate().expect("map should be valid");

    assert_eq!(map.remove(&Some(1), &Some('a')), Ok(true));
}

#[test]
fn remove_fast_rejects_unknown_parts() {
    let mut map = make_map();
    assert_eq!(map.remove(&99, &'g'), Ok(false));

    map.add(1, 'a', 10).unwrap();
    map.add(2, 'b', 20).unwrap();

    // Unknown id, known name.
    assert_eq!(map.remove(&9, &'a'), Ok(false));
    // Known id, unknown name.
    assert_eq!(map.remove(&1, &'z'), Ok(false));
    // Both parts known, but never paired.
    assert_eq!(map.remove(&1, &'b'), Ok(false));
    assert_eq!(map.len(), 2);

    assert_eq!(map.remove(&1, &'a'), Ok(true));
    assert_eq!(map.remove(&1, &'a'), Ok(false));
    assert_eq!(map.take(&2, &'b'), Ok(Some(20)));
    assert!(map.is_empty());
    map.validate().expect("map should be valid");
}

#[test]
fn partial_key_lookups_return_every_match() {
    let mut map = make_map();
    map.add(1, 'a', 10).unwrap();
    map.add(1, 'b', 11).unwrap();
    map.add(1, 'c', 12).unwrap();
    map.add(2, 'a', 20).unwrap();

    let by_id: Vec<_> = map.get_by_id(&1).unwrap().collect();
    assert_eq!(by_id, [(&'a', &10), (&'b', &11), (&'c', &12)]);

    let by_name: Vec<_> = map.get_by_name(&'a').unwrap().collect();
    assert_eq!(by_name, [(&1, &10), (&2, &20)]);

    // The iterators are restartable, and see later changes.
    map.remove(&1, &'b').unwrap();
    let by_id: Vec<_> = map.get_by_id(&1).unwrap().collect();
    assert_eq!(by_id, [(&'a', &10), (&'c', &12)]);

    assert_eq!(
        map.get_by_id(&7).unwrap_err(),
        Error::KeyNotFound(MissingKey::Id(7))
    );
    assert_eq!(
        map.get_by_name(&'q').unwrap_err(),
        Error::KeyNotFound(MissingKey::Name('q'))
    );
}

#[test]
fn first_match_follows_insertion_order() {
    let mut map = make_map();
    map.add(1, 'c', 10).unwrap();
    map.add(1, 'a', 11).unwrap();
    map.add(2, 'a', 20).unwrap();

    assert_eq!(map.try_get_by_id(&1), Ok(Some(&10)));
    assert_eq!(map.try_get_by_name(&'a'), Ok(Some(&11)));

    // Overwriting doesn't move a pair to the back.
    map.set(1, 'c', 15).unwrap();
    assert_eq!(map.try_get_by_id(&1), Ok(Some(&15)));

    // Removing and re-adding does.
    map.remove(&1, &'c').unwrap();
    map.add(1, 'c', 16).unwrap();
    assert_eq!(map.try_get_by_id(&1), Ok(Some(&11)));

    assert_eq!(map.try_get_by_id(&9), Ok(None));
    assert_eq!(map.try_get_by_name(&'z'), Ok(None));
}

#[test]
fn set_creates_and_overwrites() {
    let mut map = make_map();
    assert_eq!(map.set(1, 'a', 10), Ok(None));
    assert_eq!(map.set(1, 'a', 20), Ok(Some(10)));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1, &'a'), Ok(&20));
    assert_eq!(map.get_by_id(&1).unwrap().count(), 1);
    map.validate().expect("map should be valid");

    *map.get_mut(&1, &'a').unwrap() += 1;
    assert_eq!(map.try_get(&1, &'a'), Some(&21));
    assert_eq!(
        map.get(&2, &'a'),
        Err(Error::KeyNotFound(MissingKey::Pair(2, 'a')))
    );
}

#[test]
fn clear_is_idempotent() {
    let mut map = make_map();
    map.clear();
    assert!(map.is_empty());

    map.add(1, 'a', 10).unwrap();
    map.add(2, 'b', 20).unwrap();
    map.clear();
    map.clear();
    assert!(map.is_empty());
    assert!(!map.contains_id(&1));
    assert!(!map.contains_name(&'b'));
    assert_eq!(map.ids().count(), 0);
    assert_eq!(map.names().count(), 0);
    assert_eq!(map.try_get_by_id(&1), Ok(None));
    map.validate().expect("map should be valid");

    // The map is usable after clearing.
    map.add(1, 'a', 30).unwrap();
    assert_eq!(map.get(&1, &'a'), Ok(&30));
}

#[test]
fn no_stale_index_entries() {
    let mut map = make_map();
    map.add(1, 'a', 10).unwrap();
    map.add(1, 'b', 11).unwrap();

    map.remove(&1, &'a').unwrap();
    assert!(map.contains_id(&1));
    assert!(!map.contains_name(&'a'));

    map.remove(&1, &'b').unwrap();
    assert!(!map.contains_id(&1));
    assert!(!map.contains_name(&'b'));
    assert_eq!(map.ids().count(), 0);
    map.validate().expect("map should be valid");
}

#[test]
fn contains_checks() {
    let mut map = make_map();
    map.add(1, 'a', 10).unwrap();

    assert!(map.contains_key(&1, &'a'));
    assert!(!map.contains_key(&1, &'b'));
    assert!(map.contains_id(&1));
    assert!(!map.contains_id(&2));
    assert!(map.contains_name(&'a'));
    assert!(!map.contains_name(&'b'));
    assert!(map.contains_value(&10));
    assert!(!map.contains_value(&11));
}

#[test]
fn iterators() {
    let mut map = make_map();
    map.add(1, 'a', 10).unwrap();
    map.add(1, 'b', 11).unwrap();
    map.add(2, 'a', 20).unwrap();

    let mut entries: Vec<_> = map.iter().collect();
    entries.sort();
    assert_eq!(entries, [(&1, &'a', &10), (&1, &'b', &11), (&2, &'a', &20)]);
    assert_eq!(map.iter().len(), 3);

    let mut keys: Vec<_> = map.keys().copied().collect();
    keys.sort_by_key(|key| (*key.id(), *key.name()));
    assert_eq!(
        keys,
        [
            CompositeKey::new(1, 'a'),
            CompositeKey::new(1, 'b'),
            CompositeKey::new(2, 'a'),
        ]
    );

    let mut values: Vec<_> = map.values().copied().collect();
    values.sort();
    assert_eq!(values, [10, 11, 20]);

    let mut ids: Vec<_> = map.ids().copied().collect();
    ids.sort();
    assert_eq!(ids, [1, 2]);

    let mut names: Vec<_> = map.names().copied().collect();
    names.sort();
    assert_eq!(names, ['a', 'b']);

    let mut owned: Vec<_> = map.into_iter().collect();
    owned.sort();
    assert_eq!(owned, [(1, 'a', 10), (1, 'b', 11), (2, 'a', 20)]);
}

#[test]
fn extend_overwrites() {
    let mut map = make_map();
    map.extend([(1, 'a', 10), (2, 'b', 20), (1, 'a', 30)]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1, &'a'), Ok(&30));
    map.validate().expect("map should be valid");

    let collected: DuoKeyMap<u8, char, u32, HashBuilder> =
        [(3, 'c', 1), (3, 'c', 2)].into_iter().collect();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected.get(&3, &'c'), Ok(&2));
}

#[test]
#[should_panic(expected = "the value is null")]
fn extend_panics_on_null() {
    let mut map: DuoKeyMap<u8, char, Option<u32>, HashBuilder> =
        DuoKeyMap::with_hasher(HashBuilder::default());
    map.extend([(1, 'a', None)]);
}

#[test]
fn error_messages() {
    let error: Error<u8, char> = Error::KeyAlreadyExists { id: 1, name: 'a' };
    assert_eq!(error.to_string(), "key (1, 'a') already exists");

    let error: Error<u8, char> = Error::KeyNotFound(MissingKey::Name('z'));
    assert_eq!(error.to_string(), "name 'z' does not exist");

    let error: Error<u8, char> =
        Error::NullArgument { argument: Argument::Name };
    assert_eq!(error.to_string(), "the name argument is null");
}

#[derive(Debug, Arbitrary)]
enum Operation {
    // Make adds a bit more common to try and fill up the map.
    #[weight(3)]
    Add(TestEntry),
    #[weight(2)]
    Set(TestEntry),
    Get(TestKey),
    GetById(#[strategy(0u8..8)] u8),
    GetByName(#[strategy(proptest::char::range('a', 'f'))] char),
    ContainsValue(u32),
    #[weight(2)]
    Remove(TestKey),
    Clear,
}

#[proptest(cases = 32)]
fn proptest_ops(
    #[strategy(prop::collection::vec(any::<Operation>(), 0..512))] ops: Vec<
        Operation,
    >,
) {
    let mut map = make_map();
    let mut naive_map = NaiveMap::new();

    for op in ops {
        match op {
            Operation::Add(entry) => {
                let (id, name, value) = entry.into_triple();
                let map_res = map.add(id, name, value);
                let naive_res = naive_map.add(entry);
                assert_eq!(
                    map_res.is_ok(),
                    naive_res,
                    "map and naive map should agree on add result"
                );
                if let Err(error) = map_res {
                    assert_eq!(error, Error::KeyAlreadyExists { id, name });
                }
                map.validate().expect("map should be valid");
            }
            Operation::Set(entry) => {
                let (id, name, value) = entry.into_triple();
                let map_res = map.set(id, name, value).unwrap();
                let naive_res = naive_map.set(entry);
                assert_eq!(map_res, naive_res);
                map.validate().expect("map should be valid");
            }
            Operation::Get(key) => {
                let map_res = map.try_get(&key.id, &key.name).copied();
                assert_eq!(map_res, naive_map.get(key));
                assert_eq!(
                    map.contains_key(&key.id, &key.name),
                    map_res.is_some()
                );
            }
            Operation::GetById(id) => {
                let map_res = map.try_get_by_id(&id).unwrap().copied();
                assert_eq!(map_res, naive_map.first_by_id(id));

                let map_all: Vec<_> = match map.get_by_id(&id) {
                    Ok(iter) => iter.map(|(&n, &v)| (n, v)).collect(),
                    Err(_) => Vec::new(),
                };
                assert_eq!(map_all, naive_map.by_id(id));
            }
            Operation::GetByName(name) => {
                let map_res = map.try_get_by_name(&name).unwrap().copied();
                assert_eq!(map_res, naive_map.first_by_name(name));

                let map_all: Vec<_> = match map.get_by_name(&name) {
                    Ok(iter) => iter.map(|(&i, &v)| (i, v)).collect(),
                    Err(_) => Vec::new(),
                };
                assert_eq!(map_all, naive_map.by_name(name));
            }
            Operation::ContainsValue(value) => {
                assert_eq!(
                    map.contains_value(&value),
                    naive_map.contains_value(value)
                );
            }
            Operation::Remove(key) => {
                let map_res = map.take(&key.id, &key.name).unwrap();
                assert_eq!(map_res, naive_map.take(key));
                map.validate().expect("map should be valid");
            }
            Operation::Clear => {
                map.clear();
                naive_map.clear();
                map.validate().expect("map should be valid");
            }
        }

        assert_eq!(map.len(), naive_map.len());
        assert_eq!(map.is_empty(), naive_map.is_empty());
        assert_eq!(sorted_entries(&map), naive_map.sorted_entries());
    }
}

#[proptest(cases = 64)]
fn proptest_permutation_eq(
    #[strategy(entry_permutation_strategy(0..64))] entries: (
        Vec<TestEntry>,
        Vec<TestEntry>,
    ),
) {
    let (entries1, entries2) = entries;
    let mut map1 = make_map();
    let mut map2 = make_map();

    for entry in entries1 {
        let (id, name, value) = entry.into_triple();
        map1.add(id, name, value).unwrap();
    }
    for entry in entries2 {
        let (id, name, value) = entry.into_triple();
        map2.add(id, name, value).unwrap();
    }

    assert_eq_props(map1, map2);
}

#[test]
fn permutation_eq_examples() {
    let mut map1 = make_map();
    let mut map2 = make_map();

    // Two empty maps are equal.
    assert_eq_props(&map1, &map2);

    map1.add(0, 'a', 1).unwrap();
    assert_ne_props(&map1, &map2);

    map2.add(0, 'a', 1).unwrap();
    assert_eq_props(&map1, &map2);

    // Same key, different value.
    let mut map3 = map2.clone();
    map3.set(0, 'a', 2).unwrap();
    assert_ne_props(&map1, &map3);

    // Same value, different key.
    let mut map4 = make_map();
    map4.add(0, 'b', 1).unwrap();
    assert_ne_props(&map1, &map4);
}

#[cfg(feature = "serde")]
mod serde_tests {
    use duokey_test_utils::{
        serde_utils::assert_serialize_roundtrip, test_entry::TestEntry,
    };
    use test_strategy::proptest;

    #[proptest]
    fn proptest_serialize_roundtrip(entries: Vec<TestEntry>) {
        assert_serialize_roundtrip(entries);
    }

    #[test]
    fn duplicate_pair_fails_to_deserialize() {
        let res: Result<duokey_test_utils::test_entry::TestMap, _> =
            serde_json::from_str(r#"[[1,"a",10],[1,"a",20]]"#);
        let error = res.unwrap_err().to_string();
        assert!(
            error.starts_with("key (1, 'a') already exists"),
            "unexpected error: {error}"
        );
    }
}
