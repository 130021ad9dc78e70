// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use duokey::{
    errors::{Argument, Error, MissingKey},
    SharedDuoKeyMap,
};
use duokey_test_utils::test_entry::{make_map, make_shared_map, HashBuilder};
use std::{sync::Arc, thread};

#[test]
fn reads_return_clones() {
    let map = make_shared_map();
    map.add(1, 'a', 10).unwrap();
    map.add(1, 'b', 11).unwrap();
    map.add(2, 'a', 20).unwrap();

    assert_eq!(map.try_get(&1, &'a'), Some(10));
    assert_eq!(map.get(&2, &'a'), Ok(20));
    assert_eq!(
        map.get(&2, &'b'),
        Err(Error::KeyNotFound(MissingKey::Pair(2, 'b')))
    );
    assert_eq!(map.try_get_by_id(&1), Ok(Some(10)));
    assert_eq!(map.try_get_by_name(&'a'), Ok(Some(10)));
    assert_eq!(map.try_get_by_name(&'z'), Ok(None));

    let by_id: Vec<_> = map.get_by_id(&1).unwrap().collect();
    assert_eq!(by_id, [('a', 10), ('b', 11)]);
    let by_name: Vec<_> = map.get_by_name(&'a').unwrap().collect();
    assert_eq!(by_name, [(1, 10), (2, 20)]);

    assert!(matches!(
        map.get_by_id(&3),
        Err(Error::KeyNotFound(MissingKey::Id(3)))
    ));
    assert!(matches!(
        map.get_by_name(&'z'),
        Err(Error::KeyNotFound(MissingKey::Name('z')))
    ));
}

#[test]
fn mutations() {
    let map = make_shared_map();
    map.add(1, 'a', 10).unwrap();
    assert_eq!(
        map.add(1, 'a', 11),
        Err(Error::KeyAlreadyExists { id: 1, name: 'a' })
    );
    assert_eq!(map.set(1, 'a', 12), Ok(Some(10)));
    assert!(map.contains_key(&1, &'a'));
    assert!(map.contains_id(&1));
    assert!(map.contains_name(&'a'));
    assert!(map.contains_value(&12));

    assert_eq!(map.remove(&1, &'z'), Ok(false));

    let nullable: SharedDuoKeyMap<Option<u8>, char, u32, HashBuilder> =
        SharedDuoKeyMap::with_hasher(HashBuilder::default());
    nullable.add(Some(1), 'a', 1).unwrap();
    assert_eq!(
        nullable.take(&None, &'a'),
        Err(Error::NullArgument { argument: Argument::Id })
    );
    assert_eq!(nullable.len(), 1);
    assert_eq!(map.take(&1, &'a'), Ok(Some(12)));
    assert!(map.is_empty());

    map.add(2, 'b', 20).unwrap();
    map.clear();
    map.clear();
    assert_eq!(map.len(), 0);
    map.validate().expect("map should be valid");
}

#[test]
fn guard_and_conversions() {
    let mut inner = make_map();
    inner.add(1, 'a', 10).unwrap();
    inner.add(2, 'b', 20).unwrap();

    let mut shared = SharedDuoKeyMap::from(inner.clone());
    {
        let guard = shared.read();
        let total: u32 = guard.values().sum();
        assert_eq!(total, 30);
        assert_eq!(guard.get(&1, &'a'), Ok(&10));
    }

    *shared.get_mut().get_mut(&1, &'a').unwrap() = 15;
    assert_eq!(shared.get(&1, &'a'), Ok(15));

    inner.set(1, 'a', 15).unwrap();
    assert_eq!(shared.into_inner(), inner);
}

#[test]
fn concurrent_mutations_stay_consistent() {
    const THREADS: u8 = 8;
    const NAMES: [char; 4] = ['a', 'b', 'c', 'd'];

    let map = Arc::new(make_shared_map());

    thread::scope(|s| {
        for id in 0..THREADS {
            let map = Arc::clone(&map);
            s.spawn(move || {
                for round in 0..50u32 {
                    for name in NAMES {
                        map.set(id, name, round).unwrap();
                    }
                    // Readers on other threads may run at any point; they
                    // must never see a half-applied change.
                    for name in NAMES {
                        assert!(map.contains_key(&id, &name));
                        let by_name = map.get_by_name(&name).unwrap();
                        assert!(by_name.count() >= 1);
                    }
                    if round % 2 == 0 {
                        assert_eq!(map.remove(&id, &'a'), Ok(true));
                    }
                }
            });
        }
    });

    map.validate().expect("map should be valid");
    assert_eq!(map.len(), usize::from(THREADS) * NAMES.len());
    for id in 0..THREADS {
        let by_id: Vec<_> = map.get_by_id(&id).unwrap().collect();
        assert_eq!(by_id.len(), NAMES.len());
        assert!(by_id.iter().all(|&(_, value)| value == 49));
    }
}

#[test]
fn concurrent_adds_of_one_pair() {
    let map = make_shared_map();

    let successes = thread::scope(|s| {
        let handles: Vec<_> = (0..8u32)
            .map(|value| {
                let map = &map;
                s.spawn(move || map.add(1, 'a', value).is_ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&added| added)
            .count()
    });

    assert_eq!(successes, 1);
    assert_eq!(map.len(), 1);
    map.validate().expect("map should be valid");
}

#[test]
fn debug_impl() {
    let map = make_shared_map();
    map.add(1, 'a', 10).unwrap();
    assert_eq!(
        format!("{map:?}"),
        "SharedDuoKeyMap({{id: 1, name: 'a'}: 10})"
    );
    assert_eq!(
        format!("{:?}", map.get_by_id(&1).unwrap()),
        "SharedById { id: 1, position: 0, .. }"
    );
}

#[cfg(feature = "serde")]
#[test]
fn serde_roundtrip() {
    use duokey_test_utils::test_entry::SharedTestMap;

    let map = make_shared_map();
    map.add(1, 'a', 10).unwrap();
    let serialized = serde_json::to_string(&map).unwrap();
    assert_eq!(serialized, r#"[[1,"a",10]]"#);

    let deserialized: SharedTestMap =
        serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized.get(&1, &'a'), Ok(10));
}
