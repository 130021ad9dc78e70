// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use duokey::{DuoKeyMap, SharedDuoKeyMap};
use proptest::prelude::*;
use test_strategy::Arbitrary;

#[cfg(feature = "default-hasher")]
pub type HashBuilder = duokey::DefaultHashBuilder;

#[cfg(not(feature = "default-hasher"))]
pub type HashBuilder = std::hash::RandomState;

/// The map type used throughout the tests.
pub type TestMap = DuoKeyMap<u8, char, u32, HashBuilder>;

/// The shared map type used throughout the tests.
pub type SharedTestMap = SharedDuoKeyMap<u8, char, u32, HashBuilder>;

pub fn make_map() -> TestMap {
    TestMap::with_hasher(HashBuilder::default())
}

pub fn make_shared_map() -> SharedTestMap {
    SharedTestMap::with_hasher(HashBuilder::default())
}

/// An `(id, name)` pair drawn from small ranges, so that generated operations
/// collide with each other often.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Arbitrary)]
pub struct TestKey {
    #[strategy(0u8..8)]
    pub id: u8,
    #[strategy(proptest::char::range('a', 'f'))]
    pub name: char,
}

impl TestKey {
    pub fn new(id: u8, name: char) -> Self {
        Self { id, name }
    }
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Arbitrary)]
pub struct TestEntry {
    pub key: TestKey,
    pub value: u32,
}

impl TestEntry {
    pub fn new(id: u8, name: char, value: u32) -> Self {
        Self { key: TestKey::new(id, name), value }
    }

    pub fn into_triple(self) -> (u8, char, u32) {
        (self.key.id, self.key.name, self.value)
    }
}

/// Collects a map's entries in a stable order, for comparisons.
pub fn sorted_entries(map: &TestMap) -> Vec<TestEntry> {
    let mut entries: Vec<_> = map
        .iter()
        .map(|(&id, &name, &value)| TestEntry::new(id, name, value))
        .collect();
    entries.sort();
    entries
}

/// A strategy producing a list of entries with distinct keys, along with a
/// shuffled copy of the same list.
pub fn entry_permutation_strategy(
    size: impl Into<prop::collection::SizeRange>,
) -> impl Strategy<Value = (Vec<TestEntry>, Vec<TestEntry>)> {
    prop::collection::btree_map(any::<TestKey>(), any::<u32>(), size)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(key, value)| TestEntry { key, value })
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|entries| {
            let shuffled = Just(entries.clone()).prop_shuffle();
            (Just(entries), shuffled)
        })
}
