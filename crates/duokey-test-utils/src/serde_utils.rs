// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde-related test utilities.

use crate::test_entry::{make_map, sorted_entries, TestEntry, TestMap};

/// Builds a map from `entries`, checks that it survives a JSON round trip,
/// and checks that deserializing the raw entry list fails the same way
/// adding the entries one by one did.
pub fn assert_serialize_roundtrip(entries: Vec<TestEntry>) {
    let mut map = make_map();
    let mut first_error = None;
    for entry in &entries {
        let (id, name, value) = entry.into_triple();
        // Duplicate keys are likely here. Keep the first error to compare
        // against deserialization.
        if let Err(error) = map.add(id, name, value) {
            first_error.get_or_insert(error);
        }
    }

    let serialized = serde_json::to_string(&map).unwrap();
    let deserialized: TestMap = TestMap::deserialize_with_hasher(
        &mut serde_json::Deserializer::from_str(&serialized),
        Default::default(),
    )
    .unwrap();
    deserialized.validate().expect("deserialized map is valid");
    assert_eq!(
        sorted_entries(&map),
        sorted_entries(&deserialized),
        "entries match"
    );

    // The map serializes as a plain list of triples, so serializing the
    // triples directly produces something it can try to deserialize.
    let triples: Vec<_> = entries.iter().map(|e| e.into_triple()).collect();
    let serialized = serde_json::to_string(&triples).unwrap();
    let res = TestMap::deserialize_with_hasher(
        &mut serde_json::Deserializer::from_str(&serialized),
        Default::default(),
    );
    match (first_error, res) {
        (None, Ok(_)) => {}
        (Some(first_error), Ok(_)) => {
            panic!(
                "expected error ({first_error}), but deserialization succeeded"
            )
        }
        (None, Err(error)) => {
            panic!("unexpected error: {error}")
        }
        (Some(first_error), Err(error)) => {
            let expected = first_error.to_string();
            let actual = error.to_string();
            let Some((actual_prefix, _)) = actual.rsplit_once(" at line ")
            else {
                panic!(
                    "error does not contain line number at the end: {actual}"
                );
            };
            assert_eq!(actual_prefix, expected, "error matches");
        }
    }
}
