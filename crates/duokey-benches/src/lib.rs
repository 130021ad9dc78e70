// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use duokey::DuoKeyMap;
use std::collections::HashMap;

/// The number of names paired with each id in the generated data.
pub const NAMES_PER_ID: u32 = 4;

/// A record keyed by an id and a name, as a caller might store it.
#[derive(Clone, Debug)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub data: String,
}

/// Generates `size` records, with [`NAMES_PER_ID`] names per id.
pub fn records(size: usize) -> Vec<Record> {
    (0..size as u32)
        .map(|i| Record {
            id: i / NAMES_PER_ID,
            name: format!("name{}", i % NAMES_PER_ID),
            data: format!("data{i}"),
        })
        .collect()
}

pub fn duo_key_map(records: &[Record]) -> DuoKeyMap<u32, String, String> {
    let mut map = DuoKeyMap::with_capacity(records.len());
    for record in records {
        map.add(record.id, record.name.clone(), record.data.clone())
            .expect("generated keys are unique");
    }
    map
}

/// A plain map keyed by the pair, which can only answer partial-key queries
/// by scanning.
pub fn tuple_map(
    records: &[Record],
) -> HashMap<(u32, String), String, foldhash::fast::RandomState> {
    records
        .iter()
        .map(|r| ((r.id, r.name.clone()), r.data.clone()))
        .collect()
}
