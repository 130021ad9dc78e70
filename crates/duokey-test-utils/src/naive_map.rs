// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::test_entry::{TestEntry, TestKey};

/// A naive, inefficient map that acts as an oracle for property-based tests.
///
/// Entries are stored in a vector in the order their keys were first added,
/// with no indexes, and every lookup is a linear scan. Overwriting a value
/// keeps the entry in place, so the first entry with a given id or name is the
/// one a first-match lookup should return.
#[derive(Debug, Default)]
pub struct NaiveMap {
    entries: Vec<TestEntry>,
}

impl NaiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: TestKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Returns false, leaving the map unchanged, if the key already exists.
    pub fn add(&mut self, entry: TestEntry) -> bool {
        if self.position(entry.key).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn set(&mut self, entry: TestEntry) -> Option<u32> {
        match self.position(entry.key) {
            Some(index) => {
                let previous = self.entries[index].value;
                self.entries[index].value = entry.value;
                Some(previous)
            }
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn take(&mut self, key: TestKey) -> Option<u32> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).value)
    }

    pub fn get(&self, key: TestKey) -> Option<u32> {
        self.position(key).map(|index| self.entries[index].value)
    }

    pub fn first_by_id(&self, id: u8) -> Option<u32> {
        self.entries.iter().find(|e| e.key.id == id).map(|e| e.value)
    }

    pub fn first_by_name(&self, name: char) -> Option<u32> {
        self.entries.iter().find(|e| e.key.name == name).map(|e| e.value)
    }

    pub fn by_id(&self, id: u8) -> Vec<(char, u32)> {
        self.entries
            .iter()
            .filter(|e| e.key.id == id)
            .map(|e| (e.key.name, e.value))
            .collect()
    }

    pub fn by_name(&self, name: char) -> Vec<(u8, u32)> {
        self.entries
            .iter()
            .filter(|e| e.key.name == name)
            .map(|e| (e.key.id, e.value))
            .collect()
    }

    pub fn contains_value(&self, value: u32) -> bool {
        self.entries.iter().any(|e| e.value == value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries sorted by key, for comparison with a real map.
    pub fn sorted_entries(&self) -> Vec<TestEntry> {
        let mut entries = self.entries.clone();
        entries.sort();
        entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
