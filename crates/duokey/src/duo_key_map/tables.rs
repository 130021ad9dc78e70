// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::key::{CompositeKey, KeyRef};
use crate::errors::ConsistencyError;
use core::hash::{BuildHasher, Hash};
use derive_where::derive_where;
use hashbrown::HashMap;

pub(super) const ID_INDEX: &str = "id_to_names";
pub(super) const NAME_INDEX: &str = "name_to_ids";

/// Maps one half of the composite key to the other halves it is currently
/// paired with, in insertion order.
///
/// Invariant: every list is non-empty, and holds no duplicates.
#[derive(Clone, Debug)]
#[derive_where(Default; S: Default)]
pub(super) struct SecondaryIndex<K, P, S> {
    map: HashMap<K, Vec<P>, S>,
}

impl<K, P, S> SecondaryIndex<K, P, S> {
    #[cfg(test)]
    fn len(&self) -> usize {
        self.map.len()
    }

    pub(super) fn keys(&self) -> hashbrown::hash_map::Keys<'_, K, Vec<P>> {
        self.map.keys()
    }

    pub(super) fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K: Eq + Hash, P: Eq, S: BuildHasher> SecondaryIndex<K, P, S> {
    fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self { map: HashMap::with_capacity_and_hasher(capacity, hasher) }
    }

    #[inline]
    pub(super) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the index's own copy of `key` along with its partners.
    #[inline]
    pub(super) fn partners(&self, key: &K) -> Option<(&K, &[P])> {
        self.map.get_key_value(key).map(|(k, list)| (k, list.as_slice()))
    }

    /// Returns the partner that was linked to `key` first.
    #[inline]
    pub(super) fn first(&self, key: &K) -> Option<&P> {
        self.map.get(key).and_then(|list| list.first())
    }

    fn link(&mut self, key: K, partner: P) {
        self.map.entry(key).or_default().push(partner);
    }

    fn position(&self, key: &K, partner: &P) -> Option<usize> {
        self.map.get(key)?.iter().position(|p| p == partner)
    }

    /// Removes the partner at `position`, dropping `key` altogether if that
    /// was its last partner.
    fn unlink_at(&mut self, key: &K, position: usize) {
        let Some(list) = self.map.get_mut(key) else {
            return;
        };
        list.remove(position);
        if list.is_empty() {
            self.map.remove(key);
        }
    }
}

/// Where a pair lives in both secondary indexes.
///
/// Produced by [`DuoKeyTables::locate`] before anything is removed, so that a
/// failed lookup leaves every structure untouched.
#[derive(Clone, Copy, Debug)]
pub(super) struct PairSlots {
    in_id_index: usize,
    in_name_index: usize,
}

/// The two secondary indexes of a `DuoKeyMap`.
#[derive(Clone, Debug)]
#[derive_where(Default; S: Default)]
pub(super) struct DuoKeyTables<I, N, S> {
    pub(super) by_id: SecondaryIndex<I, N, S>,
    pub(super) by_name: SecondaryIndex<N, I, S>,
}

impl<I, N, S> DuoKeyTables<I, N, S> {
    pub(super) fn clear(&mut self) {
        self.by_id.clear();
        self.by_name.clear();
    }
}

impl<I, N, S> DuoKeyTables<I, N, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: Clone + BuildHasher,
{
    pub(super) fn with_capacity_and_hasher(
        capacity: usize,
        hasher: S,
    ) -> Self {
        Self {
            by_id: SecondaryIndex::with_capacity_and_hasher(
                capacity,
                hasher.clone(),
            ),
            by_name: SecondaryIndex::with_capacity_and_hasher(
                capacity, hasher,
            ),
        }
    }

    /// Records a new pair in both indexes.
    ///
    /// The caller must have checked that the pair is not already present.
    pub(super) fn link(&mut self, id: I, name: N)
    where
        I: Clone,
        N: Clone,
    {
        self.by_id.link(id.clone(), name.clone());
        self.by_name.link(name, id);
    }

    /// Finds the slots occupied by a pair in both indexes.
    pub(super) fn locate(
        &self,
        id: &I,
        name: &N,
    ) -> Result<PairSlots, ConsistencyError> {
        let in_id_index = self
            .by_id
            .position(id, name)
            .ok_or(ConsistencyError::UnindexedPair { index: ID_INDEX })?;
        let in_name_index = self
            .by_name
            .position(name, id)
            .ok_or(ConsistencyError::UnindexedPair { index: NAME_INDEX })?;
        Ok(PairSlots { in_id_index, in_name_index })
    }

    /// Removes a pair from both indexes, using the slots returned by
    /// [`Self::locate`].
    pub(super) fn unlink(&mut self, id: &I, name: &N, slots: PairSlots) {
        self.by_id.unlink_at(id, slots.in_id_index);
        self.by_name.unlink_at(name, slots.in_name_index);
    }

    /// Checks both indexes against the set of keys in the primary store.
    pub(super) fn validate<V, S2: BuildHasher>(
        &self,
        store: &HashMap<CompositeKey<I, N>, V, S2>,
    ) -> Result<(), ConsistencyError> {
        let mut id_pairs = 0;
        for (id, names) in &self.by_id.map {
            if names.is_empty() {
                return Err(ConsistencyError::EmptyList { index: ID_INDEX });
            }
            for (i, name) in names.iter().enumerate() {
                if names[..i].contains(name) {
                    return Err(ConsistencyError::DuplicatePair {
                        index: ID_INDEX,
                    });
                }
                if !store.contains_key(&KeyRef::new(id, name)) {
                    return Err(ConsistencyError::DanglingPair {
                        index: ID_INDEX,
                    });
                }
            }
            id_pairs += names.len();
        }

        let mut name_pairs = 0;
        for (name, ids) in &self.by_name.map {
            if ids.is_empty() {
                return Err(ConsistencyError::EmptyList { index: NAME_INDEX });
            }
            for (i, id) in ids.iter().enumerate() {
                if ids[..i].contains(id) {
                    return Err(ConsistencyError::DuplicatePair {
                        index: NAME_INDEX,
                    });
                }
                if !store.contains_key(&KeyRef::new(id, name)) {
                    return Err(ConsistencyError::DanglingPair {
                        index: NAME_INDEX,
                    });
                }
            }
            name_pairs += ids.len();
        }

        // Each index lists distinct pairs that all exist in the store, so
        // matching counts mean every stored pair is listed.
        if id_pairs != store.len() {
            return Err(ConsistencyError::PairCount {
                index: ID_INDEX,
                expected: store.len(),
                actual: id_pairs,
            });
        }
        if name_pairs != store.len() {
            return Err(ConsistencyError::PairCount {
                index: NAME_INDEX,
                expected: store.len(),
                actual: name_pairs,
            });
        }

        Ok(())
    }
}
