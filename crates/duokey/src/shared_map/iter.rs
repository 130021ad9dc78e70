// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::DuoKeyMap;
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};
use parking_lot::RwLockReadGuard;

/// The `(name, value)` pairs stored under one id of a
/// [`SharedDuoKeyMap`](crate::SharedDuoKeyMap), cloned out one at a time.
///
/// Created by [`SharedDuoKeyMap::get_by_id`]. The iterator holds the map's
/// read lock until it is dropped: other readers can proceed, but writers
/// block. Calling a mutating method on the same thread while this iterator
/// is alive deadlocks.
///
/// [`SharedDuoKeyMap::get_by_id`]: crate::SharedDuoKeyMap::get_by_id
pub struct SharedById<'a, I, N, V, S> {
    guard: RwLockReadGuard<'a, DuoKeyMap<I, N, V, S>>,
    id: I,
    position: usize,
}

impl<'a, I, N, V, S> SharedById<'a, I, N, V, S> {
    pub(super) fn new(
        guard: RwLockReadGuard<'a, DuoKeyMap<I, N, V, S>>,
        id: I,
    ) -> Self {
        Self { guard, id, position: 0 }
    }

    /// Returns the id that this iterator is producing entries for.
    #[inline]
    pub fn id(&self) -> &I {
        &self.id
    }
}

impl<I, N, V, S> Iterator for SharedById<'_, I, N, V, S>
where
    I: Eq + Hash + Clone,
    N: Eq + Hash + Clone,
    V: Clone,
    S: Clone + BuildHasher,
{
    type Item = (N, V);

    fn next(&mut self) -> Option<Self::Item> {
        let names = self.guard.names_of(&self.id)?;
        while let Some(name) = names.get(self.position) {
            self.position += 1;
            if let Some(value) = self.guard.try_get(&self.id, name) {
                return Some((name.clone(), value.clone()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.guard.names_of(&self.id).map_or(0, <[N]>::len);
        (0, Some(total.saturating_sub(self.position)))
    }
}

impl<I, N, V, S> FusedIterator for SharedById<'_, I, N, V, S>
where
    I: Eq + Hash + Clone,
    N: Eq + Hash + Clone,
    V: Clone,
    S: Clone + BuildHasher,
{
}

impl<I: fmt::Debug, N, V, S> fmt::Debug for SharedById<'_, I, N, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedById")
            .field("id", &self.id)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// The `(id, value)` pairs stored under one name of a
/// [`SharedDuoKeyMap`](crate::SharedDuoKeyMap), cloned out one at a time.
///
/// Created by [`SharedDuoKeyMap::get_by_name`]. Like [`SharedById`], this
/// holds the map's read lock until it is dropped.
///
/// [`SharedDuoKeyMap::get_by_name`]: crate::SharedDuoKeyMap::get_by_name
pub struct SharedByName<'a, I, N, V, S> {
    guard: RwLockReadGuard<'a, DuoKeyMap<I, N, V, S>>,
    name: N,
    position: usize,
}

impl<'a, I, N, V, S> SharedByName<'a, I, N, V, S> {
    pub(super) fn new(
        guard: RwLockReadGuard<'a, DuoKeyMap<I, N, V, S>>,
        name: N,
    ) -> Self {
        Self { guard, name, position: 0 }
    }

    /// Returns the name that this iterator is producing entries for.
    #[inline]
    pub fn name(&self) -> &N {
        &self.name
    }
}

impl<I, N, V, S> Iterator for SharedByName<'_, I, N, V, S>
where
    I: Eq + Hash + Clone,
    N: Eq + Hash + Clone,
    V: Clone,
    S: Clone + BuildHasher,
{
    type Item = (I, V);

    fn next(&mut self) -> Option<Self::Item> {
        let ids = self.guard.ids_of(&self.name)?;
        while let Some(id) = ids.get(self.position) {
            self.position += 1;
            if let Some(value) = self.guard.try_get(id, &self.name) {
                return Some((id.clone(), value.clone()));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.guard.ids_of(&self.name).map_or(0, <[I]>::len);
        (0, Some(total.saturating_sub(self.position)))
    }
}

impl<I, N, V, S> FusedIterator for SharedByName<'_, I, N, V, S>
where
    I: Eq + Hash + Clone,
    N: Eq + Hash + Clone,
    V: Clone,
    S: Clone + BuildHasher,
{
}

impl<I, N: fmt::Debug, V, S> fmt::Debug for SharedByName<'_, I, N, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedByName")
            .field("name", &self.name)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
