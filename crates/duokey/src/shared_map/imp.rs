// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{SharedById, SharedByName};
use crate::{
    errors::{ConsistencyError, Error, MissingKey},
    support::hash_builder::DefaultHashBuilder,
    DuoKeyMap, Nullable,
};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
};
use derive_where::derive_where;
use parking_lot::{RwLock, RwLockReadGuard};

/// A [`DuoKeyMap`] that can be shared between threads.
///
/// All three of the map's structures sit behind a single
/// [`parking_lot::RwLock`]. Every method holds the lock for its whole
/// duration: mutations take it exclusively, and reads share it. No thread can
/// observe the primary store and the secondary indexes out of step.
///
/// Reads return owned clones rather than references, since a reference
/// would have to keep the lock held. To borrow from the map instead, take
/// the read lock with [`read`](Self::read):
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use duokey::SharedDuoKeyMap;
/// use std::thread;
///
/// let map = SharedDuoKeyMap::new();
/// thread::scope(|s| {
///     for id in 0..4u32 {
///         let map = &map;
///         s.spawn(move || map.add(id, "worker", id * 10).unwrap());
///     }
/// });
///
/// assert_eq!(map.len(), 4);
/// assert_eq!(map.get(&2, &"worker"), Ok(20));
///
/// let total: u32 = map.read().values().sum();
/// assert_eq!(total, 60);
/// # }
/// ```
///
/// # Deadlocks
///
/// The lock is not reentrant. Holding a guard returned by `read`, or an
/// iterator returned by [`get_by_id`](Self::get_by_id) or
/// [`get_by_name`](Self::get_by_name), while calling a mutating method on
/// the same thread deadlocks.
#[derive_where(Default; S: Default)]
pub struct SharedDuoKeyMap<I, N, V, S = DefaultHashBuilder> {
    inner: RwLock<DuoKeyMap<I, N, V, S>>,
}

#[cfg(feature = "default-hasher")]
impl<I, N, V> SharedDuoKeyMap<I, N, V>
where
    I: Eq + Hash,
    N: Eq + Hash,
{
    /// Creates a new, empty `SharedDuoKeyMap`.
    #[inline]
    pub fn new() -> Self {
        Self::from(DuoKeyMap::new())
    }

    /// Creates a new `SharedDuoKeyMap` with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(DuoKeyMap::with_capacity(capacity))
    }
}

impl<I, N, V, S> SharedDuoKeyMap<I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: Clone + BuildHasher,
{
    /// Creates a new, empty `SharedDuoKeyMap` with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::from(DuoKeyMap::with_hasher(hasher))
    }

    /// Creates a new `SharedDuoKeyMap` with the given capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from(DuoKeyMap::with_capacity_and_hasher(capacity, hasher))
    }
}

impl<I, N, V, S> SharedDuoKeyMap<I, N, V, S> {
    /// Locks the map for reading, and returns a guard that dereferences to
    /// the underlying [`DuoKeyMap`].
    ///
    /// Writers block until the guard is dropped.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, DuoKeyMap<I, N, V, S>> {
        self.inner.read()
    }

    /// Consumes the wrapper and returns the underlying map.
    #[inline]
    pub fn into_inner(self) -> DuoKeyMap<I, N, V, S> {
        self.inner.into_inner()
    }

    /// Returns a mutable reference to the underlying map.
    ///
    /// No locking takes place, since the exclusive borrow guarantees there
    /// are no other users.
    #[inline]
    pub fn get_mut(&mut self) -> &mut DuoKeyMap<I, N, V, S> {
        self.inner.get_mut()
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every entry from the map.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl<I, N, V, S> SharedDuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone,
    N: Eq + Hash + Clone,
    S: Clone + BuildHasher,
{
    /// See [`DuoKeyMap::validate`].
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        self.inner.read().validate()
    }

    /// Adds a value under a new `(id, name)` pair.
    ///
    /// See [`DuoKeyMap::add`].
    pub fn add(&self, id: I, name: N, value: V) -> Result<(), Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
        V: Nullable,
    {
        self.inner.write().add(id, name, value)
    }

    /// Stores a value under an `(id, name)` pair, overwriting any existing
    /// value.
    ///
    /// See [`DuoKeyMap::set`].
    pub fn set(
        &self,
        id: I,
        name: N,
        value: V,
    ) -> Result<Option<V>, Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
        V: Nullable,
    {
        self.inner.write().set(id, name, value)
    }

    /// Removes the entry for an `(id, name)` pair.
    ///
    /// See [`DuoKeyMap::remove`].
    pub fn remove(&self, id: &I, name: &N) -> Result<bool, Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
    {
        self.inner.write().remove(id, name)
    }

    /// Removes the entry for an `(id, name)` pair and returns its value.
    ///
    /// See [`DuoKeyMap::take`].
    pub fn take(&self, id: &I, name: &N) -> Result<Option<V>, Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
    {
        self.inner.write().take(id, name)
    }

    /// Returns true if the map holds an entry for the `(id, name)` pair.
    pub fn contains_key(&self, id: &I, name: &N) -> bool {
        self.inner.read().contains_key(id, name)
    }

    /// Returns true if at least one entry has the given id.
    pub fn contains_id(&self, id: &I) -> bool {
        self.inner.read().contains_id(id)
    }

    /// Returns true if at least one entry has the given name.
    pub fn contains_name(&self, name: &N) -> bool {
        self.inner.read().contains_name(name)
    }

    /// Returns true if any entry's value is equal to `value`.
    ///
    /// This scans every entry with the read lock held.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.read().contains_value(value)
    }

    /// Returns a clone of the value stored under an `(id, name)` pair, if
    /// any.
    pub fn try_get(&self, id: &I, name: &N) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().try_get(id, name).cloned()
    }

    /// Returns a clone of the value stored under an `(id, name)` pair.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the pair is not present.
    pub fn get(&self, id: &I, name: &N) -> Result<V, Error<I, N>>
    where
        V: Clone,
    {
        self.inner.read().get(id, name).cloned()
    }

    /// Returns a clone of the value of the first entry with the given id.
    ///
    /// See [`DuoKeyMap::try_get_by_id`].
    pub fn try_get_by_id(&self, id: &I) -> Result<Option<V>, Error<I, N>>
    where
        V: Clone,
    {
        Ok(self.inner.read().try_get_by_id(id)?.cloned())
    }

    /// Returns a clone of the value of the first entry with the given name.
    ///
    /// See [`DuoKeyMap::try_get_by_name`].
    pub fn try_get_by_name(&self, name: &N) -> Result<Option<V>, Error<I, N>>
    where
        V: Clone,
    {
        Ok(self.inner.read().try_get_by_name(name)?.cloned())
    }

    /// Iterates over clones of the `(name, value)` pairs stored under `id`.
    ///
    /// The returned iterator holds the read lock until it is dropped.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has this id.
    pub fn get_by_id(
        &self,
        id: &I,
    ) -> Result<SharedById<'_, I, N, V, S>, Error<I, N>> {
        let guard = self.inner.read();
        if !guard.contains_id(id) {
            return Err(Error::KeyNotFound(MissingKey::Id(id.clone())));
        }
        Ok(SharedById::new(guard, id.clone()))
    }

    /// Iterates over clones of the `(id, value)` pairs stored under `name`.
    ///
    /// The returned iterator holds the read lock until it is dropped.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has this name.
    pub fn get_by_name(
        &self,
        name: &N,
    ) -> Result<SharedByName<'_, I, N, V, S>, Error<I, N>> {
        let guard = self.inner.read();
        if !guard.contains_name(name) {
            return Err(Error::KeyNotFound(MissingKey::Name(name.clone())));
        }
        Ok(SharedByName::new(guard, name.clone()))
    }
}

impl<I, N, V, S> From<DuoKeyMap<I, N, V, S>> for SharedDuoKeyMap<I, N, V, S> {
    fn from(map: DuoKeyMap<I, N, V, S>) -> Self {
        Self { inner: RwLock::new(map) }
    }
}

impl<I, N, V, S> fmt::Debug for SharedDuoKeyMap<I, N, V, S>
where
    I: fmt::Debug,
    N: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedDuoKeyMap").field(&*self.inner.read()).finish()
    }
}

/// The `FromIterator` implementation overwrites the values of duplicate
/// pairs, like the one for [`DuoKeyMap`].
impl<I, N, V, S> FromIterator<(I, N, V)> for SharedDuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable,
    N: Eq + Hash + Clone + Nullable,
    V: Nullable,
    S: Clone + BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (I, N, V)>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<DuoKeyMap<I, N, V, S>>())
    }
}
