// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    key::{CompositeKey, KeyRef},
    tables::{DuoKeyTables, ID_INDEX, NAME_INDEX},
    ById, ByName, Components, IntoIter, Iter, Keys, Values,
};
use crate::{
    errors::{ConsistencyError, Error, MissingKey},
    nullable::{find_null, find_null_key},
    support::{fmt_utils::PairDebug, hash_builder::DefaultHashBuilder},
    Nullable,
};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    mem,
};
use derive_where::derive_where;
use hashbrown::HashMap;

/// A map from `(id, name)` pairs to values, which can also be queried by the
/// id or the name alone.
///
/// The storage mechanism is a primary hash map from [`CompositeKey`] to value,
/// plus two secondary hash maps: one from each id to the names it is paired
/// with, and one from each name to the ids it is paired with. This allows
/// constant-time lookups by the full key, and lookups by either half that
/// cost time proportional to the number of matching entries rather than the
/// size of the map.
///
/// All three structures are private, and every method that modifies one of
/// them modifies the other two in the same call. This type is not
/// synchronized; wrap it in a [`SharedDuoKeyMap`](crate::SharedDuoKeyMap) to
/// share it between threads.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use duokey::{errors::Error, DuoKeyMap};
///
/// let mut map = DuoKeyMap::new();
/// map.add(1, "tom", 4.5).unwrap();
/// map.add(1, "jerry", 2.0).unwrap();
///
/// // Adding the same pair twice is an error, and leaves the map unchanged.
/// assert_eq!(
///     map.add(1, "tom", 9.9),
///     Err(Error::KeyAlreadyExists { id: 1, name: "tom" }),
/// );
/// assert_eq!(map.get(&1, &"tom"), Ok(&4.5));
///
/// // `set` overwrites instead.
/// assert_eq!(map.set(1, "tom", 9.9), Ok(Some(4.5)));
///
/// // The first name paired with an id wins in a first-match lookup.
/// assert_eq!(map.try_get_by_id(&1), Ok(Some(&9.9)));
///
/// assert_eq!(map.remove(&1, &"tom"), Ok(true));
/// assert_eq!(map.try_get_by_id(&1), Ok(Some(&2.0)));
/// # }
/// ```
#[derive(Clone)]
#[derive_where(Default; S: Default)]
pub struct DuoKeyMap<I, N, V, S = DefaultHashBuilder> {
    store: HashMap<CompositeKey<I, N>, V, S>,
    // Invariant: these tables list exactly the pairs that are keys in
    // `store`, each pair once per table.
    tables: DuoKeyTables<I, N, S>,
}

#[cfg(feature = "default-hasher")]
impl<I, N, V> DuoKeyMap<I, N, V>
where
    I: Eq + Hash,
    N: Eq + Hash,
{
    /// Creates a new, empty `DuoKeyMap`.
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new `DuoKeyMap` with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<I, N, V, S> DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: Clone + BuildHasher,
{
    /// Creates a new, empty `DuoKeyMap` with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates a new `DuoKeyMap` with the given capacity and hasher.
    ///
    /// The same hasher is used for the primary store and both secondary
    /// indexes.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            store: HashMap::with_capacity_and_hasher(capacity, hasher.clone()),
            tables: DuoKeyTables::with_capacity_and_hasher(capacity, hasher),
        }
    }
}

impl<I, N, V, S> DuoKeyMap<I, N, V, S> {
    /// Returns the hasher used by the map.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.store.hasher()
    }

    /// Returns the number of entries the primary store can hold without
    /// reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Iterates over the `(id, name, value)` entries in the map, in arbitrary
    /// order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, I, N, V> {
        Iter::new(self.store.iter())
    }

    /// Iterates over the composite keys in the map, in arbitrary order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, I, N, V> {
        Keys::new(self.store.keys())
    }

    /// Iterates over the values in the map, in arbitrary order.
    #[inline]
    pub fn values(&self) -> Values<'_, I, N, V> {
        Values::new(self.store.values())
    }

    /// Iterates over the distinct ids in the map.
    #[inline]
    pub fn ids(&self) -> Components<'_, I, N> {
        Components::new(self.tables.by_id.keys())
    }

    /// Iterates over the distinct names in the map.
    #[inline]
    pub fn names(&self) -> Components<'_, N, I> {
        Components::new(self.tables.by_name.keys())
    }

    /// Removes every entry from the map.
    ///
    /// The primary store and both indexes are emptied together. Clearing an
    /// empty map does nothing.
    pub fn clear(&mut self) {
        self.store.clear();
        self.tables.clear();
        tracing::trace!("cleared map");
    }
}

impl<I, N, V, S> DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone,
    N: Eq + Hash + Clone,
    S: Clone + BuildHasher,
{
    /// Checks general invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        self.tables.validate(&self.store)
    }

    /// Adds a value under a new `(id, name)` pair.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if `id`, `name` or `value` is null, checked
    ///   in that order.
    /// - [`Error::KeyAlreadyExists`] if the pair is already present. The key
    ///   parts are handed back in the error.
    ///
    /// In both cases the map is left unchanged.
    pub fn add(&mut self, id: I, name: N, value: V) -> Result<(), Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
        V: Nullable,
    {
        if let Some(argument) = find_null(&id, &name, &value) {
            return Err(Error::NullArgument { argument });
        }

        // Check for duplicates *before* touching any structure, so a rejected
        // add has nothing to roll back.
        if self.store.contains_key(&KeyRef::new(&id, &name)) {
            tracing::debug!("add rejected: key already exists");
            return Err(Error::KeyAlreadyExists { id, name });
        }

        self.insert_new(id, name, value);
        tracing::trace!(len = self.len(), "added entry");
        Ok(())
    }

    /// Stores a value under an `(id, name)` pair, creating the entry if it
    /// doesn't exist and overwriting it if it does.
    ///
    /// Returns the value that was replaced, if any. Unlike
    /// [`add`](Self::add), an existing pair is not an error.
    ///
    /// # Errors
    ///
    /// [`Error::NullArgument`] if `id`, `name` or `value` is null. The map is
    /// left unchanged.
    pub fn set(
        &mut self,
        id: I,
        name: N,
        value: V,
    ) -> Result<Option<V>, Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
        V: Nullable,
    {
        if let Some(argument) = find_null(&id, &name, &value) {
            return Err(Error::NullArgument { argument });
        }

        if let Some(slot) = self.store.get_mut(&KeyRef::new(&id, &name)) {
            // The pair is already indexed; only the value changes.
            let previous = mem::replace(slot, value);
            tracing::trace!(len = self.len(), "overwrote entry");
            return Ok(Some(previous));
        }

        self.insert_new(id, name, value);
        tracing::trace!(len = self.len(), "added entry");
        Ok(None)
    }

    /// Removes the entry for an `(id, name)` pair.
    ///
    /// Returns `Ok(true)` if an entry was removed, and `Ok(false)` if there
    /// was nothing to remove. If either the id or the name is not present
    /// anywhere in the map, this returns `Ok(false)` without looking up the
    /// pair.
    ///
    /// # Errors
    ///
    /// - [`Error::NullArgument`] if `id` or `name` is null, checked in that
    ///   order.
    /// - [`Error::CollectionOperation`] if the secondary indexes do not list
    ///   a pair that the primary store holds.
    ///
    /// In both cases the map is left unchanged.
    pub fn remove(&mut self, id: &I, name: &N) -> Result<bool, Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
    {
        Ok(self.take(id, name)?.is_some())
    }

    /// Removes the entry for an `(id, name)` pair and returns its value.
    ///
    /// This behaves like [`remove`](Self::remove), but hands back the value
    /// that was removed.
    ///
    /// # Errors
    ///
    /// The same as for [`remove`](Self::remove).
    pub fn take(
        &mut self,
        id: &I,
        name: &N,
    ) -> Result<Option<V>, Error<I, N>>
    where
        I: Nullable,
        N: Nullable,
    {
        if let Some(argument) = find_null_key(id, name) {
            return Err(Error::NullArgument { argument });
        }

        if !self.contains_id(id) || !self.contains_name(name) {
            tracing::debug!("remove skipped: id or name not present");
            return Ok(None);
        }

        let key = KeyRef::new(id, name);
        if !self.store.contains_key(&key) {
            return Ok(None);
        }

        // Find the pair in both indexes before removing anything, so that an
        // inconsistency is reported with every structure intact.
        let slots = self.tables.locate(id, name).map_err(|source| {
            tracing::error!(%source, "secondary index out of sync on remove");
            Error::CollectionOperation { source }
        })?;

        let value = self.store.remove(&key);
        self.tables.unlink(id, name, slots);
        tracing::trace!(len = self.len(), "removed entry");
        Ok(value)
    }

    /// Returns the value stored under an `(id, name)` pair, if any.
    #[inline]
    pub fn try_get(&self, id: &I, name: &N) -> Option<&V> {
        self.store.get(&KeyRef::new(id, name))
    }

    /// Returns a mutable reference to the value stored under an `(id, name)`
    /// pair, if any.
    ///
    /// Keys can't be changed in place, so the indexes are unaffected.
    #[inline]
    pub fn get_mut(&mut self, id: &I, name: &N) -> Option<&mut V> {
        self.store.get_mut(&KeyRef::new(id, name))
    }

    /// Returns the value stored under an `(id, name)` pair.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the pair is not present.
    pub fn get(&self, id: &I, name: &N) -> Result<&V, Error<I, N>> {
        self.try_get(id, name).ok_or_else(|| {
            Error::KeyNotFound(MissingKey::Pair(id.clone(), name.clone()))
        })
    }

    /// Returns the value of the first entry with the given id.
    ///
    /// Ids need not be unique, so this is *a* match rather than *the* match:
    /// it is the entry for the name that was paired with `id` earliest among
    /// those still present. Returns `Ok(None)` if the id is not present.
    ///
    /// # Errors
    ///
    /// [`Error::ValueRetrieval`] if the id index lists a name whose entry is
    /// missing from the primary store.
    pub fn try_get_by_id(&self, id: &I) -> Result<Option<&V>, Error<I, N>> {
        let Some(name) = self.tables.by_id.first(id) else {
            return Ok(None);
        };
        match self.try_get(id, name) {
            Some(value) => Ok(Some(value)),
            None => Err(retrieval_error(ID_INDEX)),
        }
    }

    /// Returns the value of the first entry with the given name.
    ///
    /// This is the name-side counterpart of
    /// [`try_get_by_id`](Self::try_get_by_id).
    pub fn try_get_by_name(
        &self,
        name: &N,
    ) -> Result<Option<&V>, Error<I, N>> {
        let Some(id) = self.tables.by_name.first(name) else {
            return Ok(None);
        };
        match self.try_get(id, name) {
            Some(value) => Ok(Some(value)),
            None => Err(retrieval_error(NAME_INDEX)),
        }
    }

    /// Iterates over the `(name, value)` pairs stored under `id`.
    ///
    /// Pairs are produced in the order their names were first paired with
    /// `id`. Only entries with this id are visited.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has this id.
    pub fn get_by_id(
        &self,
        id: &I,
    ) -> Result<ById<'_, I, N, V, S>, Error<I, N>> {
        let (id, names) = self
            .tables
            .by_id
            .partners(id)
            .ok_or_else(|| Error::KeyNotFound(MissingKey::Id(id.clone())))?;
        Ok(ById::new(id, names, &self.store))
    }

    /// Iterates over the `(id, value)` pairs stored under `name`.
    ///
    /// Pairs are produced in the order their ids were first paired with
    /// `name`. Only entries with this name are visited.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has this name.
    pub fn get_by_name(
        &self,
        name: &N,
    ) -> Result<ByName<'_, I, N, V, S>, Error<I, N>> {
        let (name, ids) =
            self.tables.by_name.partners(name).ok_or_else(|| {
                Error::KeyNotFound(MissingKey::Name(name.clone()))
            })?;
        Ok(ByName::new(name, ids, &self.store))
    }

    /// Returns true if the map holds an entry for the `(id, name)` pair.
    #[inline]
    pub fn contains_key(&self, id: &I, name: &N) -> bool {
        self.store.contains_key(&KeyRef::new(id, name))
    }

    /// Returns true if at least one entry has the given id.
    #[inline]
    pub fn contains_id(&self, id: &I) -> bool {
        self.tables.by_id.contains(id)
    }

    /// Returns true if at least one entry has the given name.
    #[inline]
    pub fn contains_name(&self, name: &N) -> bool {
        self.tables.by_name.contains(name)
    }

    /// Returns true if any entry's value is equal to `value`.
    ///
    /// This scans every entry.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.store.values().any(|v| v == value)
    }

    /// Returns the names paired with `id`, in the order they were paired.
    pub(crate) fn names_of(&self, id: &I) -> Option<&[N]> {
        self.tables.by_id.partners(id).map(|(_, names)| names)
    }

    /// Returns the ids paired with `name`, in the order they were paired.
    pub(crate) fn ids_of(&self, name: &N) -> Option<&[I]> {
        self.tables.by_name.partners(name).map(|(_, ids)| ids)
    }

    fn insert_new(&mut self, id: I, name: N, value: V) {
        // The store first, then both indexes. Nothing in between can fail.
        self.store.insert(CompositeKey::new(id.clone(), name.clone()), value);
        self.tables.link(id, name);
    }
}

fn retrieval_error<I, N>(index: &'static str) -> Error<I, N> {
    let source = ConsistencyError::DanglingPair { index };
    tracing::error!(%source, "secondary index out of sync on lookup");
    Error::ValueRetrieval { source }
}

impl<I, N, V, S> fmt::Debug for DuoKeyMap<I, N, V, S>
where
    I: fmt::Debug,
    N: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.store.iter().map(|(key, value)| {
                (PairDebug { id: key.id(), name: key.name() }, value)
            }))
            .finish()
    }
}

impl<I, N, V, S> PartialEq for DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        // Two maps are equal if they hold the same entries, regardless of
        // iteration order. The indexes are derived from the store, so
        // comparing stores is enough. (Index list order can differ between
        // equal maps, depending on insertion history.)
        self.store == other.store
    }
}

impl<I, N, V, S> Eq for DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<'a, I, N, V, S> IntoIterator for &'a DuoKeyMap<I, N, V, S> {
    type Item = (&'a I, &'a N, &'a V);
    type IntoIter = Iter<'a, I, N, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I, N, V, S> IntoIterator for DuoKeyMap<I, N, V, S> {
    type Item = (I, N, V);
    type IntoIter = IntoIter<I, N, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.store.into_iter())
    }
}

/// The `Extend` implementation overwrites the values of existing pairs, like
/// [`DuoKeyMap::set`].
///
/// # Panics
///
/// Panics if an id, name or value is null.
impl<I, N, V, S> Extend<(I, N, V)> for DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable,
    N: Eq + Hash + Clone + Nullable,
    V: Nullable,
    S: Clone + BuildHasher,
{
    fn extend<T: IntoIterator<Item = (I, N, V)>>(&mut self, iter: T) {
        for (id, name, value) in iter {
            // set only fails on null arguments.
            if let Err(Error::NullArgument { argument }) =
                self.set(id, name, value)
            {
                panic!("cannot extend DuoKeyMap: the {argument} is null");
            }
        }
    }
}

/// The `FromIterator` implementation overwrites the values of duplicate
/// pairs.
///
/// # Panics
///
/// Panics if an id, name or value is null.
impl<I, N, V, S> FromIterator<(I, N, V)> for DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable,
    N: Eq + Hash + Clone + Nullable,
    V: Nullable,
    S: Clone + BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (I, N, V)>>(iter: T) -> Self {
        let mut map = DuoKeyMap::with_hasher(S::default());
        map.extend(iter);
        map
    }
}
