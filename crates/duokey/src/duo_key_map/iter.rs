// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::key::{CompositeKey, KeyRef};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
    slice,
};
use derive_where::derive_where;
use hashbrown::{hash_map, HashMap};

/// An iterator over the entries of a [`DuoKeyMap`] by shared reference.
///
/// Created by [`DuoKeyMap::iter`].
///
/// [`DuoKeyMap`]: crate::DuoKeyMap
/// [`DuoKeyMap::iter`]: crate::DuoKeyMap::iter
#[derive_where(Clone)]
#[derive_where(Debug; I: fmt::Debug, N: fmt::Debug, V: fmt::Debug)]
pub struct Iter<'a, I, N, V> {
    inner: hash_map::Iter<'a, CompositeKey<I, N>, V>,
}

impl<'a, I, N, V> Iter<'a, I, N, V> {
    pub(super) fn new(
        inner: hash_map::Iter<'a, CompositeKey<I, N>, V>,
    ) -> Self {
        Self { inner }
    }
}

impl<'a, I, N, V> Iterator for Iter<'a, I, N, V> {
    type Item = (&'a I, &'a N, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.next()?;
        Some((key.id(), key.name(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, N, V> ExactSizeIterator for Iter<'_, I, N, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// hash_map::Iter is a FusedIterator, so Iter is as well.
impl<I, N, V> FusedIterator for Iter<'_, I, N, V> {}

/// An iterator over the entries of a [`DuoKeyMap`] by ownership.
///
/// Created by [`DuoKeyMap::into_iter`].
///
/// [`DuoKeyMap`]: crate::DuoKeyMap
/// [`DuoKeyMap::into_iter`]: crate::DuoKeyMap::into_iter
#[derive_where(Debug; I: fmt::Debug, N: fmt::Debug, V: fmt::Debug)]
pub struct IntoIter<I, N, V> {
    inner: hash_map::IntoIter<CompositeKey<I, N>, V>,
}

impl<I, N, V> IntoIter<I, N, V> {
    pub(super) fn new(
        inner: hash_map::IntoIter<CompositeKey<I, N>, V>,
    ) -> Self {
        Self { inner }
    }
}

impl<I, N, V> Iterator for IntoIter<I, N, V> {
    type Item = (I, N, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.next()?;
        let (id, name) = key.into_parts();
        Some((id, name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, N, V> ExactSizeIterator for IntoIter<I, N, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<I, N, V> FusedIterator for IntoIter<I, N, V> {}

/// An iterator over the composite keys of a [`DuoKeyMap`].
///
/// Created by [`DuoKeyMap::keys`].
///
/// [`DuoKeyMap`]: crate::DuoKeyMap
/// [`DuoKeyMap::keys`]: crate::DuoKeyMap::keys
#[derive_where(Clone)]
#[derive_where(Debug; I: fmt::Debug, N: fmt::Debug)]
pub struct Keys<'a, I, N, V> {
    inner: hash_map::Keys<'a, CompositeKey<I, N>, V>,
}

impl<'a, I, N, V> Keys<'a, I, N, V> {
    pub(super) fn new(
        inner: hash_map::Keys<'a, CompositeKey<I, N>, V>,
    ) -> Self {
        Self { inner }
    }
}

impl<'a, I, N, V> Iterator for Keys<'a, I, N, V> {
    type Item = &'a CompositeKey<I, N>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, N, V> ExactSizeIterator for Keys<'_, I, N, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<I, N, V> FusedIterator for Keys<'_, I, N, V> {}

/// An iterator over the values of a [`DuoKeyMap`].
///
/// Created by [`DuoKeyMap::values`].
///
/// [`DuoKeyMap`]: crate::DuoKeyMap
/// [`DuoKeyMap::values`]: crate::DuoKeyMap::values
#[derive_where(Clone)]
#[derive_where(Debug; V: fmt::Debug)]
pub struct Values<'a, I, N, V> {
    inner: hash_map::Values<'a, CompositeKey<I, N>, V>,
}

impl<'a, I, N, V> Values<'a, I, N, V> {
    pub(super) fn new(
        inner: hash_map::Values<'a, CompositeKey<I, N>, V>,
    ) -> Self {
        Self { inner }
    }
}

impl<'a, I, N, V> Iterator for Values<'a, I, N, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, N, V> ExactSizeIterator for Values<'_, I, N, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<I, N, V> FusedIterator for Values<'_, I, N, V> {}

/// An iterator over the distinct components on one side of the key: ids for
/// [`DuoKeyMap::ids`], names for [`DuoKeyMap::names`].
///
/// [`DuoKeyMap::ids`]: crate::DuoKeyMap::ids
/// [`DuoKeyMap::names`]: crate::DuoKeyMap::names
#[derive_where(Clone)]
#[derive_where(Debug; K: fmt::Debug)]
pub struct Components<'a, K, P> {
    inner: hash_map::Keys<'a, K, Vec<P>>,
}

impl<'a, K, P> Components<'a, K, P> {
    pub(super) fn new(inner: hash_map::Keys<'a, K, Vec<P>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, P> Iterator for Components<'a, K, P> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, P> ExactSizeIterator for Components<'_, K, P> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, P> FusedIterator for Components<'_, K, P> {}

/// The `(name, value)` pairs stored under one id.
///
/// Created by [`DuoKeyMap::get_by_id`]. Pairs are produced in the order the
/// names were first paired with the id. The iterator reads the map as it is
/// being advanced; calling `get_by_id` again starts over.
///
/// [`DuoKeyMap::get_by_id`]: crate::DuoKeyMap::get_by_id
#[derive_where(Clone)]
pub struct ById<'a, I, N, V, S> {
    id: &'a I,
    names: slice::Iter<'a, N>,
    store: &'a HashMap<CompositeKey<I, N>, V, S>,
}

impl<'a, I, N, V, S> ById<'a, I, N, V, S> {
    pub(super) fn new(
        id: &'a I,
        names: &'a [N],
        store: &'a HashMap<CompositeKey<I, N>, V, S>,
    ) -> Self {
        Self { id, names: names.iter(), store }
    }

    /// Returns the id that this iterator is producing entries for.
    #[inline]
    pub fn id(&self) -> &'a I {
        self.id
    }
}

impl<'a, I, N, V, S> Iterator for ById<'a, I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a N, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, store) = (self.id, self.store);
        // Invariant: every name listed for an id has an entry in the store.
        self.names.by_ref().find_map(|name| {
            let value = store.get(&KeyRef::new(id, name))?;
            Some((name, value))
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.names.len()))
    }
}

impl<I, N, V, S> FusedIterator for ById<'_, I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: BuildHasher,
{
}

impl<I: fmt::Debug, N: fmt::Debug, V, S> fmt::Debug for ById<'_, I, N, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ById")
            .field("id", self.id)
            .field("remaining", &self.names.as_slice())
            .finish_non_exhaustive()
    }
}

/// The `(id, value)` pairs stored under one name.
///
/// Created by [`DuoKeyMap::get_by_name`]. Pairs are produced in the order the
/// ids were first paired with the name. The iterator reads the map as it is
/// being advanced; calling `get_by_name` again starts over.
///
/// [`DuoKeyMap::get_by_name`]: crate::DuoKeyMap::get_by_name
#[derive_where(Clone)]
pub struct ByName<'a, I, N, V, S> {
    name: &'a N,
    ids: slice::Iter<'a, I>,
    store: &'a HashMap<CompositeKey<I, N>, V, S>,
}

impl<'a, I, N, V, S> ByName<'a, I, N, V, S> {
    pub(super) fn new(
        name: &'a N,
        ids: &'a [I],
        store: &'a HashMap<CompositeKey<I, N>, V, S>,
    ) -> Self {
        Self { name, ids: ids.iter(), store }
    }

    /// Returns the name that this iterator is producing entries for.
    #[inline]
    pub fn name(&self) -> &'a N {
        self.name
    }
}

impl<'a, I, N, V, S> Iterator for ByName<'a, I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a I, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (name, store) = (self.name, self.store);
        self.ids.by_ref().find_map(|id| {
            let value = store.get(&KeyRef::new(id, name))?;
            Some((id, value))
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.ids.len()))
    }
}

impl<I, N, V, S> FusedIterator for ByName<'_, I, N, V, S>
where
    I: Eq + Hash,
    N: Eq + Hash,
    S: BuildHasher,
{
}

impl<I: fmt::Debug, N: fmt::Debug, V, S> fmt::Debug for ByName<'_, I, N, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByName")
            .field("name", self.name)
            .field("remaining", &self.ids.as_slice())
            .finish_non_exhaustive()
    }
}
