// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::hash::{Hash, Hasher};
use equivalent::Equivalent;

/// An `(id, name)` pair identifying at most one value in a
/// [`DuoKeyMap`](crate::DuoKeyMap).
///
/// Keys are immutable once built: there are accessors for both parts but no
/// setters. Two keys are equal if both their ids and their names are equal.
#[derive(Clone, Copy, Debug)]
pub struct CompositeKey<I, N> {
    id: I,
    name: N,
}

impl<I, N> CompositeKey<I, N> {
    /// Creates a new key from its parts.
    #[inline]
    pub fn new(id: I, name: N) -> Self {
        Self { id, name }
    }

    /// Returns the id part of the key.
    #[inline]
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Returns the name part of the key.
    #[inline]
    pub fn name(&self) -> &N {
        &self.name
    }

    /// Converts the key into its parts.
    #[inline]
    pub fn into_parts(self) -> (I, N) {
        (self.id, self.name)
    }
}

impl<I: PartialEq, N: PartialEq> PartialEq for CompositeKey<I, N> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl<I: Eq, N: Eq> Eq for CompositeKey<I, N> {}

impl<I: Hash, N: Hash> Hash for CompositeKey<I, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // This must stay in sync with KeyRef's Hash impl: lookups by borrowed
        // parts rely on both producing the same hash.
        self.id.hash(state);
        self.name.hash(state);
    }
}

impl<I, N> From<(I, N)> for CompositeKey<I, N> {
    #[inline]
    fn from((id, name): (I, N)) -> Self {
        Self::new(id, name)
    }
}

/// A borrowed form of [`CompositeKey`], used to look up entries without
/// cloning the caller's key parts.
pub(crate) struct KeyRef<'a, I, N> {
    id: &'a I,
    name: &'a N,
}

impl<'a, I, N> KeyRef<'a, I, N> {
    #[inline]
    pub(crate) fn new(id: &'a I, name: &'a N) -> Self {
        Self { id, name }
    }
}

impl<I: Hash, N: Hash> Hash for KeyRef<'_, I, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
    }
}

impl<I: Eq, N: Eq> Equivalent<CompositeKey<I, N>> for KeyRef<'_, I, N> {
    #[inline]
    fn equivalent(&self, key: &CompositeKey<I, N>) -> bool {
        *self.id == key.id && *self.name == key.name
    }
}
