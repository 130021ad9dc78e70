// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for this crate.
//!
//! These types are shared by [`DuoKeyMap`](crate::DuoKeyMap) and
//! [`SharedDuoKeyMap`](crate::SharedDuoKeyMap).

use core::fmt;

/// An error returned by a map operation.
///
/// The key parts stored in the error are the ones passed in by the caller, so
/// that a rejected `add` hands its key back.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error<I, N> {
    /// An argument was its type's null sentinel.
    ///
    /// Returned before the map is modified.
    #[error("the {argument} argument is null")]
    NullArgument {
        /// The argument that was null.
        argument: Argument,
    },

    /// [`add`](crate::DuoKeyMap::add) was called with a pair that is already
    /// present. The map is unchanged.
    #[error("key ({id:?}, {name:?}) already exists")]
    KeyAlreadyExists {
        /// The id of the rejected entry.
        id: I,
        /// The name of the rejected entry.
        name: N,
    },

    /// A lookup referred to a key that the map does not know about.
    #[error("{0} does not exist")]
    KeyNotFound(MissingKey<I, N>),

    /// A first-match lookup found its key in a secondary index, but the
    /// corresponding entry was missing from the primary store.
    #[error("value could not be retrieved")]
    ValueRetrieval {
        /// The inconsistency that was found.
        #[source]
        source: ConsistencyError,
    },

    /// A removal found the secondary indexes disagreeing with the primary
    /// store. The map is unchanged.
    #[error("collection operation failed")]
    CollectionOperation {
        /// The inconsistency that was found.
        #[source]
        source: ConsistencyError,
    },
}

/// The argument that was null in [`Error::NullArgument`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Argument {
    /// The id.
    Id,
    /// The name.
    Name,
    /// The value.
    Value,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Id => f.write_str("id"),
            Argument::Name => f.write_str("name"),
            Argument::Value => f.write_str("value"),
        }
    }
}

/// The key that was missing in [`Error::KeyNotFound`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MissingKey<I, N> {
    /// A full `(id, name)` pair.
    Pair(I, N),
    /// An id, looked up on its own.
    Id(I),
    /// A name, looked up on its own.
    Name(N),
}

impl<I: fmt::Debug, N: fmt::Debug> fmt::Display for MissingKey<I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingKey::Pair(id, name) => {
                write!(f, "pair ({id:?}, {name:?})")
            }
            MissingKey::Id(id) => write!(f, "id {id:?}"),
            MissingKey::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

/// The secondary indexes and the primary store disagree.
///
/// This should never happen: every mutation updates all three structures
/// together. It is reported by [`DuoKeyMap::validate`] and carried as the
/// source of [`Error::ValueRetrieval`] and [`Error::CollectionOperation`].
///
/// [`DuoKeyMap::validate`]: crate::DuoKeyMap::validate
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConsistencyError {
    /// An index lists a pair that the primary store does not hold.
    #[error("{index} lists a pair missing from the primary store")]
    DanglingPair {
        /// The index that was inconsistent.
        index: &'static str,
    },

    /// The primary store holds a pair that an index does not list.
    #[error("{index} does not list a pair held by the primary store")]
    UnindexedPair {
        /// The index that was inconsistent.
        index: &'static str,
    },

    /// An index lists the same pair more than once.
    #[error("{index} lists a pair more than once")]
    DuplicatePair {
        /// The index that was inconsistent.
        index: &'static str,
    },

    /// An index kept a key whose list of partners is empty.
    #[error("{index} has a key with no partners")]
    EmptyList {
        /// The index that was inconsistent.
        index: &'static str,
    },

    /// An index lists a different number of pairs than the primary store
    /// holds.
    #[error("{index} lists {actual} pairs, expected {expected}")]
    PairCount {
        /// The index that was inconsistent.
        index: &'static str,
        /// The number of entries in the primary store.
        expected: usize,
        /// The number of pairs listed by the index.
        actual: usize,
    },
}
