// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{DuoKeyMap, Nullable, SharedDuoKeyMap};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

/// A `SharedDuoKeyMap` serializes the same way as a [`DuoKeyMap`], with the
/// read lock held for the duration.
impl<I, N, V, S> Serialize for SharedDuoKeyMap<I, N, V, S>
where
    I: Serialize,
    N: Serialize,
    V: Serialize,
{
    fn serialize<Ser: Serializer>(
        &self,
        serializer: Ser,
    ) -> Result<Ser::Ok, Ser::Error> {
        self.read().serialize(serializer)
    }
}

impl<'de, I, N, V, S> Deserialize<'de> for SharedDuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    N: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    V: Nullable + Deserialize<'de>,
    S: Clone + BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        DuoKeyMap::deserialize(deserializer).map(Self::from)
    }
}
