// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{DuoKeyMap, Nullable};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};
use serde_core::{
    de::{SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// A `DuoKeyMap` serializes to a list of `[id, name, value]` triples, in
/// arbitrary order.
///
/// Serializing as a list rather than as a map works around the lack of
/// non-string keys in formats like JSON. The secondary indexes are not
/// serialized; they are rebuilt on deserialization.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use duokey::DuoKeyMap;
///
/// let mut map = DuoKeyMap::new();
/// map.add(7, "alice".to_owned(), 42).unwrap();
///
/// let serialized = serde_json::to_string(&map).unwrap();
/// assert_eq!(serialized, r#"[[7,"alice",42]]"#);
///
/// let deserialized: DuoKeyMap<u32, String, u64> =
///     serde_json::from_str(&serialized).unwrap();
/// assert_eq!(deserialized.get(&7, &"alice".to_owned()), Ok(&42));
/// # }
/// ```
impl<I, N, V, S> Serialize for DuoKeyMap<I, N, V, S>
where
    I: Serialize,
    N: Serialize,
    V: Serialize,
{
    fn serialize<Ser: Serializer>(
        &self,
        serializer: Ser,
    ) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// The `Deserialize` impl for `DuoKeyMap` deserializes the list of triples
/// through [`DuoKeyMap::add`], producing an error if any pair appears twice
/// or any part is null.
///
/// The `fmt::Debug` bounds on `I` and `N` ensure better error reporting.
impl<'de, I, N, V, S> Deserialize<'de> for DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    N: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    V: Nullable + Deserialize<'de>,
    S: Clone + BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        Self::deserialize_with_hasher(deserializer, S::default())
    }
}

impl<'de, I, N, V, S> DuoKeyMap<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    N: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    V: Nullable + Deserialize<'de>,
    S: Clone + BuildHasher,
{
    /// Deserializes from a list of `[id, name, value]` triples, using the
    /// given hasher.
    pub fn deserialize_with_hasher<D: Deserializer<'de>>(
        deserializer: D,
        hasher: S,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor { _marker: PhantomData, hasher })
    }
}

struct SeqVisitor<I, N, V, S> {
    _marker: PhantomData<fn() -> (I, N, V)>,
    hasher: S,
}

impl<'de, I, N, V, S> Visitor<'de> for SeqVisitor<I, N, V, S>
where
    I: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    N: Eq + Hash + Clone + Nullable + fmt::Debug + Deserialize<'de>,
    V: Nullable + Deserialize<'de>,
    S: Clone + BuildHasher,
{
    type Value = DuoKeyMap<I, N, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of [id, name, value] triples")
    }

    fn visit_seq<Access>(
        self,
        mut seq: Access,
    ) -> Result<Self::Value, Access::Error>
    where
        Access: SeqAccess<'de>,
    {
        let mut map = match seq.size_hint() {
            Some(size) => {
                DuoKeyMap::with_capacity_and_hasher(size, self.hasher)
            }
            None => DuoKeyMap::with_hasher(self.hasher),
        };

        while let Some((id, name, value)) = seq.next_element()? {
            map.add(id, name, value).map_err(serde_core::de::Error::custom)?;
        }

        Ok(map)
    }
}
