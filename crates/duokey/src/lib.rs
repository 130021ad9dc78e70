// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maps keyed by a composite `(id, name)` pair, with lookups by either half.
//!
//! # Motivation
//!
//! A plain `HashMap<(Id, Name), V>` answers "what is stored under this exact
//! pair?" in constant time, but "everything stored under id 7" needs a full
//! scan:
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut map: HashMap<(u32, &str), &str> = HashMap::new();
//! map.insert((7, "alice"), "first");
//! map.insert((7, "bob"), "second");
//!
//! // O(n), and it gets slower as the map grows.
//! let for_seven: Vec<_> =
//!     map.iter().filter(|((id, _), _)| *id == 7).collect();
//! assert_eq!(for_seven.len(), 2);
//! ```
//!
//! Keeping a couple of side maps (`id -> names`, `name -> ids`) fixes that,
//! but then every insert and remove has to update three structures in
//! lockstep, and a missed cleanup leaves the side maps pointing at entries
//! that no longer exist.
//!
//! [`DuoKeyMap`] owns all three structures and only exposes operations that
//! keep them consistent. [`SharedDuoKeyMap`] wraps it in a single lock for use
//! from multiple threads.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "default-hasher")] {
//! use duokey::DuoKeyMap;
//!
//! let mut map = DuoKeyMap::new();
//! map.add(1, "A", "one-a").unwrap();
//! map.add(1, "B", "one-b").unwrap();
//! map.add(2, "A", "two-a").unwrap();
//!
//! assert_eq!(map.get(&1, &"B").unwrap(), &"one-b");
//!
//! let mut by_id: Vec<_> = map.get_by_id(&1).unwrap().collect();
//! by_id.sort();
//! assert_eq!(by_id, vec![(&"A", &"one-a"), (&"B", &"one-b")]);
//!
//! let mut by_name: Vec<_> = map.get_by_name(&"A").unwrap().collect();
//! by_name.sort();
//! assert_eq!(by_name, vec![(&1, &"one-a"), (&2, &"two-a")]);
//! # }
//! ```
//!
//! # Null arguments
//!
//! Rust references are never null, but key and value types can still carry a
//! sentinel meaning "nothing here", most commonly `None`. Every type stored
//! in these maps implements [`Nullable`], and mutating operations reject
//! sentinel arguments with [`Error::NullArgument`](errors::Error::NullArgument)
//! before touching the map.
//!
//! # Features
//!
//! - `default-hasher` (enabled by default): use [`foldhash`] as the default
//!   hasher, and provide `new` and `with_capacity` constructors.
//! - `serde`: serialize maps as a list of `[id, name, value]` triples.
//!
//! [`foldhash`]: https://docs.rs/foldhash

#![warn(missing_docs)]
#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub mod duo_key_map;
pub mod errors;
mod macros;
mod nullable;
pub mod shared_map;
mod support;

pub use duo_key_map::{CompositeKey, DuoKeyMap};
#[doc(no_inline)]
pub use errors::Error;
pub use nullable::Nullable;
pub use shared_map::SharedDuoKeyMap;
pub use support::hash_builder::DefaultHashBuilder;
