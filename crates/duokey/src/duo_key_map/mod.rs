// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A map keyed by `(id, name)` pairs, with secondary indexes on each half of
//! the key.

mod imp;
mod iter;
mod key;
#[cfg(feature = "serde")]
mod serde_impls;
mod tables;

pub use imp::DuoKeyMap;
pub use iter::{ById, ByName, Components, IntoIter, Iter, Keys, Values};
pub use key::CompositeKey;
