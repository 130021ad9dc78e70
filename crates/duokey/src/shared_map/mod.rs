// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A [`DuoKeyMap`](crate::DuoKeyMap) behind a single reader-writer lock.

mod imp;
mod iter;
#[cfg(feature = "serde")]
mod serde_impls;

pub use imp::SharedDuoKeyMap;
pub use iter::{SharedById, SharedByName};
