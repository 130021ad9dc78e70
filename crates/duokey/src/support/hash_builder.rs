// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Default hasher for the map types in this crate.
#[cfg(feature = "default-hasher")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

#[cfg(not(feature = "default-hasher"))]
mod uninhabited {
    use core::hash::{BuildHasher, Hasher};

    /// Placeholder default hasher, used when the `default-hasher` feature is
    /// disabled.
    ///
    /// This type cannot be constructed, so maps must be created with
    /// `with_hasher` or `with_capacity_and_hasher`.
    #[derive(Clone, Copy, Debug)]
    pub enum DefaultHashBuilder {}

    impl BuildHasher for DefaultHashBuilder {
        type Hasher = Self;

        fn build_hasher(&self) -> Self::Hasher {
            match *self {}
        }
    }

    impl Hasher for DefaultHashBuilder {
        fn write(&mut self, _bytes: &[u8]) {
            match *self {}
        }

        fn finish(&self) -> u64 {
            match *self {}
        }
    }
}

#[cfg(not(feature = "default-hasher"))]
pub use uninhabited::DefaultHashBuilder;
