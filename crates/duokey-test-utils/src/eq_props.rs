// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// Asserts that `a` and `b` are equal in both directions, and each equal to
/// itself.
///
/// Map equality ignores insertion history, so it is worth checking that it
/// stays symmetric.
#[allow(clippy::eq_op)]
pub fn assert_eq_props<T: Eq + fmt::Debug>(a: T, b: T) {
    assert_eq!(a, a, "a == a");
    assert_eq!(b, b, "b == b");
    assert_eq!(a, b, "a == b");
    assert_eq!(b, a, "b == a");
}

/// Asserts that `a` and `b` are unequal in both directions, while each is
/// still equal to itself.
#[allow(clippy::eq_op)]
pub fn assert_ne_props<T: Eq + fmt::Debug>(a: T, b: T) {
    assert_eq!(a, a, "a == a");
    assert_eq!(b, b, "b == b");
    assert_ne!(a, b, "a != b");
    assert_ne!(b, a, "b != a");
}
