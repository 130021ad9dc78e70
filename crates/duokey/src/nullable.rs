// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::errors::Argument;
use std::{borrow::Cow, rc::Rc, sync::Arc};

/// A type that may have a null sentinel value.
///
/// Mutating map operations reject ids, names and values for which
/// [`is_null`](Self::is_null) returns true.
///
/// Most types have no such value, and can implement this trait with an empty
/// `impl` block:
///
/// ```
/// use duokey::Nullable;
///
/// #[derive(Clone, Debug, Eq, Hash, PartialEq)]
/// struct UserId(u32);
///
/// impl Nullable for UserId {}
/// ```
///
/// `Option<T>` treats `None` as null, and references and smart pointers
/// forward to the type they point to.
pub trait Nullable {
    /// Returns true if `self` is the null sentinel for this type.
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! impl_never_null {
    ($($ty:ty),* $(,)?) => {
        $(impl Nullable for $ty {})*
    };
}

impl_never_null!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    str,
    String,
);

impl<T> Nullable for Option<T> {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

// An empty collection is a value, not a missing one.
impl<T> Nullable for Vec<T> {}
impl<T> Nullable for [T] {}

impl<T: Nullable + ?Sized> Nullable for &T {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Box<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Rc<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Arc<T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ToOwned + ?Sized> Nullable for Cow<'_, T> {
    #[inline]
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

/// Returns the first null argument, checking id, name and value in that
/// order.
pub(crate) fn find_null<I, N, V>(
    id: &I,
    name: &N,
    value: &V,
) -> Option<Argument>
where
    I: Nullable + ?Sized,
    N: Nullable + ?Sized,
    V: Nullable + ?Sized,
{
    find_null_key(id, name)
        .or_else(|| value.is_null().then_some(Argument::Value))
}

/// Returns the first null key part, checking id then name.
pub(crate) fn find_null_key<I, N>(id: &I, name: &N) -> Option<Argument>
where
    I: Nullable + ?Sized,
    N: Nullable + ?Sized,
{
    if id.is_null() {
        Some(Argument::Id)
    } else if name.is_null() {
        Some(Argument::Name)
    } else {
        None
    }
}
