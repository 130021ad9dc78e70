// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Macros for this crate.

/// Creates a [`DuoKeyMap`](crate::DuoKeyMap) from a list of
/// `(id, name) => value` entries.
///
/// Entries are added in order with [`DuoKeyMap::add`](crate::DuoKeyMap::add).
/// An optional hasher expression may be given first, followed by a `;`.
///
/// # Panics
///
/// Panics if the same `(id, name)` pair appears twice, or if any id, name or
/// value is null.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use duokey::duo_key_map;
///
/// let map = duo_key_map! {
///     (1, "A") => "one-a",
///     (1, "B") => "one-b",
///     (2, "A") => "two-a",
/// };
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.try_get_by_id(&1), Ok(Some(&"one-a")));
///
/// let map = duo_key_map! {
///     std::hash::RandomState::new();
///     (1, 'x') => 0.5,
/// };
/// assert_eq!(map.try_get(&1, &'x'), Some(&0.5));
/// # }
/// ```
#[macro_export]
macro_rules! duo_key_map {
    ($(($id:expr, $name:expr) => $value:expr),* $(,)?) => {
        $crate::duo_key_map!(
            $crate::DefaultHashBuilder::default();
            $(($id, $name) => $value),*
        )
    };
    ($hasher:expr; $(($id:expr, $name:expr) => $value:expr),* $(,)?) => {{
        let mut map = $crate::DuoKeyMap::with_hasher($hasher);
        $(
            if let Err(error) = map.add($id, $name, $value) {
                panic!("duo_key_map!: {}", error);
            }
        )*
        map
    }};
}
