// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::fmt;

/// Debug impl for a static string without quotes.
pub(crate) struct StrDisplayAsDebug(pub(crate) &'static str);

impl fmt::Debug for StrDisplayAsDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Formats an `(id, name)` pair as `{id: .., name: ..}`.
pub(crate) struct PairDebug<'a, I, N> {
    pub(crate) id: &'a I,
    pub(crate) name: &'a N,
}

impl<I: fmt::Debug, N: fmt::Debug> fmt::Debug for PairDebug<'_, I, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entry(&StrDisplayAsDebug("id"), self.id)
            .entry(&StrDisplayAsDebug("name"), self.name)
            .finish()
    }
}
