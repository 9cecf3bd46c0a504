// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Distinguished names of managed objects
//!
//! A DN is the `/`-separated path that identifies a managed object in the
//! UCS Manager object tree, e.g. `org-root/org-finance/mac-pool-lab`. The
//! last segment is the object's relative name (RN), which encodes its class
//! and naming properties.
//!
//! Notes
//! - [`Dn`] is intentionally semantic-unaware; it does not validate content.
//! - [`Dn::org_root()`] returns the conventional root organization path.
//! - Formatting/Display returns the raw underlying string.
//!
//! Example
//! ```rust
//! use ucsm_core::Dn;
//!
//! let root = Dn::org_root();
//! assert_eq!(root.child("org-finance").to_string(), "org-root/org-finance");
//! ```

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use serde::Deserialize;
use serde::Serialize;

/// Distinguished name of a managed object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Dn(String);

impl Dn {
    /// Root organization dn.
    #[must_use]
    pub fn org_root() -> Self {
        Self("org-root".into())
    }

    /// System tree dn.
    #[must_use]
    pub fn sys() -> Self {
        Self("sys".into())
    }

    /// Append a relative name, producing the dn of a child object.
    #[must_use]
    pub fn child(&self, rn: impl AsRef<str>) -> Self {
        Self(format!("{}/{}", self.0, rn.as_ref()))
    }

    /// Dn of the containing object, `None` for a top-level dn.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once('/').map(|(parent, _)| Self(parent.into()))
    }

    /// Relative name: the last path segment.
    #[must_use]
    pub fn rn(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, rn)| rn)
    }

    /// The raw dn string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Dn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Dn {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl Display for Dn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}
