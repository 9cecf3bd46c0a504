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

//! Managed objects
//!
//! A managed object (Mo) is a vendor-defined record identified by its
//! [`Dn`](crate::Dn) and carrying a flat map of string properties. This
//! crate never interprets property values; enumerations like
//! `"yes"`/`"no"` or `"associated"` stay strings, matching the wire model.

use crate::Dn;
use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use serde::Deserialize;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Class identifier of a managed object, e.g. `FirmwareRunning`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClassId(Cow<'static, str>);

impl ClassId {
    /// Class id from a static name. Usable in `const` context.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The raw class id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClassId {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<&str> for ClassId {
    fn from(s: &str) -> Self {
        Self(Cow::Owned(s.into()))
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

/// A managed object: class id, dn and string properties.
///
/// Values of this type are requests or snapshots, never live handles; a
/// query returns the state at query time and a write submits exactly the
/// properties present in the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManagedObject {
    class_id: ClassId,
    dn: Dn,
    properties: BTreeMap<String, String>,
}

impl ManagedObject {
    /// Create a managed object with no properties.
    #[must_use]
    pub fn new(class_id: ClassId, dn: Dn) -> Self {
        Self {
            class_id,
            dn,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Set a property on an existing object.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Get a property value.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// True if the property is present and equals `value`.
    #[must_use]
    pub fn property_is(&self, name: &str, value: &str) -> bool {
        self.property(name) == Some(value)
    }

    /// Class id of this object.
    #[must_use]
    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    /// Dn of this object.
    #[must_use]
    pub fn dn(&self) -> &Dn {
        &self.dn
    }

    /// Iterate over `(name, value)` property pairs in name order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
