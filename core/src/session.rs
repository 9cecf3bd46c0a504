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

//! UCS Manager session abstraction
//!
//! This module defines the transport-agnostic [`Session`] trait — a minimal
//! interface for interacting with a UCS Manager instance. Implementors
//! provide asynchronous operations to resolve managed objects by dn, run
//! class-wide queries, stage writes and commit them.
//!
//! Key concepts:
//! - Object identity: every managed object is identified by its dn
//!   ([`crate::Dn`]); a dn either resolves to an object or it does not.
//! - Staged writes: `add_mo`/`set_mo`/`remove_mo` stage changes that take
//!   effect on `commit`. Automation code issues exactly one commit per
//!   logical operation.
//! - Reconnect: `login(force)` revalidates or re-establishes the session.
//!   During firmware activation the managed endpoint reboots, so callers
//!   must expect transient failures from every method.
//!
//! Notes for implementors:
//! - The trait is `Send + Sync` and returns `Send` futures to support use
//!   in async runtimes and multithreaded contexts.
//! - Errors should implement `std::error::Error` and be safely
//!   transferable across threads.

use crate::ClassId;
use crate::Dn;
use crate::ManagedObject;
use crate::PropFilter;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use url::Url;

/// Session trait defines access to a UCS Manager instance.
pub trait Session: Send + Sync {
    /// Session error.
    type Error: StdError + Send + Sync;

    /// Resolve a single managed object by dn. `None` if the dn does not
    /// resolve.
    fn query_dn(
        &self,
        dn: &Dn,
    ) -> impl Future<Output = Result<Option<ManagedObject>, Self::Error>> + Send;

    /// Children of the object at `in_dn`, optionally restricted to one
    /// class.
    fn query_children(
        &self,
        in_dn: &Dn,
        class_id: Option<&ClassId>,
    ) -> impl Future<Output = Result<Vec<ManagedObject>, Self::Error>> + Send;

    /// All objects of a class, optionally restricted by a property filter.
    fn query_class_id(
        &self,
        class_id: &ClassId,
        filter: Option<&PropFilter>,
    ) -> impl Future<Output = Result<Vec<ManagedObject>, Self::Error>> + Send;

    /// Stage creation of a managed object. With `modify_present` an
    /// existing object at the same dn is updated instead of rejected.
    fn add_mo(
        &self,
        mo: &ManagedObject,
        modify_present: bool,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Stage an update of an existing managed object.
    fn set_mo(&self, mo: &ManagedObject) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Stage removal of the object at `dn`.
    fn remove_mo(&self, dn: &Dn) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Apply all staged changes.
    fn commit(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Validate the session, or re-establish it when `force` is set.
    /// Returns `true` when the session is usable afterwards.
    fn login(&self, force: bool) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Terminate the session.
    fn logout(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Credentials used to authenticate a session.
///
/// Security notes:
/// - `Debug`/`Display` redact the password.
/// - Prefer short-lived instances and avoid logging credentials.
#[derive(Clone)]
pub struct SessionCredentials {
    /// Username to authenticate with.
    pub username: String,
    password: String,
}

impl SessionCredentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Get password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SessionCredentials(username: {}, password: [REDACTED])",
            self.username
        )
    }
}

/// Address of a UCS Manager instance.
///
/// Wraps the base URL and builds per-request URLs for session
/// implementations. Kept here so every transport binding addresses the
/// manager the same way.
#[derive(Debug, Clone)]
pub struct ManagerEndpoint {
    base_url: Url,
}

impl ManagerEndpoint {
    /// Create a new `ManagerEndpoint` from a base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Build a full URL for a path under the endpoint.
    #[must_use]
    pub fn with_path(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }
}

impl From<Url> for ManagerEndpoint {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

impl From<&ManagerEndpoint> for Url {
    fn from(endpoint: &ManagerEndpoint) -> Self {
        endpoint.base_url.clone()
    }
}
