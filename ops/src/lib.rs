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

//! Automation operations for Cisco UCS Manager.
//!
//! Every public function wraps one remote configuration action against a
//! [`Session`]: resolve the objects it depends on, stage the write(s), and
//! commit exactly once. Functions never retry; the only loops live in
//! [`firmware`] (activation/download waiters) and
//! [`server::deployment`] (service-profile association waiters), both
//! bounded by a timeout and driven through a [`Clock`](ucsm_core::Clock)
//! so they are testable against simulated time.
//!
//! Conventions:
//! - `*_create` resolves the parent first and fails with
//!   [`Error::NotFound`] without writing when it is absent.
//! - `*_modify` overlays only the provided `Option` fields onto the live
//!   object.
//! - `*_exists` reports `true` only when the object is present and every
//!   provided field matches it.

pub mod admin;
pub mod error;
pub mod firmware;
pub mod network;
pub mod org;
pub mod server;

#[doc(inline)]
pub use error::Error;

use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

/// Resolve `dn` or fail with [`Error::NotFound`] tagged with `kind`.
pub(crate) async fn require_dn<S: Session>(
    session: &S,
    kind: &'static str,
    dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    session
        .query_dn(dn)
        .await
        .map_err(Error::Session)?
        .ok_or_else(|| Error::NotFound {
            kind,
            dn: dn.clone(),
        })
}

/// Existence check shared by the `*_exists` functions: the object must be
/// present and every check with a provided value must match.
pub(crate) async fn exists_with_props<S: Session>(
    session: &S,
    dn: &Dn,
    checks: &[(&str, Option<&str>)],
) -> Result<bool, Error<S>> {
    match session.query_dn(dn).await.map_err(Error::Session)? {
        Some(mo) => Ok(checks.iter().all(|(name, expected)| match expected {
            Some(expected) => mo.property_is(name, expected),
            None => true,
        })),
        None => Ok(false),
    }
}
