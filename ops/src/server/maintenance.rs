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

//! Maintenance policies.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const LSMAINT_MAINT_POLICY: ClassId = ClassId::from_static("LsmaintMaintPolicy");

fn maintenance_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("maint-{}", name))
}

/// Create a maintenance policy. `uptime_disr` is one of `immediate`,
/// `timer-automatic`, `user-ack`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn maintenance_policy_create<S: Session>(
    session: &S,
    name: &str,
    uptime_disr: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(LSMAINT_MAINT_POLICY, maintenance_policy_dn(parent_dn, name))
        .with_property("name", name)
        .with_property("uptime_disr", uptime_disr)
        .with_property("descr", descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Modify a maintenance policy. Only provided fields are changed.
pub async fn maintenance_policy_modify<S: Session>(
    session: &S,
    name: &str,
    uptime_disr: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let dn = maintenance_policy_dn(parent_dn, name);
    let mut mo = require_dn(session, "maintenance policy", &dn).await?;

    if let Some(uptime_disr) = uptime_disr {
        mo.set_property("uptime_disr", uptime_disr);
    }
    if let Some(descr) = descr {
        mo.set_property("descr", descr);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a maintenance policy.
pub async fn maintenance_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = maintenance_policy_dn(parent_dn, name);
    require_dn(session, "maintenance policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the maintenance policy exists with the expected properties.
pub async fn maintenance_policy_exists<S: Session>(
    session: &S,
    name: &str,
    uptime_disr: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &maintenance_policy_dn(parent_dn, name),
        &[("uptime_disr", uptime_disr), ("descr", descr)],
    )
    .await
}
