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

//! Power control policies.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const POWER_POLICY: ClassId = ClassId::from_static("PowerPolicy");

fn power_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("power-policy-{}", name))
}

/// Create a power control policy. `prio` is `no-cap`, `utility` or a
/// priority value.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn power_control_policy_create<S: Session>(
    session: &S,
    name: &str,
    prio: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(POWER_POLICY, power_policy_dn(parent_dn, name))
        .with_property("name", name)
        .with_property("prio", prio)
        .with_property("descr", descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Modify a power control policy. Only provided fields are changed.
pub async fn power_control_policy_modify<S: Session>(
    session: &S,
    name: &str,
    prio: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let dn = power_policy_dn(parent_dn, name);
    let mut mo = require_dn(session, "power control policy", &dn).await?;

    if let Some(prio) = prio {
        mo.set_property("prio", prio);
    }
    if let Some(descr) = descr {
        mo.set_property("descr", descr);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a power control policy.
pub async fn power_control_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = power_policy_dn(parent_dn, name);
    require_dn(session, "power control policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the power control policy exists with the expected properties.
pub async fn power_control_policy_exists<S: Session>(
    session: &S,
    name: &str,
    prio: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &power_policy_dn(parent_dn, name),
        &[("prio", prio), ("descr", descr)],
    )
    .await
}
