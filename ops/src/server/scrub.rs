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

//! Scrub policies.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const COMPUTE_SCRUB_POLICY: ClassId = ClassId::from_static("ComputeScrubPolicy");

fn scrub_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("scrub-{}", name))
}

/// Create a scrub policy; each flag is `yes`/`no`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn scrub_policy_create<S: Session>(
    session: &S,
    name: &str,
    flex_flash_scrub: &str,
    bios_settings_scrub: &str,
    disk_scrub: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(COMPUTE_SCRUB_POLICY, scrub_policy_dn(parent_dn, name))
        .with_property("flex_flash_scrub", flex_flash_scrub)
        .with_property("name", name)
        .with_property("descr", descr)
        .with_property("bios_settings_scrub", bios_settings_scrub)
        .with_property("disk_scrub", disk_scrub);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Modify a scrub policy. Only provided fields are changed.
pub async fn scrub_policy_modify<S: Session>(
    session: &S,
    name: &str,
    flex_flash_scrub: Option<&str>,
    bios_settings_scrub: Option<&str>,
    disk_scrub: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let dn = scrub_policy_dn(parent_dn, name);
    let mut mo = require_dn(session, "scrub policy", &dn).await?;

    if let Some(flex_flash_scrub) = flex_flash_scrub {
        mo.set_property("flex_flash_scrub", flex_flash_scrub);
    }
    if let Some(bios_settings_scrub) = bios_settings_scrub {
        mo.set_property("bios_settings_scrub", bios_settings_scrub);
    }
    if let Some(disk_scrub) = disk_scrub {
        mo.set_property("disk_scrub", disk_scrub);
    }
    if let Some(descr) = descr {
        mo.set_property("descr", descr);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a scrub policy.
pub async fn scrub_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = scrub_policy_dn(parent_dn, name);
    require_dn(session, "scrub policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the scrub policy exists with the expected properties.
pub async fn scrub_policy_exists<S: Session>(
    session: &S,
    name: &str,
    flex_flash_scrub: Option<&str>,
    bios_settings_scrub: Option<&str>,
    disk_scrub: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &scrub_policy_dn(parent_dn, name),
        &[
            ("flex_flash_scrub", flex_flash_scrub),
            ("bios_settings_scrub", bios_settings_scrub),
            ("disk_scrub", disk_scrub),
            ("descr", descr),
        ],
    )
    .await
}
