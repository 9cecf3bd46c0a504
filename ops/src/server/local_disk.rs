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

//! Local disk policies and direct disk state control.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const STORAGE_LOCAL_DISK_CONFIG_POLICY: ClassId =
    ClassId::from_static("StorageLocalDiskConfigPolicy");
const STORAGE_LOCAL_DISK: ClassId = ClassId::from_static("StorageLocalDisk");

fn local_disk_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("local-disk-config-{}", name))
}

/// Optional local disk policy properties.
#[derive(Debug, Clone)]
pub struct LocalDiskPolicyParams {
    pub mode: String,
    /// `enable`/`disable`.
    pub flex_flash_state: String,
    /// `enable`/`disable`.
    pub flex_flash_raid_reporting_state: String,
    /// `yes`/`no`.
    pub protect_config: String,
    pub descr: String,
}

impl Default for LocalDiskPolicyParams {
    fn default() -> Self {
        Self {
            mode: "any-configuration".into(),
            flex_flash_state: "enable".into(),
            flex_flash_raid_reporting_state: "enable".into(),
            protect_config: "yes".into(),
            descr: String::new(),
        }
    }
}

/// Create a local disk policy.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn local_disk_policy_create<S: Session>(
    session: &S,
    name: &str,
    params: &LocalDiskPolicyParams,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(
        STORAGE_LOCAL_DISK_CONFIG_POLICY,
        local_disk_policy_dn(parent_dn, name),
    )
    .with_property("protect_config", &params.protect_config)
    .with_property("name", name)
    .with_property("descr", &params.descr)
    .with_property(
        "flex_flash_raid_reporting_state",
        &params.flex_flash_raid_reporting_state,
    )
    .with_property("flex_flash_state", &params.flex_flash_state)
    .with_property("mode", &params.mode);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Modify a local disk policy. Only provided fields are changed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the policy does not exist.
pub async fn local_disk_policy_modify<S: Session>(
    session: &S,
    name: &str,
    mode: Option<&str>,
    flex_flash_state: Option<&str>,
    flex_flash_raid_reporting_state: Option<&str>,
    protect_config: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let dn = local_disk_policy_dn(parent_dn, name);
    let mut mo = require_dn(session, "local disk policy", &dn).await?;

    if let Some(descr) = descr {
        mo.set_property("descr", descr);
    }
    if let Some(mode) = mode {
        mo.set_property("mode", mode);
    }
    if let Some(flex_flash_state) = flex_flash_state {
        mo.set_property("flex_flash_state", flex_flash_state);
    }
    if let Some(state) = flex_flash_raid_reporting_state {
        mo.set_property("flex_flash_raid_reporting_state", state);
    }
    if let Some(protect_config) = protect_config {
        mo.set_property("protect_config", protect_config);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a local disk policy.
pub async fn local_disk_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = local_disk_policy_dn(parent_dn, name);
    require_dn(session, "local disk policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the local disk policy exists with the expected properties.
pub async fn local_disk_policy_exists<S: Session>(
    session: &S,
    name: &str,
    expected: &LocalDiskPolicyMatch,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &local_disk_policy_dn(parent_dn, name),
        &[
            ("mode", expected.mode.as_deref()),
            ("flex_flash_state", expected.flex_flash_state.as_deref()),
            (
                "flex_flash_raid_reporting_state",
                expected.flex_flash_raid_reporting_state.as_deref(),
            ),
            ("protect_config", expected.protect_config.as_deref()),
            ("descr", expected.descr.as_deref()),
        ],
    )
    .await
}

/// Expected local disk policy properties for [`local_disk_policy_exists`].
#[derive(Debug, Clone, Default)]
pub struct LocalDiskPolicyMatch {
    pub mode: Option<String>,
    pub flex_flash_state: Option<String>,
    pub flex_flash_raid_reporting_state: Option<String>,
    pub protect_config: Option<String>,
    pub descr: Option<String>,
}

/// Set the state of a physical disk on a rack server to `jbod` or
/// `unconfigured-good` (pre-RAID). Do this before applying a service
/// profile to the server.
///
/// `controller` is the dn segment of the storage controller the disk is
/// attached to, e.g. `storage-SAS-1`.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for any other state string; nothing is
/// written in that case.
pub async fn disk_state_set<S: Session>(
    session: &S,
    rack_id: u32,
    disk_id: u32,
    state: &str,
    controller: &str,
) -> Result<ManagedObject, Error<S>> {
    if state != "unconfigured-good" && state != "jbod" {
        return Err(Error::InvalidValue {
            field: "disk state",
            value: state.to_string(),
        });
    }

    let dn = Dn::sys()
        .child(format!("rack-unit-{}", rack_id))
        .child("board")
        .child(controller)
        .child(format!("disk-{}", disk_id));
    let mo = ManagedObject::new(STORAGE_LOCAL_DISK, dn)
        .with_property("id", disk_id.to_string())
        .with_property("admin_action", state)
        .with_property("admin_action_trigger", "triggered");
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}
