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

//! Boot policies.
//!
//! A boot policy carries an ordered set of boot device entries. Device
//! names accepted by [`boot_policy_create`]:
//! `cdrom`/`cdrom-local`, `cdrom-cimc`, `cdrom-remote`, `lun`,
//! `local-disk`, `sd-card`, `usb-internal`, `usb-external`, `floppy`/
//! `floppy-local`, `floppy-external`, `virtual-drive`. Local storage
//! entries share one `storage/local-storage` subtree; entries already on
//! the policy but absent from the requested set are removed.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use tracing::debug;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const LSBOOT_POLICY: ClassId = ClassId::from_static("LsbootPolicy");
const LSBOOT_VIRTUAL_MEDIA: ClassId = ClassId::from_static("LsbootVirtualMedia");
const LSBOOT_STORAGE: ClassId = ClassId::from_static("LsbootStorage");
const LSBOOT_LOCAL_STORAGE: ClassId = ClassId::from_static("LsbootLocalStorage");
const LSBOOT_DEFAULT_LOCAL_IMAGE: ClassId = ClassId::from_static("LsbootDefaultLocalImage");
const LSBOOT_LOCAL_HDD_IMAGE: ClassId = ClassId::from_static("LsbootLocalHddImage");
const LSBOOT_USB_FLASH_STORAGE_IMAGE: ClassId = ClassId::from_static("LsbootUsbFlashStorageImage");
const LSBOOT_USB_INTERNAL_IMAGE: ClassId = ClassId::from_static("LsbootUsbInternalImage");
const LSBOOT_USB_EXTERNAL_IMAGE: ClassId = ClassId::from_static("LsbootUsbExternalImage");

fn boot_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("boot-policy-{}", name))
}

/// Optional boot policy properties.
#[derive(Debug, Clone)]
pub struct BootPolicyParams {
    pub descr: String,
    /// `yes`/`no`.
    pub reboot_on_update: String,
    /// `yes`/`no`.
    pub enforce_vnic_name: String,
    /// `legacy` or `uefi`.
    pub boot_mode: String,
}

impl Default for BootPolicyParams {
    fn default() -> Self {
        Self {
            descr: String::new(),
            reboot_on_update: "yes".into(),
            enforce_vnic_name: "yes".into(),
            boot_mode: "legacy".into(),
        }
    }
}

fn virtual_media(policy_dn: &Dn, access: &str, order: &str) -> ManagedObject {
    ManagedObject::new(LSBOOT_VIRTUAL_MEDIA, policy_dn.child(format!("{}-vm", access)))
        .with_property("access", access)
        .with_property("order", order)
}

fn storage_image(local_storage_dn: &Dn, class_id: ClassId, rn: &str, order: &str) -> ManagedObject {
    ManagedObject::new(class_id, local_storage_dn.child(rn)).with_property("order", order)
}

/// Create a boot policy with the given `(order, device)` entries.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn boot_policy_create<S: Session>(
    session: &S,
    name: &str,
    params: &BootPolicyParams,
    boot_devices: &[(&str, &str)],
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let policy = ManagedObject::new(LSBOOT_POLICY, boot_policy_dn(parent_dn, name))
        .with_property("name", name)
        .with_property("descr", &params.descr)
        .with_property("reboot_on_update", &params.reboot_on_update)
        .with_property("enforce_vnic_name", &params.enforce_vnic_name)
        .with_property("boot_mode", &params.boot_mode);
    session.add_mo(&policy, true).await.map_err(Error::Session)?;

    // Drop stale device entries whose order is no longer requested.
    let children = session
        .query_children(policy.dn(), None)
        .await
        .map_err(Error::Session)?;
    for child in children {
        if let Some(order) = child.property("order") {
            if !boot_devices.iter().any(|(o, _)| *o == order) {
                debug!(dn = %child.dn(), "deleting boot device from boot policy");
                session
                    .remove_mo(child.dn())
                    .await
                    .map_err(Error::Session)?;
            }
        }
    }

    let mut local_storage_dn = None;
    for (order, device) in boot_devices {
        debug!(order, device, "add boot device");
        let entries = boot_device_entries(policy.dn(), &mut local_storage_dn, order, device);
        if entries.is_empty() {
            debug!(device, "boot device option not recognized");
        }
        for entry in entries {
            session.add_mo(&entry, true).await.map_err(Error::Session)?;
        }
    }

    session.commit().await.map_err(Error::Session)?;
    Ok(policy)
}

fn boot_device_entries(
    policy_dn: &Dn,
    local_storage_dn: &mut Option<Dn>,
    order: &str,
    device: &str,
) -> Vec<ManagedObject> {
    match device {
        "cdrom-local" | "cdrom" => vec![virtual_media(policy_dn, "read-only-local", order)],
        "cdrom-cimc" => vec![virtual_media(policy_dn, "read-only-remote-cimc", order)],
        "cdrom-remote" => vec![virtual_media(policy_dn, "read-only-remote", order)],
        "floppy" | "floppy-local" => vec![virtual_media(policy_dn, "read-write-local", order)],
        "floppy-external" => vec![virtual_media(policy_dn, "read-write-remote", order)],
        "virtual-drive" => vec![virtual_media(policy_dn, "read-write-drive", order)],
        "lun" | "local-disk" | "sd-card" | "usb-internal" | "usb-external" => {
            let mut entries = Vec::new();
            let storage_dn = match local_storage_dn {
                Some(dn) => dn.clone(),
                None => {
                    // One shared storage subtree for all local entries;
                    // its order comes from the first of them.
                    let storage = ManagedObject::new(LSBOOT_STORAGE, policy_dn.child("storage"))
                        .with_property("order", order);
                    let local =
                        ManagedObject::new(LSBOOT_LOCAL_STORAGE, storage.dn().child("local-storage"));
                    let dn = local.dn().clone();
                    entries.push(storage);
                    entries.push(local);
                    *local_storage_dn = Some(dn.clone());
                    dn
                }
            };
            let image = match device {
                "lun" => storage_image(&storage_dn, LSBOOT_LOCAL_HDD_IMAGE, "local-hdd", order),
                "local-disk" => {
                    storage_image(&storage_dn, LSBOOT_DEFAULT_LOCAL_IMAGE, "local-any", order)
                }
                "sd-card" => {
                    storage_image(&storage_dn, LSBOOT_USB_FLASH_STORAGE_IMAGE, "sd", order)
                }
                "usb-internal" => {
                    storage_image(&storage_dn, LSBOOT_USB_INTERNAL_IMAGE, "usb-intern", order)
                }
                _ => storage_image(&storage_dn, LSBOOT_USB_EXTERNAL_IMAGE, "usb-extern", order),
            };
            entries.push(image);
            entries
        }
        _ => Vec::new(),
    }
}

/// Modify a boot policy. Only provided fields are changed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the boot policy does not exist.
pub async fn boot_policy_modify<S: Session>(
    session: &S,
    name: &str,
    descr: Option<&str>,
    reboot_on_update: Option<&str>,
    enforce_vnic_name: Option<&str>,
    boot_mode: Option<&str>,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let dn = boot_policy_dn(parent_dn, name);
    let mut mo = require_dn(session, "boot policy", &dn).await?;

    if let Some(descr) = descr {
        mo.set_property("descr", descr);
    }
    if let Some(reboot_on_update) = reboot_on_update {
        mo.set_property("reboot_on_update", reboot_on_update);
    }
    if let Some(enforce_vnic_name) = enforce_vnic_name {
        mo.set_property("enforce_vnic_name", enforce_vnic_name);
    }
    if let Some(boot_mode) = boot_mode {
        mo.set_property("boot_mode", boot_mode);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a boot policy.
pub async fn boot_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = boot_policy_dn(parent_dn, name);
    require_dn(session, "boot policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the boot policy exists with the expected properties.
pub async fn boot_policy_exists<S: Session>(
    session: &S,
    name: &str,
    reboot_on_update: Option<&str>,
    enforce_vnic_name: Option<&str>,
    boot_mode: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &boot_policy_dn(parent_dn, name),
        &[
            ("boot_mode", boot_mode),
            ("reboot_on_update", reboot_on_update),
            ("enforce_vnic_name", enforce_vnic_name),
            ("descr", descr),
        ],
    )
    .await
}
