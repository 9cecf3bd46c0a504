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
//! Integration tests of server and LAN policies.

use std::error::Error as StdError;
use tokio::test;
use ucsm_ops::network::qos::qos_class_conf_drift;
use ucsm_ops::network::qos::qos_class_disable;
use ucsm_ops::network::qos::qos_class_enable;
use ucsm_ops::network::qos::qos_policy_add;
use ucsm_ops::network::qos::qos_policy_exists;
use ucsm_ops::network::qos::QosClassMatch;
use ucsm_ops::network::qos::QosClassParams;
use ucsm_ops::server::bios::bios_policy_create;
use ucsm_ops::server::bios::bios_conf_quiet_boot;
use ucsm_ops::server::bios::BiosPolicyParams;
use ucsm_ops::server::boot_policy::boot_policy_create;
use ucsm_ops::server::boot_policy::boot_policy_exists;
use ucsm_ops::server::boot_policy::BootPolicyParams;
use ucsm_ops::server::local_disk::local_disk_policy_create;
use ucsm_ops::server::local_disk::LocalDiskPolicyParams;
use ucsm_ops::server::maintenance::maintenance_policy_modify;
use ucsm_ops::server::power::power_control_policy_exists;
use ucsm_ops::server::scrub::scrub_policy_create;
use ucsm_ops::Error;
use ucsm_tests::mo;
use ucsm_tests::Dn;
use ucsm_tests::Expect;
use ucsm_tests::ManagedObject;
use ucsm_tests::Session;

fn root_org() -> ManagedObject {
    mo("OrgOrg", "org-root", &[("name", "root")])
}

#[test]
async fn boot_policy_create_stages_device_tree() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root", root_org()));

    let policy_dn = "org-root/boot-policy-sample";
    let policy = mo(
        "LsbootPolicy",
        policy_dn,
        &[
            ("name", "sample"),
            ("descr", ""),
            ("reboot_on_update", "yes"),
            ("enforce_vnic_name", "yes"),
            ("boot_mode", "legacy"),
        ],
    );
    session.expect(Expect::add_mo(&policy, true));
    session.expect(Expect::query_children(policy_dn, None, &[]));

    // First local storage entry opens the shared storage subtree.
    let storage = mo(
        "LsbootStorage",
        "org-root/boot-policy-sample/storage",
        &[("order", "1")],
    );
    let local_storage = mo(
        "LsbootLocalStorage",
        "org-root/boot-policy-sample/storage/local-storage",
        &[],
    );
    let usb_external = mo(
        "LsbootUsbExternalImage",
        "org-root/boot-policy-sample/storage/local-storage/usb-extern",
        &[("order", "1")],
    );
    session.expect(Expect::add_mo(&storage, true));
    session.expect(Expect::add_mo(&local_storage, true));
    session.expect(Expect::add_mo(&usb_external, true));

    let cdrom = mo(
        "LsbootVirtualMedia",
        "org-root/boot-policy-sample/read-only-local-vm",
        &[("access", "read-only-local"), ("order", "2")],
    );
    session.expect(Expect::add_mo(&cdrom, true));

    let usb_internal = mo(
        "LsbootUsbInternalImage",
        "org-root/boot-policy-sample/storage/local-storage/usb-intern",
        &[("order", "3")],
    );
    session.expect(Expect::add_mo(&usb_internal, true));
    session.expect(Expect::commit());

    let created = boot_policy_create(
        &session,
        "sample",
        &BootPolicyParams::default(),
        &[("1", "usb-external"), ("2", "cdrom-local"), ("3", "usb-internal")],
        &Dn::org_root(),
    )
    .await?;
    assert_eq!(created, policy);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn boot_policy_create_removes_stale_devices() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root", root_org()));

    let policy = mo(
        "LsbootPolicy",
        "org-root/boot-policy-sample",
        &[
            ("name", "sample"),
            ("descr", ""),
            ("reboot_on_update", "yes"),
            ("enforce_vnic_name", "yes"),
            ("boot_mode", "legacy"),
        ],
    );
    session.expect(Expect::add_mo(&policy, true));

    let stale = mo(
        "LsbootVirtualMedia",
        "org-root/boot-policy-sample/read-only-local-vm",
        &[("access", "read-only-local"), ("order", "7")],
    );
    session.expect(Expect::query_children(
        "org-root/boot-policy-sample",
        None,
        &[stale.clone()],
    ));
    session.expect(Expect::remove_mo(stale.dn().clone()));

    let floppy = mo(
        "LsbootVirtualMedia",
        "org-root/boot-policy-sample/read-write-local-vm",
        &[("access", "read-write-local"), ("order", "1")],
    );
    session.expect(Expect::add_mo(&floppy, true));
    session.expect(Expect::commit());

    boot_policy_create(
        &session,
        "sample",
        &BootPolicyParams::default(),
        &[("1", "floppy")],
        &Dn::org_root(),
    )
    .await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn boot_policy_exists_rejects_any_field_mismatch() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "LsbootPolicy",
        "org-root/boot-policy-sample",
        &[("boot_mode", "legacy"), ("reboot_on_update", "yes")],
    );
    session.expect(Expect::query_dn(
        "org-root/boot-policy-sample",
        existing,
    ));

    // Matching boot_mode must not mask the reboot_on_update mismatch.
    let exists = boot_policy_exists(
        &session,
        "sample",
        Some("no"),
        None,
        Some("legacy"),
        None,
        &Dn::org_root(),
    )
    .await?;
    assert!(!exists);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn maintenance_policy_modify_requires_existing_policy() {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root/maint-sample", None));

    let err = maintenance_policy_modify(&session, "sample", Some("user-ack"), None, &Dn::org_root())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            kind: "maintenance policy",
            ..
        }
    ));
    assert_eq!(session.remaining(), 0);
}

#[test]
async fn power_policy_exists_matches_provided_fields() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "PowerPolicy",
        "org-root/power-policy-sample",
        &[("prio", "no-cap"), ("descr", "")],
    );
    session.expect(Expect::query_dn("org-root/power-policy-sample", existing));
    assert!(
        power_control_policy_exists(&session, "sample", Some("no-cap"), None, &Dn::org_root())
            .await?
    );
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn scrub_policy_create_stages_flags() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root", root_org()));
    let policy = mo(
        "ComputeScrubPolicy",
        "org-root/scrub-sample",
        &[
            ("flex_flash_scrub", "yes"),
            ("name", "sample"),
            ("descr", ""),
            ("bios_settings_scrub", "no"),
            ("disk_scrub", "no"),
        ],
    );
    session.expect(Expect::add_mo(&policy, true));
    session.expect(Expect::commit());

    scrub_policy_create(&session, "sample", "yes", "no", "no", "", &Dn::org_root()).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn local_disk_policy_create_stages_all_fields() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root", root_org()));
    let policy = mo(
        "StorageLocalDiskConfigPolicy",
        "org-root/local-disk-config-sample",
        &[
            ("protect_config", "yes"),
            ("name", "sample"),
            ("descr", ""),
            ("flex_flash_raid_reporting_state", "enable"),
            ("flex_flash_state", "enable"),
            ("mode", "any-configuration"),
        ],
    );
    session.expect(Expect::add_mo(&policy, true));
    session.expect(Expect::commit());

    local_disk_policy_create(
        &session,
        "sample",
        &LocalDiskPolicyParams::default(),
        &Dn::org_root(),
    )
    .await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn qos_class_enable_updates_best_effort_in_place() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "QosclassEthBestEffort",
        "fabric/lan/classes/class-best-effort",
        &[("weight", "5"), ("mtu", "normal"), ("multicast_optimize", "no")],
    );
    session.expect(Expect::query_dn(
        "fabric/lan/classes/class-best-effort",
        existing.clone(),
    ));
    let mut updated = existing;
    updated.set_property("weight", "best-effort");
    updated.set_property("mtu", "9216");
    session.expect(Expect::add_mo(&updated, true));
    session.expect(Expect::commit());

    let params = QosClassParams {
        weight: "best-effort".into(),
        mtu: "9216".into(),
        ..QosClassParams::default()
    };
    qos_class_enable(&session, "best-effort", &params).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn qos_class_enable_creates_classified_priority() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let class = mo(
        "QosclassEthClassified",
        "fabric/lan/classes/class-platinum",
        &[
            ("cos", "any"),
            ("name", ""),
            ("weight", "normal"),
            ("drop", "drop"),
            ("multicast_optimize", "no"),
            ("mtu", "normal"),
            ("priority", "platinum"),
            ("admin_state", "enabled"),
        ],
    );
    session.expect(Expect::add_mo(&class, true));
    session.expect(Expect::commit());

    qos_class_enable(&session, "platinum", &QosClassParams::default()).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn qos_class_disable_sets_admin_state() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "QosclassEthClassified",
        "fabric/lan/classes/class-platinum",
        &[("admin_state", "enabled"), ("priority", "platinum")],
    );
    session.expect(Expect::query_dn(
        "fabric/lan/classes/class-platinum",
        existing.clone(),
    ));
    let mut updated = existing;
    updated.set_property("admin_state", "disabled");
    session.expect(Expect::set_mo(&updated));
    session.expect(Expect::commit());

    qos_class_disable(&session, "platinum").await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn qos_class_conf_drift_detects_property_changes() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let live = mo(
        "QosclassEthClassified",
        "fabric/lan/classes/class-gold",
        &[("admin_state", "enabled"), ("cos", "4"), ("weight", "9")],
    );

    session.expect(Expect::query_dn("fabric/lan/classes/class-gold", live.clone()));
    let expected = QosClassMatch {
        admin_state: Some("enabled".into()),
        cos: Some("4".into()),
        ..QosClassMatch::default()
    };
    assert!(!qos_class_conf_drift(&session, "gold", &expected).await?);

    session.expect(Expect::query_dn("fabric/lan/classes/class-gold", live.clone()));
    let expected = QosClassMatch {
        admin_state: Some("enabled".into()),
        weight: Some("5".into()),
        ..QosClassMatch::default()
    };
    assert!(qos_class_conf_drift(&session, "gold", &expected).await?);

    session.expect(Expect::query_dn("fabric/lan/classes/class-gold", live));
    let expected = QosClassMatch {
        admin_state: Some("disabled".into()),
        ..QosClassMatch::default()
    };
    assert!(qos_class_conf_drift(&session, "gold", &expected).await?);

    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn qos_policy_add_stages_definition_and_egress() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root", root_org()));
    let policy = mo(
        "EpqosDefinition",
        "org-root/ep-qos-sample",
        &[("policy_owner", "local"), ("name", "sample"), ("descr", "")],
    );
    let egress = mo(
        "EpqosEgress",
        "org-root/ep-qos-sample/egress",
        &[
            ("rate", "line-rate"),
            ("host_control", "full"),
            ("name", ""),
            ("prio", "platinum"),
            ("burst", "10240"),
        ],
    );
    session.expect(Expect::add_mo(&policy, true));
    session.expect(Expect::add_mo(&egress, true));
    session.expect(Expect::commit());

    qos_policy_add(
        &session,
        "sample",
        "platinum",
        "10240",
        "line-rate",
        "full",
        "",
        &Dn::org_root(),
    )
    .await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn qos_policy_exists_checks_egress_child() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let policy = mo("EpqosDefinition", "org-root/ep-qos-sample", &[("name", "sample")]);
    let egress = mo(
        "EpqosEgress",
        "org-root/ep-qos-sample/egress",
        &[("prio", "platinum"), ("burst", "10240")],
    );

    session.expect(Expect::query_dn("org-root/ep-qos-sample", policy.clone()));
    session.expect(Expect::query_dn("org-root/ep-qos-sample/egress", egress));
    assert!(
        qos_policy_exists(
            &session,
            "sample",
            Some("platinum"),
            None,
            None,
            None,
            &Dn::org_root()
        )
        .await?
    );

    // Without field checks a present definition is enough.
    session.expect(Expect::query_dn("org-root/ep-qos-sample", policy));
    assert!(
        qos_policy_exists(&session, "sample", None, None, None, None, &Dn::org_root()).await?
    );

    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn bios_policy_create_stages_token_children() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root", root_org()));

    let dn = "org-root/bios-prof-sample";
    let profile = mo(
        "BiosVProfile",
        dn,
        &[("name", "sample"), ("descr", ""), ("reboot_on_update", "no")],
    );
    session.expect(Expect::add_mo(&profile, true));

    let tokens = [
        mo(
            "BiosVfConsistentDeviceNameControl",
            format!("{}/Consistent-Device-Name-Control", dn),
            &[("vp_cdn_control", "platform-default")],
        ),
        mo(
            "BiosVfFrontPanelLockout",
            format!("{}/Front-Panel-Lockout", dn),
            &[("vp_front_panel_lockout", "platform-default")],
        ),
        mo(
            "BiosVfPOSTErrorPause",
            format!("{}/POST-Error-Pause", dn),
            &[("vp_post_error_pause", "platform-default")],
        ),
        mo(
            "BiosVfQuietBoot",
            format!("{}/Quiet-Boot", dn),
            &[("vp_quiet_boot", "enabled")],
        ),
        mo(
            "BiosVfResumeOnACPowerLoss",
            format!("{}/Resume-Ac-On-Power-Loss", dn),
            &[("vp_resume_on_ac_power_loss", "platform-default")],
        ),
        mo(
            "BiosVfSerialPortAEnable",
            format!("{}/Serial-Port-A-Enable", dn),
            &[("vp_serial_port_a_enable", "platform-default")],
        ),
        mo(
            "BiosVfConsoleRedirection",
            format!("{}/Console-Redirection", dn),
            &[
                ("vp_console_redirection", "platform-default"),
                ("vp_baud_rate", "platform-default"),
                ("vp_flow_control", "platform-default"),
                ("vp_legacy_os_redirection", "platform-default"),
                ("vp_putty_key_pad", "platform-default"),
                ("vp_terminal_type", "platform-default"),
            ],
        ),
    ];
    for token in &tokens {
        session.expect(Expect::add_mo(token, true));
    }
    session.expect(Expect::commit());

    let params = BiosPolicyParams {
        quiet_boot: "enabled".into(),
        ..BiosPolicyParams::default()
    };
    bios_policy_create(&session, "sample", &params, &Dn::org_root()).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn bios_token_setter_requires_existing_policy() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("org-root/bios-prof-sample", None));
    let err = bios_conf_quiet_boot(&session, "sample", &Dn::org_root(), "enabled")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "BIOS policy", .. }));

    let profile = mo("BiosVProfile", "org-root/bios-prof-sample", &[("name", "sample")]);
    session.expect(Expect::query_dn("org-root/bios-prof-sample", profile));
    let token = mo(
        "BiosVfQuietBoot",
        "org-root/bios-prof-sample/Quiet-Boot",
        &[("vp_quiet_boot", "enabled")],
    );
    session.expect(Expect::add_mo(&token, true));
    session.expect(Expect::commit());
    bios_conf_quiet_boot(&session, "sample", &Dn::org_root(), "enabled").await?;

    assert_eq!(session.remaining(), 0);
    Ok(())
}
