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

//! BIOS policies.
//!
//! A BIOS policy is a profile object with one child object per BIOS token
//! group. [`bios_policy_create`] writes the platform-visible groups in one
//! transaction; individual token setters reconfigure a single group on an
//! existing policy.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const BIOS_V_PROFILE: ClassId = ClassId::from_static("BiosVProfile");
const BIOS_VF_CDN_CONTROL: ClassId = ClassId::from_static("BiosVfConsistentDeviceNameControl");
const BIOS_VF_FRONT_PANEL_LOCKOUT: ClassId = ClassId::from_static("BiosVfFrontPanelLockout");
const BIOS_VF_POST_ERROR_PAUSE: ClassId = ClassId::from_static("BiosVfPOSTErrorPause");
const BIOS_VF_QUIET_BOOT: ClassId = ClassId::from_static("BiosVfQuietBoot");
const BIOS_VF_RESUME_ON_AC_POWER_LOSS: ClassId = ClassId::from_static("BiosVfResumeOnACPowerLoss");
const BIOS_VF_SERIAL_PORT_A_ENABLE: ClassId = ClassId::from_static("BiosVfSerialPortAEnable");
const BIOS_VF_CONSOLE_REDIRECTION: ClassId = ClassId::from_static("BiosVfConsoleRedirection");
const BIOS_VF_INTEL_TURBO_BOOST_TECH: ClassId = ClassId::from_static("BiosVfIntelTurboBoostTech");
const BIOS_VF_INTEL_HYPER_THREADING_TECH: ClassId =
    ClassId::from_static("BiosVfIntelHyperThreadingTech");

fn bios_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("bios-prof-{}", name))
}

/// BIOS policy token values; everything defaults to `platform-default`.
#[derive(Debug, Clone)]
pub struct BiosPolicyParams {
    pub descr: String,
    /// `yes`/`no`.
    pub reboot_on_update: String,
    pub cdn_control: String,
    pub front_panel_lockout: String,
    pub post_error_pause: String,
    pub quiet_boot: String,
    pub resume_on_ac_power_loss: String,
    pub serial_port_a_enable: String,
    pub baud_rate: String,
    pub console_redirection: String,
    pub flow_control: String,
    pub legacy_os_redirection: String,
    pub putty_key_pad: String,
    pub terminal_type: String,
}

impl Default for BiosPolicyParams {
    fn default() -> Self {
        let platform_default = || "platform-default".to_string();
        Self {
            descr: String::new(),
            reboot_on_update: "no".into(),
            cdn_control: platform_default(),
            front_panel_lockout: platform_default(),
            post_error_pause: platform_default(),
            quiet_boot: platform_default(),
            resume_on_ac_power_loss: platform_default(),
            serial_port_a_enable: platform_default(),
            baud_rate: platform_default(),
            console_redirection: platform_default(),
            flow_control: platform_default(),
            legacy_os_redirection: platform_default(),
            putty_key_pad: platform_default(),
            terminal_type: platform_default(),
        }
    }
}

/// Create a BIOS policy with its token group children.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn bios_policy_create<S: Session>(
    session: &S,
    name: &str,
    params: &BiosPolicyParams,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let profile = ManagedObject::new(BIOS_V_PROFILE, bios_policy_dn(parent_dn, name))
        .with_property("name", name)
        .with_property("descr", &params.descr)
        .with_property("reboot_on_update", &params.reboot_on_update);
    let dn = profile.dn();

    let tokens = vec![
        ManagedObject::new(BIOS_VF_CDN_CONTROL, dn.child("Consistent-Device-Name-Control"))
            .with_property("vp_cdn_control", &params.cdn_control),
        ManagedObject::new(BIOS_VF_FRONT_PANEL_LOCKOUT, dn.child("Front-Panel-Lockout"))
            .with_property("vp_front_panel_lockout", &params.front_panel_lockout),
        ManagedObject::new(BIOS_VF_POST_ERROR_PAUSE, dn.child("POST-Error-Pause"))
            .with_property("vp_post_error_pause", &params.post_error_pause),
        ManagedObject::new(BIOS_VF_QUIET_BOOT, dn.child("Quiet-Boot"))
            .with_property("vp_quiet_boot", &params.quiet_boot),
        ManagedObject::new(
            BIOS_VF_RESUME_ON_AC_POWER_LOSS,
            dn.child("Resume-Ac-On-Power-Loss"),
        )
        .with_property("vp_resume_on_ac_power_loss", &params.resume_on_ac_power_loss),
        ManagedObject::new(BIOS_VF_SERIAL_PORT_A_ENABLE, dn.child("Serial-Port-A-Enable"))
            .with_property("vp_serial_port_a_enable", &params.serial_port_a_enable),
        ManagedObject::new(BIOS_VF_CONSOLE_REDIRECTION, dn.child("Console-Redirection"))
            .with_property("vp_console_redirection", &params.console_redirection)
            .with_property("vp_baud_rate", &params.baud_rate)
            .with_property("vp_flow_control", &params.flow_control)
            .with_property("vp_legacy_os_redirection", &params.legacy_os_redirection)
            .with_property("vp_putty_key_pad", &params.putty_key_pad)
            .with_property("vp_terminal_type", &params.terminal_type),
    ];

    session.add_mo(&profile, true).await.map_err(Error::Session)?;
    for token in &tokens {
        session.add_mo(token, true).await.map_err(Error::Session)?;
    }
    session.commit().await.map_err(Error::Session)?;
    Ok(profile)
}

/// Remove a BIOS policy.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the policy does not exist.
pub async fn bios_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = bios_policy_dn(parent_dn, name);
    require_dn(session, "BIOS policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the BIOS policy exists with the expected properties.
pub async fn bios_policy_exists<S: Session>(
    session: &S,
    name: &str,
    reboot_on_update: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &bios_policy_dn(parent_dn, name),
        &[("reboot_on_update", reboot_on_update), ("descr", descr)],
    )
    .await
}

async fn bios_token_set<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
    token: ManagedObject,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "BIOS policy", &bios_policy_dn(parent_dn, name)).await?;
    session.add_mo(&token, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(token)
}

/// Configure the quiet boot token of an existing BIOS policy.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the policy does not exist.
pub async fn bios_conf_quiet_boot<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
    vp_quiet_boot: &str,
) -> Result<ManagedObject, Error<S>> {
    let token = ManagedObject::new(
        BIOS_VF_QUIET_BOOT,
        bios_policy_dn(parent_dn, name).child("Quiet-Boot"),
    )
    .with_property("vp_quiet_boot", vp_quiet_boot);
    bios_token_set(session, name, parent_dn, token).await
}

/// Configure the Intel Turbo Boost token of an existing BIOS policy.
pub async fn bios_conf_turbo_boost<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
    vp_intel_turbo_boost_tech: &str,
) -> Result<ManagedObject, Error<S>> {
    let token = ManagedObject::new(
        BIOS_VF_INTEL_TURBO_BOOST_TECH,
        bios_policy_dn(parent_dn, name).child("Intel-Turbo-Boost-Tech"),
    )
    .with_property("vp_intel_turbo_boost_tech", vp_intel_turbo_boost_tech);
    bios_token_set(session, name, parent_dn, token).await
}

/// Configure the hyper threading token of an existing BIOS policy.
pub async fn bios_conf_hyper_threading<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
    vp_intel_hyper_threading_tech: &str,
) -> Result<ManagedObject, Error<S>> {
    let token = ManagedObject::new(
        BIOS_VF_INTEL_HYPER_THREADING_TECH,
        bios_policy_dn(parent_dn, name).child("Intel-HyperThreading-Tech"),
    )
    .with_property(
        "vp_intel_hyper_threading_tech",
        vp_intel_hyper_threading_tech,
    );
    bios_token_set(session, name, parent_dn, token).await
}
