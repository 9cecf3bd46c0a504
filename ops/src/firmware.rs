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

//! Firmware lifecycle: bundles, downloads and activation.
//!
//! Activation reboots the managed endpoint, so the session dies in the
//! middle of the upgrade by design. The activation waiter therefore
//! revalidates the connection on every pass, treats every query failure
//! as transient, and compares the running firmware of each required
//! component against the version derived from the bundle until they all
//! match or the timeout elapses.

use crate::require_dn;
use crate::Error;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use tracing::warn;
use ucsm_core::ClassId;
use ucsm_core::Clock;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::PropFilter;
use ucsm_core::Session;

const FIRMWARE_DISTRIBUTABLE: ClassId = ClassId::from_static("FirmwareDistributable");
const FIRMWARE_DIST_IMAGE: ClassId = ClassId::from_static("FirmwareDistImage");
const FIRMWARE_IMAGE: ClassId = ClassId::from_static("FirmwareImage");
const FIRMWARE_DOWNLOADER: ClassId = ClassId::from_static("FirmwareDownloader");
const FIRMWARE_INFRA_PACK: ClassId = ClassId::from_static("FirmwareInfraPack");
const MGMT_CONTROLLER: ClassId = ClassId::from_static("MgmtController");
const FIRMWARE_RUNNING: ClassId = ClassId::from_static("FirmwareRunning");

/// Image types carried by an infrastructure bundle.
pub const INFRA_IMAGE_TYPES: [&str; 3] = ["system", "switch-kernel", "switch-software"];

/// Sleep between reconnect attempts while the endpoint reboots.
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(60);
/// Sleep after a query failure during activation.
pub const TRANSIENT_RETRY_INTERVAL: Duration = Duration::from_secs(30);
/// Sleep between running-version polls during activation.
pub const ACTIVATION_POLL_INTERVAL: Duration = Duration::from_secs(60);
/// Sleep between transfer-state polls of a firmware download.
pub const DOWNLOAD_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default bound on re-establishing the session.
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(15 * 60);
/// Default bound on UCS Manager activation.
pub const UCSM_ACTIVATION_TIMEOUT: Duration = Duration::from_secs(20 * 60);
/// Default bound on fabric interconnect activation.
pub const FI_ACTIVATION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

fn downloader_dn(image_name: &str) -> Dn {
    Dn::sys()
        .child("fw-catalogue")
        .child(format!("dnld-{}", image_name))
}

fn firmware_ack_dn() -> Dn {
    Dn::sys().child("fw-system").child("ack")
}

/// Bundle file name and per-series bundle version for one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub file_name: String,
    pub bundle_version: String,
}

/// The A/B/C-series bundle files derived from one platform version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFileNames {
    /// Infrastructure (A-series) bundle.
    pub infra: BundleFile,
    /// Blade (B-series) bundle.
    pub blade: BundleFile,
    /// Rack (C-series) bundle.
    pub rack: BundleFile,
}

/// Derive bundle file names from a platform version such as `2.2(2c)`.
///
/// `None` for a version string not of the `X.Y(Zs)` form.
#[must_use]
pub fn bundle_file_names(version: &str, extension: &str) -> Option<BundleFileNames> {
    let (release, rest) = version.split_once('(')?;
    let patch = rest.strip_suffix(')')?;
    if release.is_empty() || patch.is_empty() || patch.contains('(') {
        return None;
    }
    let version_bundle = format!("{}.{}", release, patch);

    let bundle = |series: &str, series_tag: &str| BundleFile {
        file_name: format!(
            "ucs-k9-bundle-{}.{}.{}.{}",
            series, version_bundle, series_tag, extension
        ),
        bundle_version: format!("{}{}", version, series_tag),
    };
    Some(BundleFileNames {
        infra: bundle("infra", "A"),
        blade: bundle("b-series", "B"),
        rack: bundle("c-series", "C"),
    })
}

/// Firmware bundles downloaded to the fabric interconnect, optionally
/// restricted to one bundle type (e.g. `b-series-bundle`,
/// `infrastructure-bundle`, `catalog`).
pub async fn get_firmware_bundles<S: Session>(
    session: &S,
    bundle_type: Option<&str>,
) -> Result<Vec<ManagedObject>, Error<S>> {
    let filter = bundle_type.map(|bundle_type| PropFilter::eq("type", bundle_type));
    session
        .query_class_id(&FIRMWARE_DISTRIBUTABLE, filter.as_ref())
        .await
        .map_err(Error::Session)
}

/// True if a bundle with exactly this version is present.
pub async fn has_firmware_bundle<S: Session>(
    session: &S,
    version: &str,
) -> Result<bool, Error<S>> {
    let bundles = get_firmware_bundles(session, None).await?;
    Ok(bundles
        .iter()
        .any(|bundle| bundle.property_is("version", version)))
}

/// Resolve the concrete image version for each required image type of a
/// downloaded bundle.
async fn bundle_image_versions<S: Session>(
    session: &S,
    bundle_type: &str,
    bundle_version: &str,
    image_types: &[&str],
) -> Result<BTreeMap<String, String>, Error<S>> {
    if image_types.is_empty() {
        return Ok(BTreeMap::new());
    }

    let mut image_names: BTreeMap<&str, String> = BTreeMap::new();
    for bundle in get_firmware_bundles(session, Some(bundle_type)).await? {
        debug!(
            bundle_type = ?bundle.property("type"),
            version = ?bundle.property("version"),
            bundle_version,
            "inspecting bundle"
        );
        if !bundle.property_is("type", bundle_type)
            || !bundle
                .property("version")
                .map_or(false, |v| v.starts_with(bundle_version))
        {
            continue;
        }
        let dist_images = session
            .query_children(bundle.dn(), Some(&FIRMWARE_DIST_IMAGE))
            .await
            .map_err(Error::Session)?;
        for dist_image in dist_images {
            for image_type in image_types {
                if dist_image.property_is("type", image_type) {
                    if let Some(name) = dist_image.property("name") {
                        debug!(bundle_version, image = name, "found bundle image");
                        image_names.insert(*image_type, name.to_string());
                    }
                }
            }
        }
        break;
    }

    let mut filter: Option<PropFilter> = None;
    for image_type in image_types {
        let name = image_names
            .get(*image_type)
            .ok_or_else(|| Error::ImageNotInBundle {
                image_type: (*image_type).to_string(),
                bundle_version: bundle_version.to_string(),
            })?;
        filter = Some(match filter {
            Some(filter) => filter.or_eq("name", name.as_str()),
            None => PropFilter::eq("name", name.as_str()),
        });
    }

    let images = session
        .query_class_id(&FIRMWARE_IMAGE, filter.as_ref())
        .await
        .map_err(Error::Session)?;
    let mut versions = BTreeMap::new();
    for image in &images {
        for image_type in image_types {
            if image.property("name") == image_names.get(*image_type).map(String::as_str) {
                if let Some(version) = image.property("version") {
                    debug!(
                        image_type,
                        version, bundle_version, "found bundle/image version mapping"
                    );
                    versions.insert((*image_type).to_string(), version.to_string());
                }
            }
        }
    }

    for image_type in image_types {
        if !versions.contains_key(*image_type) {
            return Err(Error::ImageNotInBundle {
                image_type: (*image_type).to_string(),
                bundle_version: bundle_version.to_string(),
            });
        }
    }
    Ok(versions)
}

/// Image versions of the infrastructure bundle.
pub async fn infra_firmware_versions<S: Session>(
    session: &S,
    bundle_version: &str,
    image_types: &[&str],
) -> Result<BTreeMap<String, String>, Error<S>> {
    bundle_image_versions(session, "infrastructure-bundle", bundle_version, image_types).await
}

/// Image versions of the blade (B-series) bundle.
pub async fn blade_firmware_versions<S: Session>(
    session: &S,
    bundle_version: &str,
    image_types: &[&str],
) -> Result<BTreeMap<String, String>, Error<S>> {
    bundle_image_versions(session, "b-series-bundle", bundle_version, image_types).await
}

/// True if the image is present on the manager and not marked deleted.
pub async fn is_image_available<S: Session>(
    session: &S,
    image: &str,
) -> Result<bool, Error<S>> {
    debug!(image, "checking if image file is already uploaded");

    let filter = PropFilter::eq("name", image);
    let packages = session
        .query_class_id(&FIRMWARE_DISTRIBUTABLE, Some(&filter))
        .await
        .map_err(Error::Session)?;

    let mut deleted = false;
    if let Some(package) = packages.first() {
        let dist_images = session
            .query_children(package.dn(), Some(&FIRMWARE_DIST_IMAGE))
            .await
            .map_err(Error::Session)?;
        if let Some(dist_image) = dist_images.first() {
            deleted = dist_image
                .property("image_deleted")
                .map_or(false, |v| !v.is_empty());
        }
    }

    let available = !deleted && !packages.is_empty();
    debug!(image, available, "image availability");
    Ok(available)
}

/// Start a firmware download from a remote server onto the manager.
///
/// `protocol` is one of the transfer protocols the manager supports
/// (`scp`, `sftp`, `ftp`, `tftp`, ...); all but `tftp` require `user`
/// and `pwd`.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] when credentials are missing; nothing
/// is written in that case.
#[allow(clippy::too_many_arguments)]
pub async fn firmware_download_remote<S: Session>(
    session: &S,
    file_name: &str,
    remote_path: &str,
    protocol: &str,
    server: &str,
    user: &str,
    pwd: &str,
) -> Result<ManagedObject, Error<S>> {
    if protocol != "tftp" {
        if user.is_empty() {
            return Err(Error::InvalidValue {
                field: "user",
                value: user.to_string(),
            });
        }
        if pwd.is_empty() {
            return Err(Error::InvalidValue {
                field: "pwd",
                value: pwd.to_string(),
            });
        }
    }

    let mo = ManagedObject::new(FIRMWARE_DOWNLOADER, downloader_dn(file_name))
        .with_property("file_name", file_name)
        .with_property("remote_path", remote_path)
        .with_property("protocol", protocol)
        .with_property("server", server)
        .with_property("user", user)
        .with_property("pwd", pwd)
        .with_property("admin_state", "restart");
    session.add_mo(&mo, false).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Wait until a firmware download reaches `downloaded`.
///
/// # Errors
///
/// Returns [`Error::DownloadFailed`] when the transfer reports `failed`
/// (with the remote error description) or when the timeout elapses, and
/// [`Error::NotFound`] if no downloader object exists for the image.
pub async fn wait_firmware_download<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    image_name: &str,
    timeout: Duration,
) -> Result<ManagedObject, Error<S>> {
    let dn = downloader_dn(image_name);
    let start = clock.now();
    loop {
        let downloader = require_dn(session, "firmware downloader", &dn).await?;
        match downloader.property("transfer_state") {
            Some("downloaded") => return Ok(downloader),
            Some("failed") => {
                return Err(Error::DownloadFailed {
                    image: image_name.to_string(),
                    reason: downloader
                        .property("fsm_rmt_inv_err_descr")
                        .unwrap_or("")
                        .to_string(),
                });
            }
            _ => {}
        }
        if clock.now() - start > timeout {
            return Err(Error::DownloadFailed {
                image: image_name.to_string(),
                reason: format!("timed out after {}s", (clock.now() - start).as_secs()),
            });
        }
        clock.sleep(DOWNLOAD_POLL_INTERVAL).await;
    }
}

/// Remove a firmware image from the manager.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the image is not present.
pub async fn firmware_remove<S: Session>(session: &S, image_name: &str) -> Result<(), Error<S>> {
    let dn = downloader_dn(image_name);
    require_dn(session, "firmware image", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Block until the session is usable again.
///
/// Validates the existing session first, then forces a re-login, sleeping
/// [`RECONNECT_INTERVAL`] between attempts. The endpoint rebooting during
/// an upgrade makes failures here ordinary, so they are logged at debug
/// level and retried.
///
/// # Errors
///
/// Returns [`Error::LoginTimeout`] once `timeout` is exceeded.
pub async fn validate_connection<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    timeout: Duration,
) -> Result<(), Error<S>> {
    let start = clock.now();
    loop {
        // An established session is validated by a plain login.
        match session.login(false).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) => debug!(%err, "login to UCS Manager failed"),
        }

        debug!(
            elapsed_secs = (clock.now() - start).as_secs(),
            "logging in to UCS Manager"
        );
        match session.login(true).await {
            Ok(true) => {
                debug!("login successful");
                return Ok(());
            }
            Ok(false) => debug!("login failed, sleeping before retry"),
            Err(err) => debug!(%err, "login failed, sleeping before retry"),
        }
        clock.sleep(RECONNECT_INTERVAL).await;

        if clock.now() - start > timeout {
            return Err(Error::LoginTimeout {
                waited: clock.now() - start,
            });
        }
    }
}

/// Running-firmware records of every management controller matching the
/// subject (`system`, `switch`, `blade`, ...).
pub async fn running_firmware<S: Session>(
    session: &S,
    subject: &str,
) -> Result<Vec<ManagedObject>, Error<S>> {
    let filter = PropFilter::eq("subject", subject);
    let controllers = session
        .query_class_id(&MGMT_CONTROLLER, Some(&filter))
        .await
        .map_err(Error::Session)?;
    if controllers.is_empty() {
        return Err(Error::NoMgmtController {
            subject: subject.to_string(),
        });
    }

    let mut running = Vec::new();
    for controller in &controllers {
        let mut records = session
            .query_children(controller.dn(), Some(&FIRMWARE_RUNNING))
            .await
            .map_err(Error::Session)?;
        if records.is_empty() {
            return Err(Error::NoRunningFirmware {
                subject: subject.to_string(),
            });
        }
        running.append(&mut records);
    }
    Ok(running)
}

/// One comparison pass: is every required component running the version
/// expected from the bundle?
async fn is_running_desired_version<S: Session>(
    session: &S,
    bundle_version: &str,
    subject: &str,
    image_types: &[&str],
) -> Result<bool, Error<S>> {
    let running = running_firmware(session, subject).await?;
    let expected = infra_firmware_versions(session, bundle_version, image_types).await?;

    let mut all_match = true;
    for image_type in image_types {
        let expected_version =
            expected
                .get(*image_type)
                .ok_or_else(|| Error::ImageNotInBundle {
                    image_type: (*image_type).to_string(),
                    bundle_version: bundle_version.to_string(),
                })?;
        let mut found = false;
        for record in running
            .iter()
            .filter(|record| record.property_is("type", image_type))
        {
            found = true;
            debug!(
                dn = %record.dn(),
                running = ?record.property("version"),
                expected = %expected_version,
                bundle_version,
                "running firmware version"
            );
            if !record.property_is("version", expected_version) {
                all_match = false;
            }
        }
        if !found {
            return Err(Error::NoRunningFirmware {
                subject: (*image_type).to_string(),
            });
        }
    }
    Ok(all_match)
}

async fn acknowledge_pending_reboot<S: Session>(session: &S) -> Result<(), Error<S>> {
    let ack = session
        .query_dn(&firmware_ack_dn())
        .await
        .map_err(Error::Session)?;
    if let Some(mut ack) = ack {
        debug!(
            oper_state = ?ack.property("oper_state"),
            scheduler = ?ack.property("scheduler"),
            "firmware ack"
        );
        if ack.property_is("oper_state", "waiting-for-user") {
            debug!("acknowledging switch reboot");
            ack.set_property("admin_state", "trigger-immediate");
            session.set_mo(&ack).await.map_err(Error::Session)?;
            session.commit().await.map_err(Error::Session)?;
        }
    }
    Ok(())
}

/// Wait until the subject runs the firmware versions of the bundle.
///
/// Returns `true` as soon as every image type in `image_types` runs its
/// expected version. When versions differ and `wait_for_upgrade_completion`
/// is unset, returns `false` immediately; otherwise polls until match or
/// timeout (`false`), reconnecting as needed. With `acknowledge_reboot`
/// set, a pending switch reboot acknowledgment is triggered along the
/// way. Query failures mid-upgrade are expected and retried.
///
/// # Errors
///
/// Returns [`Error::LoginTimeout`] when the session cannot be
/// re-established within the timeout.
#[allow(clippy::too_many_arguments)]
pub async fn wait_for_firmware_activation<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    bundle_version: &str,
    subject: &str,
    image_types: &[&str],
    wait_for_upgrade_completion: bool,
    acknowledge_reboot: bool,
    timeout: Duration,
) -> Result<bool, Error<S>> {
    let start = clock.now();
    loop {
        validate_connection(session, clock, timeout).await?;

        match is_running_desired_version(session, bundle_version, subject, image_types).await {
            Ok(true) => return Ok(true),
            Ok(false) => {
                if !wait_for_upgrade_completion {
                    debug!(subject, "not running at desired version");
                    return Ok(false);
                }
                debug!(
                    subject,
                    "not running at desired version, waiting for activation completion"
                );
                clock.sleep(ACTIVATION_POLL_INTERVAL).await;

                if acknowledge_reboot {
                    if let Err(err) = acknowledge_pending_reboot(session).await {
                        warn!(%err, "could not process reboot acknowledgment");
                    }
                }
            }
            Err(err) => {
                // The manager restarts and the fabric interconnects
                // reboot during the upgrade; losing the session here is
                // expected.
                warn!(%err, "lost connectivity to UCS Manager during upgrade");
                clock.sleep(TRANSIENT_RETRY_INTERVAL).await;
            }
        }

        if clock.now() - start > timeout {
            warn!(
                subject,
                elapsed_secs = (clock.now() - start).as_secs(),
                "activation timeout"
            );
            return Ok(false);
        }
    }
}

/// Wait for UCS Manager itself to run `version`.
pub async fn wait_for_ucsm_activation<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    version: &str,
    wait_for_upgrade_completion: bool,
    timeout: Duration,
) -> Result<bool, Error<S>> {
    debug!("wait for UCS Manager firmware activation");
    wait_for_firmware_activation(
        session,
        clock,
        version,
        "system",
        &["system"],
        wait_for_upgrade_completion,
        false,
        timeout,
    )
    .await
}

/// Wait for the fabric interconnects to run `version`, acknowledging
/// pending switch reboots along the way.
pub async fn wait_for_fi_activation<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    version: &str,
    wait_for_upgrade_completion: bool,
    timeout: Duration,
) -> Result<bool, Error<S>> {
    debug!("wait for fabric interconnect firmware activation");
    wait_for_firmware_activation(
        session,
        clock,
        version,
        "switch",
        &["switch-software", "switch-kernel"],
        wait_for_upgrade_completion,
        true,
        timeout,
    )
    .await
}

/// Activate the infrastructure bundle and wait for completion.
///
/// Skips activation when the manager and both fabric interconnects
/// already run `version`. Activation reboots the fabric interconnects;
/// callers own any confirmation policy.
///
/// # Errors
///
/// - [`Error::BundleNotAvailable`] if the infra bundle has not been
///   downloaded.
/// - [`Error::NotFound`] if there is no infra pack to update.
/// - [`Error::ActivationIncomplete`] if the manager does not come back at
///   the requested version.
pub async fn firmware_activate_infra<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    version: &str,
) -> Result<(), Error<S>> {
    let infra_bundle_version = format!("{}A", version);
    if !has_firmware_bundle(session, &infra_bundle_version).await? {
        return Err(Error::BundleNotAvailable {
            version: infra_bundle_version,
        });
    }

    let ucsm_has_desired_version =
        wait_for_ucsm_activation(session, clock, version, false, UCSM_ACTIVATION_TIMEOUT).await?;
    let fis_have_desired_version =
        wait_for_fi_activation(session, clock, version, false, FI_ACTIVATION_TIMEOUT).await?;
    if ucsm_has_desired_version && fis_have_desired_version {
        debug!("no infra firmware activation required");
        return Ok(());
    }

    let packs = session
        .query_class_id(&FIRMWARE_INFRA_PACK, None)
        .await
        .map_err(Error::Session)?;
    let mut infra_pack = packs.into_iter().next().ok_or_else(|| Error::NotFound {
        kind: "firmware infra pack",
        dn: Dn::org_root().child("fw-infra-pack-default"),
    })?;

    if !infra_pack.property_is("infra_bundle_version", &infra_bundle_version) {
        infra_pack.set_property("infra_bundle_version", &infra_bundle_version);
        session.set_mo(&infra_pack).await.map_err(Error::Session)?;
        session.commit().await.map_err(Error::Session)?;
        if !ucsm_has_desired_version {
            // The manager restarts on activation and invalidates the
            // session.
            session.logout().await.map_err(Error::Session)?;
        }
    }

    debug!(version, "activating UCS Manager");
    let updated =
        wait_for_ucsm_activation(session, clock, version, true, UCSM_ACTIVATION_TIMEOUT).await?;
    if !updated {
        return Err(Error::ActivationIncomplete {
            version: version.to_string(),
        });
    }
    debug!(version, "UCS Manager successfully updated");

    debug!(version, "activating fabric interconnect firmware");
    wait_for_fi_activation(session, clock, version, true, FI_ACTIVATION_TIMEOUT).await?;
    Ok(())
}
