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

//! Service-profile association and dissociation.
//!
//! Binding a service profile to a physical server starts an association
//! FSM on the server that takes minutes to complete. The waiters here
//! observe it the only way the API offers: re-query the object at a fixed
//! interval until the state field reaches its terminal value or the
//! timeout elapses. Waiters return `Ok(false)` on plain timeout; errors
//! are reserved for preconditions and terminal failures.

use crate::require_dn;
use crate::Error;
use std::time::Duration;
use tracing::debug;
use tracing::error;
use ucsm_core::ClassId;
use ucsm_core::Clock;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const LS_BINDING: ClassId = ClassId::from_static("LsBinding");

/// Interval between association state polls.
pub const ASSOC_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default bound on association/dissociation completion.
pub const ASSOC_COMPLETION_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Per-subsystem config issue fields, aggregated in this order.
const CONFIG_ISSUE_FIELDS: [(&str, &str); 5] = [
    ("iSCSI", "iscsi_config_issues"),
    ("Network", "network_config_issues"),
    ("Server", "server_config_issues"),
    ("Storage", "storage_config_issues"),
    ("vNIC", "vnic_config_issues"),
];

/// Wait until the physical server has completed the association FSM.
///
/// Returns `Ok(true)` once the server reports `associated`, `Ok(false)`
/// when the timeout elapses first.
///
/// # Errors
///
/// - [`Error::NotFound`] if the service profile or the server does not
///   exist.
/// - [`Error::ConfigFailure`] if the profile reports `failed-to-apply`,
///   with all non-empty per-subsystem issue descriptions aggregated into
///   the message. Checked before any polling.
pub async fn wait_assoc_completion<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    sp_dn: &Dn,
    server_dn: &Dn,
    assoc_completion_timeout: Duration,
) -> Result<bool, Error<S>> {
    let start = clock.now();

    let sp = require_dn(session, "service profile", sp_dn).await?;
    if sp.property_is("config_state", "failed-to-apply") {
        debug!(%sp_dn, qualifier = ?sp.property("config_qualifier"), "service profile has config failure");
        return Err(config_failure(session, sp_dn, &sp).await?);
    }

    let mut server = require_dn(session, "server", server_dn).await?;
    while !server.property_is("association", "associated") {
        clock.sleep(ASSOC_POLL_INTERVAL).await;
        let elapsed = clock.now() - start;
        if elapsed > assoc_completion_timeout {
            error!(%server_dn, "server has not completed association");
            return Ok(false);
        }
        debug!(
            %server_dn,
            fsm_status = ?server.property("fsm_status"),
            elapsed_secs = elapsed.as_secs(),
            "association in progress"
        );
        server = require_dn(session, "server", server_dn).await?;
    }

    debug!(
        %server_dn,
        elapsed_secs = (clock.now() - start).as_secs(),
        "server has completed association"
    );
    Ok(true)
}

async fn config_failure<S: Session>(
    session: &S,
    sp_dn: &Dn,
    sp: &ManagedObject,
) -> Result<Error<S>, Error<S>> {
    let issues = session
        .query_dn(&sp_dn.child("config-issue"))
        .await
        .map_err(Error::Session)?;

    let mut qualifier = sp.property("config_qualifier").unwrap_or("").to_string();
    if let Some(issues) = issues {
        let parts: Vec<String> = CONFIG_ISSUE_FIELDS
            .iter()
            .filter_map(|(label, field)| match issues.property(field) {
                Some(value) if !value.is_empty() => Some(format!("{}: {}", label, value)),
                _ => None,
            })
            .collect();
        if !parts.is_empty() {
            qualifier = parts.join(". ");
        }
    }

    Ok(Error::ConfigFailure {
        sp_dn: sp_dn.clone(),
        config_state: sp.property("config_state").unwrap_or("").to_string(),
        qualifier,
    })
}

/// Associate a service profile with a physical server.
///
/// Writes an `LsBinding` under the profile and commits; with
/// `wait_for_assoc_completion` the call then blocks until the server
/// reports `associated` (`Ok(true)`) or the timeout elapses (`Ok(false)`).
///
/// # Errors
///
/// - [`Error::NotFound`] if the profile or the server does not exist.
/// - [`Error::AlreadyAssociated`] if the profile is already associated
///   with (or administratively bound to) this server.
/// - [`Error::ConfigFailure`] from the completion wait.
pub async fn sp_associate<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    sp_dn: &Dn,
    server_dn: &Dn,
    wait_for_assoc_completion: bool,
    assoc_completion_timeout: Duration,
) -> Result<bool, Error<S>> {
    let sp = require_dn(session, "service profile", sp_dn).await?;
    require_dn(session, "server", server_dn).await?;

    if sp.property_is("assoc_state", "associated")
        && sp.property("pn_dn") == Some(server_dn.as_str())
    {
        return Err(Error::AlreadyAssociated {
            sp_dn: sp_dn.clone(),
            server_dn: server_dn.clone(),
        });
    }

    let binding_dn = sp_dn.child("pn");
    let binding = session
        .query_dn(&binding_dn)
        .await
        .map_err(Error::Session)?;
    if let Some(binding) = binding {
        if binding.property("pn_dn") == Some(server_dn.as_str()) {
            return Err(Error::AlreadyAssociated {
                sp_dn: sp_dn.clone(),
                server_dn: server_dn.clone(),
            });
        }
    }

    let mo = ManagedObject::new(LS_BINDING, binding_dn)
        .with_property("pn_dn", server_dn.as_str())
        .with_property("restrict_migration", "no");
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;

    if wait_for_assoc_completion {
        wait_assoc_completion(session, clock, sp_dn, server_dn, assoc_completion_timeout).await
    } else {
        Ok(true)
    }
}

/// Wait until the service profile reports `unassociated`.
///
/// Returns `Ok(true)` on completion, `Ok(false)` when the timeout elapses
/// first.
///
/// # Errors
///
/// - [`Error::NotFound`] if the profile disappears while polling.
/// - [`Error::AssociationFailed`] if the FSM reports `failed`.
pub async fn wait_disassoc_completion<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    sp_dn: &Dn,
    timeout: Duration,
) -> Result<bool, Error<S>> {
    let start = clock.now();
    loop {
        let sp = require_dn(session, "service profile", sp_dn).await?;
        if sp.property_is("assoc_state", "unassociated") {
            debug!(%sp_dn, "dissociation complete");
            return Ok(true);
        }
        if sp.property_is("assoc_state", "failed") {
            error!(%sp_dn, "dissociation failed");
            return Err(Error::AssociationFailed { sp_dn: sp_dn.clone() });
        }
        if clock.now() - start > timeout {
            error!(%sp_dn, "service profile has not completed dissociation");
            return Ok(false);
        }
        clock.sleep(ASSOC_POLL_INTERVAL).await;
    }
}

/// Dissociate a service profile from its server.
///
/// Removes the profile's binding and commits; with `wait_for_completion`
/// the call then polls the profile until it reports `unassociated`.
///
/// # Errors
///
/// - [`Error::NotFound`] if the profile does not exist.
/// - [`Error::NotBound`] if the profile has no binding to remove.
/// - [`Error::AssociationFailed`] from the completion wait.
pub async fn sp_disassociate<S: Session, C: Clock>(
    session: &S,
    clock: &C,
    sp_dn: &Dn,
    wait_for_completion: bool,
    timeout: Duration,
) -> Result<bool, Error<S>> {
    require_dn(session, "service profile", sp_dn).await?;

    let binding_dn = sp_dn.child("pn");
    if session
        .query_dn(&binding_dn)
        .await
        .map_err(Error::Session)?
        .is_none()
    {
        return Err(Error::NotBound { sp_dn: sp_dn.clone() });
    }

    session
        .remove_mo(&binding_dn)
        .await
        .map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;

    if wait_for_completion {
        wait_disassoc_completion(session, clock, sp_dn, timeout).await
    } else {
        Ok(true)
    }
}
