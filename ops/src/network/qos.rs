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

//! QoS system classes and QoS policies.
//!
//! System classes live at fixed dns under `fabric/lan/classes`. The
//! `best-effort` and `fc` classes always exist and only accept a subset of
//! settings; the other priorities are created on demand.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const QOSCLASS_ETH_CLASSIFIED: ClassId = ClassId::from_static("QosclassEthClassified");
const EPQOS_DEFINITION: ClassId = ClassId::from_static("EpqosDefinition");
const EPQOS_EGRESS: ClassId = ClassId::from_static("EpqosEgress");

fn qos_class_dn(priority: &str) -> Dn {
    super::lan_cloud_dn().child("classes").child(format!("class-{}", priority))
}

fn qos_policy_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("ep-qos-{}", name))
}

/// Settings applied when enabling a QoS system class.
#[derive(Debug, Clone)]
pub struct QosClassParams {
    /// `best-effort`, `none` or a weight in `0-10`.
    pub weight: String,
    /// `fc`, `normal` or an MTU value.
    pub mtu: String,
    /// `yes`/`no`.
    pub multicast_optimize: String,
    /// `any` or a CoS value.
    pub cos: String,
    /// `drop` or `no-drop`.
    pub drop: String,
}

impl Default for QosClassParams {
    fn default() -> Self {
        Self {
            weight: "normal".into(),
            mtu: "normal".into(),
            multicast_optimize: "no".into(),
            cos: "any".into(),
            drop: "drop".into(),
        }
    }
}

/// Enable and configure a QoS system class.
///
/// The `best-effort` and `fc` classes must already exist and only their
/// tunable settings are touched; any other priority is (re)created fully
/// configured and enabled.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for `best-effort`/`fc` when the class is
/// absent.
pub async fn qos_class_enable<S: Session>(
    session: &S,
    priority: &str,
    params: &QosClassParams,
) -> Result<ManagedObject, Error<S>> {
    let qos_class = match priority {
        "best-effort" => {
            let mut mo = require_dn(session, "QoS class", &qos_class_dn(priority)).await?;
            mo.set_property("weight", &params.weight);
            mo.set_property("mtu", &params.mtu);
            mo.set_property("multicast_optimize", &params.multicast_optimize);
            mo
        }
        "fc" => {
            let mut mo = require_dn(session, "QoS class", &qos_class_dn(priority)).await?;
            mo.set_property("weight", &params.weight);
            mo.set_property("cos", &params.cos);
            mo
        }
        _ => ManagedObject::new(QOSCLASS_ETH_CLASSIFIED, qos_class_dn(priority))
            .with_property("cos", &params.cos)
            .with_property("name", "")
            .with_property("weight", &params.weight)
            .with_property("drop", &params.drop)
            .with_property("multicast_optimize", &params.multicast_optimize)
            .with_property("mtu", &params.mtu)
            .with_property("priority", priority)
            .with_property("admin_state", "enabled"),
    };

    session
        .add_mo(&qos_class, true)
        .await
        .map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(qos_class)
}

/// Disable a QoS system class.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the class does not exist.
pub async fn qos_class_disable<S: Session>(
    session: &S,
    priority: &str,
) -> Result<ManagedObject, Error<S>> {
    let mut qos_class = require_dn(session, "QoS class", &qos_class_dn(priority)).await?;
    qos_class.set_property("admin_state", "disabled");
    session.set_mo(&qos_class).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(qos_class)
}

/// Expected QoS class settings for [`qos_class_conf_drift`].
#[derive(Debug, Clone, Default)]
pub struct QosClassMatch {
    /// `enabled`/`disabled`.
    pub admin_state: Option<String>,
    pub cos: Option<String>,
    pub drop: Option<String>,
    pub weight: Option<String>,
    pub mtu: Option<String>,
    pub multicast_optimize: Option<String>,
}

/// Detect configuration drift for a QoS system class: `true` means the
/// live configuration differs from the expectation and action is needed.
pub async fn qos_class_conf_drift<S: Session>(
    session: &S,
    priority: &str,
    expected: &QosClassMatch,
) -> Result<bool, Error<S>> {
    let mo = match session
        .query_dn(&qos_class_dn(priority))
        .await
        .map_err(Error::Session)?
    {
        Some(mo) => mo,
        None => return Ok(false),
    };

    match expected.admin_state.as_deref() {
        Some("disabled") => Ok(!mo.property_is("admin_state", "disabled")),
        Some("enabled") => {
            if !mo.property_is("admin_state", "enabled") {
                return Ok(true);
            }
            let mismatch = [
                ("cos", expected.cos.as_deref()),
                ("drop", expected.drop.as_deref()),
                ("weight", expected.weight.as_deref()),
                ("mtu", expected.mtu.as_deref()),
                ("multicast_optimize", expected.multicast_optimize.as_deref()),
            ]
            .iter()
            .any(|(name, want)| matches!(want, Some(want) if !mo.property_is(name, want)));
            Ok(mismatch)
        }
        _ => Ok(false),
    }
}

/// Create a QoS policy with its egress settings.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
#[allow(clippy::too_many_arguments)]
pub async fn qos_policy_add<S: Session>(
    session: &S,
    name: &str,
    prio: &str,
    burst: &str,
    rate: &str,
    host_control: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let policy = ManagedObject::new(EPQOS_DEFINITION, qos_policy_dn(parent_dn, name))
        .with_property("policy_owner", "local")
        .with_property("name", name)
        .with_property("descr", descr);
    let egress = ManagedObject::new(EPQOS_EGRESS, policy.dn().child("egress"))
        .with_property("rate", rate)
        .with_property("host_control", host_control)
        .with_property("name", "")
        .with_property("prio", prio)
        .with_property("burst", burst);

    session.add_mo(&policy, true).await.map_err(Error::Session)?;
    session.add_mo(&egress, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(policy)
}

/// Remove a QoS policy.
pub async fn qos_policy_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = qos_policy_dn(parent_dn, name);
    require_dn(session, "QoS policy", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the QoS policy exists with the expected egress settings.
///
/// The tunable settings live on the egress child object, so a second
/// lookup runs only when one of them is checked.
pub async fn qos_policy_exists<S: Session>(
    session: &S,
    name: &str,
    prio: Option<&str>,
    burst: Option<&str>,
    rate: Option<&str>,
    host_control: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    let dn = qos_policy_dn(parent_dn, name);
    if session.query_dn(&dn).await.map_err(Error::Session)?.is_none() {
        return Ok(false);
    }
    if prio.is_none() && burst.is_none() && rate.is_none() && host_control.is_none() {
        return Ok(true);
    }
    exists_with_props(
        session,
        &dn.child("egress"),
        &[
            ("prio", prio),
            ("burst", burst),
            ("rate", rate),
            ("host_control", host_control),
        ],
    )
    .await
}
