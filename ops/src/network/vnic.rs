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

//! vNIC templates.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const VNIC_LAN_CONN_TEMPL: ClassId = ClassId::from_static("VnicLanConnTempl");
const VNIC_ETHER_IF: ClassId = ClassId::from_static("VnicEtherIf");
const VNIC_DYNAMIC_CON_POLICY_REF: ClassId = ClassId::from_static("VnicDynamicConPolicyRef");
const VNIC_USNIC_CON_POLICY_REF: ClassId = ClassId::from_static("VnicUsnicConPolicyRef");
const VNIC_VMQ_CON_POLICY_REF: ClassId = ClassId::from_static("VnicVmqConPolicyRef");

fn vnic_template_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("lan-conn-templ-{}", name))
}

/// Optional vNIC template properties.
#[derive(Debug, Clone)]
pub struct VnicTemplateParams {
    pub mtu: String,
    pub qos_policy_name: String,
    /// `((vm|adaptor),){0,2}` target list.
    pub target: String,
    /// MAC address pool name.
    pub ident_pool_name: String,
    pub nw_ctrl_policy_name: String,
    pub pin_to_group_name: String,
    /// One of `A`, `A-B`, `B`, `B-A`, `NONE`.
    pub switch_id: String,
    pub stats_policy_name: String,
    /// `initial-template` or `updating-template`.
    pub templ_type: String,
    pub descr: String,
}

impl Default for VnicTemplateParams {
    fn default() -> Self {
        Self {
            mtu: "1500".into(),
            qos_policy_name: String::new(),
            target: String::new(),
            ident_pool_name: String::new(),
            nw_ctrl_policy_name: String::new(),
            pin_to_group_name: String::new(),
            switch_id: "A".into(),
            stats_policy_name: "default".into(),
            templ_type: "initial-template".into(),
            descr: String::new(),
        }
    }
}

fn con_policy_ref(
    templ_dn: &Dn,
    con_policy_type: &str,
    con_policy_name: &str,
) -> Option<ManagedObject> {
    let (class_id, rn) = match con_policy_type {
        "dynamic-vnic" => (VNIC_DYNAMIC_CON_POLICY_REF, "dynamic-con"),
        "usnic" => (VNIC_USNIC_CON_POLICY_REF, "usnic-con"),
        "vmq" => (VNIC_VMQ_CON_POLICY_REF, "vmq-con"),
        _ => return None,
    };
    Some(
        ManagedObject::new(class_id, templ_dn.child(rn))
            .with_property("con_policy_name", con_policy_name),
    )
}

/// Create a vNIC template with its VLAN interfaces and optional adapter
/// connection policy reference.
///
/// `vlans` holds `(vlan_name, native)` pairs where `native` is `yes`/`no`;
/// `con_policy` holds `(type, policy_name)` with type one of
/// `dynamic-vnic`, `usnic`, `vmq`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist,
/// [`Error::InvalidValue`] for an unknown connection policy type. Nothing
/// is written in either case.
pub async fn vnic_template_create<S: Session>(
    session: &S,
    name: &str,
    vlans: &[(&str, &str)],
    con_policy: Option<(&str, &str)>,
    params: &VnicTemplateParams,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let templ = ManagedObject::new(VNIC_LAN_CONN_TEMPL, vnic_template_dn(parent_dn, name))
        .with_property("templ_type", &params.templ_type)
        .with_property("name", name)
        .with_property("descr", &params.descr)
        .with_property("stats_policy_name", &params.stats_policy_name)
        .with_property("switch_id", &params.switch_id)
        .with_property("pin_to_group_name", &params.pin_to_group_name)
        .with_property("mtu", &params.mtu)
        .with_property("policy_owner", "local")
        .with_property("qos_policy_name", &params.qos_policy_name)
        .with_property("target", &params.target)
        .with_property("ident_pool_name", &params.ident_pool_name)
        .with_property("nw_ctrl_policy_name", &params.nw_ctrl_policy_name);

    let policy_ref = match con_policy {
        Some((con_policy_type, con_policy_name)) => Some(
            con_policy_ref(templ.dn(), con_policy_type, con_policy_name).ok_or_else(|| {
                Error::InvalidValue {
                    field: "connection policy type",
                    value: con_policy_type.to_string(),
                }
            })?,
        ),
        None => None,
    };

    session.add_mo(&templ, true).await.map_err(Error::Session)?;
    if let Some(policy_ref) = policy_ref {
        session
            .add_mo(&policy_ref, true)
            .await
            .map_err(Error::Session)?;
    }
    for (vlan_name, native) in vlans {
        let ether_if = ManagedObject::new(VNIC_ETHER_IF, templ.dn().child(format!("if-{}", vlan_name)))
            .with_property("name", *vlan_name)
            .with_property("default_net", *native);
        session
            .add_mo(&ether_if, true)
            .await
            .map_err(Error::Session)?;
    }
    session.commit().await.map_err(Error::Session)?;
    Ok(templ)
}

/// Delete a vNIC template.
pub async fn vnic_template_delete<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = vnic_template_dn(parent_dn, name);
    require_dn(session, "vNIC template", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the vNIC template exists with the expected properties.
pub async fn vnic_template_exists<S: Session>(
    session: &S,
    name: &str,
    templ_type: Option<&str>,
    switch_id: Option<&str>,
    mtu: Option<&str>,
    ident_pool_name: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &vnic_template_dn(parent_dn, name),
        &[
            ("templ_type", templ_type),
            ("switch_id", switch_id),
            ("mtu", mtu),
            ("ident_pool_name", ident_pool_name),
        ],
    )
    .await
}
