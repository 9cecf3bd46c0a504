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

//! VLANs and VLAN groups in the LAN cloud.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use tracing::debug;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const FABRIC_VLAN: ClassId = ClassId::from_static("FabricVlan");
const FABRIC_NET_GROUP: ClassId = ClassId::from_static("FabricNetGroup");
const FABRIC_POOLED_VLAN: ClassId = ClassId::from_static("FabricPooledVlan");

/// Optional VLAN properties; the defaults match a plain local VLAN.
#[derive(Debug, Clone)]
pub struct VlanParams {
    /// One of `community`, `isolated`, `none`, `primary`.
    pub sharing: String,
    pub mcast_policy_name: String,
    /// One of `excluded`, `included`.
    pub compression_type: String,
    /// Whether this is the default network: `yes`/`no`.
    pub default_net: String,
    pub pub_nw_name: String,
}

impl Default for VlanParams {
    fn default() -> Self {
        Self {
            sharing: "none".into(),
            mcast_policy_name: String::new(),
            compression_type: "included".into(),
            default_net: "no".into(),
            pub_nw_name: String::new(),
        }
    }
}

/// Expected VLAN properties for [`vlan_exists`].
#[derive(Debug, Clone, Default)]
pub struct VlanMatch {
    pub vlan_id: Option<String>,
    pub sharing: Option<String>,
    pub mcast_policy_name: Option<String>,
    pub compression_type: Option<String>,
    pub default_net: Option<String>,
    pub pub_nw_name: Option<String>,
}

fn vlan_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("net-{}", name))
}

/// Create a VLAN in the LAN cloud.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the LAN cloud at `parent_dn` does not
/// exist.
pub async fn vlan_create<S: Session>(
    session: &S,
    name: &str,
    vlan_id: &str,
    params: &VlanParams,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "lan", parent_dn).await?;

    let mo = ManagedObject::new(FABRIC_VLAN, vlan_dn(parent_dn, name))
        .with_property("sharing", &params.sharing)
        .with_property("name", name)
        .with_property("id", vlan_id)
        .with_property("mcast_policy_name", &params.mcast_policy_name)
        .with_property("policy_owner", "local")
        .with_property("default_net", &params.default_net)
        .with_property("pub_nw_name", &params.pub_nw_name)
        .with_property("compression_type", &params.compression_type);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Delete a VLAN.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the VLAN does not exist.
pub async fn vlan_delete<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = vlan_dn(parent_dn, name);
    require_dn(session, "VLAN", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the VLAN exists with the expected properties.
pub async fn vlan_exists<S: Session>(
    session: &S,
    name: &str,
    expected: &VlanMatch,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &vlan_dn(parent_dn, name),
        &[
            ("id", expected.vlan_id.as_deref()),
            ("sharing", expected.sharing.as_deref()),
            ("mcast_policy_name", expected.mcast_policy_name.as_deref()),
            ("compression_type", expected.compression_type.as_deref()),
            ("default_net", expected.default_net.as_deref()),
            ("pub_nw_name", expected.pub_nw_name.as_deref()),
        ],
    )
    .await
}

/// Create a VLAN group with pooled member VLANs, updating the native VLAN
/// of an already existing group.
pub async fn vlan_group_create<S: Session>(
    session: &S,
    name: &str,
    native_vlan: &str,
    pooled_vlans: &[&str],
) -> Result<ManagedObject, Error<S>> {
    let parent_dn = super::lan_cloud_dn();
    let group_dn = parent_dn.child(format!("net-group-{}", name));

    debug!(%group_dn, "creating VLAN group");
    let group = match session.query_dn(&group_dn).await.map_err(Error::Session)? {
        Some(mut existing) => {
            existing.set_property("native_net", native_vlan);
            existing
        }
        None => ManagedObject::new(FABRIC_NET_GROUP, group_dn.clone())
            .with_property("name", name)
            .with_property("native_net", native_vlan),
    };
    session.add_mo(&group, true).await.map_err(Error::Session)?;

    for pooled_vlan in pooled_vlans {
        debug!(vlan = pooled_vlan, "creating VLAN group member");
        let member = ManagedObject::new(
            FABRIC_POOLED_VLAN,
            group_dn.child(format!("net-{}", pooled_vlan)),
        )
        .with_property("name", *pooled_vlan);
        session.add_mo(&member, true).await.map_err(Error::Session)?;
    }

    session.commit().await.map_err(Error::Session)?;
    Ok(group)
}
