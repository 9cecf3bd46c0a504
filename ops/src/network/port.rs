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

//! Fabric interconnect port roles.

use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const FABRIC_DCE_SW_SRV_EP: ClassId = ClassId::from_static("FabricDceSwSrvEp");
const FABRIC_ETH_LAN_EP: ClassId = ClassId::from_static("FabricEthLanEp");

/// Configure a port as a server port, e.g. under `fabric/server/sw-A`.
pub async fn server_port_create<S: Session>(
    session: &S,
    parent_dn: &Dn,
    slot_id: u32,
    port_id: u32,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(
        FABRIC_DCE_SW_SRV_EP,
        parent_dn.child(format!("slot-{}-port-{}", slot_id, port_id)),
    )
    .with_property("slot_id", slot_id.to_string())
    .with_property("port_id", port_id.to_string());
    session.add_mo(&mo, false).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Configure a port as an uplink port, e.g. under `fabric/lan/A`.
pub async fn uplink_port_create<S: Session>(
    session: &S,
    parent_dn: &Dn,
    slot_id: u32,
    port_id: u32,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(
        FABRIC_ETH_LAN_EP,
        parent_dn.child(format!("slot-{}-port-{}", slot_id, port_id)),
    )
    .with_property("slot_id", slot_id.to_string())
    .with_property("port_id", port_id.to_string());
    session.add_mo(&mo, false).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}
