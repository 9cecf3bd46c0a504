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

//! IP address pools.

use crate::require_dn;
use crate::Error;
use tracing::debug;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const IPPOOL_POOL: ClassId = ClassId::from_static("IppoolPool");
const IPPOOL_BLOCK: ClassId = ClassId::from_static("IppoolBlock");

/// Create an IP pool.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn ip_pool_create<S: Session>(
    session: &S,
    name: &str,
    assignment_order: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(IPPOOL_POOL, parent_dn.child(format!("ip-pool-{}", name)))
        .with_property("policy_owner", "local")
        .with_property("descr", descr)
        .with_property("assignment_order", assignment_order)
        .with_property("name", name);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove an IP pool.
pub async fn ip_pool_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = parent_dn.child(format!("ip-pool-{}", name));
    require_dn(session, "IP pool", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Add an address block to an IP pool.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the pool at `parent_dn` does not exist.
#[allow(clippy::too_many_arguments)]
pub async fn add_ip_block<S: Session>(
    session: &S,
    r_from: &str,
    to: &str,
    subnet: &str,
    default_gw: &str,
    prim_dns: &str,
    sec_dns: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "IP pool", parent_dn).await?;

    debug!(
        from = r_from,
        to, gw = default_gw, subnet, dns1 = prim_dns, dns2 = sec_dns,
        "creating IP block"
    );
    let mo = ManagedObject::new(
        IPPOOL_BLOCK,
        parent_dn.child(format!("block-{}-{}", r_from, to)),
    )
    .with_property("r_from", r_from)
    .with_property("to", to)
    .with_property("subnet", subnet)
    .with_property("def_gw", default_gw)
    .with_property("prim_dns", prim_dns)
    .with_property("sec_dns", sec_dns);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove an address block by its `{from}-{to}` name.
pub async fn ip_block_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = parent_dn.child(format!("block-{}", name));
    require_dn(session, "IP block", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}
