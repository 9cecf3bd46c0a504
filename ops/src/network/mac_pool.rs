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

//! MAC address pools.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const MACPOOL_POOL: ClassId = ClassId::from_static("MacpoolPool");
const MACPOOL_BLOCK: ClassId = ClassId::from_static("MacpoolBlock");

fn mac_pool_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("mac-pool-{}", name))
}

/// Create a MAC pool with one address block.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn mac_pool_create<S: Session>(
    session: &S,
    name: &str,
    assignment_order: &str,
    r_from: &str,
    to: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let pool = ManagedObject::new(MACPOOL_POOL, mac_pool_dn(parent_dn, name))
        .with_property("policy_owner", "local")
        .with_property("descr", descr)
        .with_property("assignment_order", assignment_order)
        .with_property("name", name);
    let block = ManagedObject::new(
        MACPOOL_BLOCK,
        pool.dn().child(format!("block-{}-{}", r_from, to)),
    )
    .with_property("r_from", r_from)
    .with_property("to", to);

    session.add_mo(&pool, true).await.map_err(Error::Session)?;
    session.add_mo(&block, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(pool)
}

/// Remove a MAC pool.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the pool does not exist.
pub async fn mac_pool_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    let dn = mac_pool_dn(parent_dn, name);
    require_dn(session, "MAC pool", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Check if the MAC pool exists with the expected properties.
pub async fn mac_pool_exists<S: Session>(
    session: &S,
    name: &str,
    assignment_order: Option<&str>,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &mac_pool_dn(parent_dn, name),
        &[("assignment_order", assignment_order), ("descr", descr)],
    )
    .await
}
