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

//! Server (compute) pools.

use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const COMPUTE_POOL: ClassId = ClassId::from_static("ComputePool");
const COMPUTE_POOLED_RACK_UNIT: ClassId = ClassId::from_static("ComputePooledRackUnit");
const COMPUTE_POOLED_SLOT: ClassId = ClassId::from_static("ComputePooledSlot");

/// Create a server pool.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist.
pub async fn server_pool_create<S: Session>(
    session: &S,
    name: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(
        COMPUTE_POOL,
        parent_dn.child(format!("compute-pool-{}", name)),
    )
    .with_property("name", name)
    .with_property("descr", descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

async fn require_pool<S: Session>(session: &S, pool_dn: &Dn) -> Result<ManagedObject, Error<S>> {
    let pool = require_dn(session, "server pool", pool_dn).await?;
    if *pool.class_id() != COMPUTE_POOL {
        return Err(Error::WrongClass {
            dn: pool_dn.clone(),
            expected: COMPUTE_POOL,
            actual: pool.class_id().clone(),
        });
    }
    Ok(pool)
}

/// Add a rack server to a server pool.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the pool does not exist and
/// [`Error::WrongClass`] if `pool_dn` names some other object.
pub async fn server_pool_add_rack_unit<S: Session>(
    session: &S,
    rack_id: u32,
    pool_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_pool(session, pool_dn).await?;

    let mo = ManagedObject::new(
        COMPUTE_POOLED_RACK_UNIT,
        pool_dn.child(format!("rack-unit-{}", rack_id)),
    )
    .with_property("id", rack_id.to_string());
    session.add_mo(&mo, false).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Add a blade server to a server pool by chassis and slot.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the pool does not exist and
/// [`Error::WrongClass`] if `pool_dn` names some other object.
pub async fn server_pool_add_slot<S: Session>(
    session: &S,
    chassis_id: u32,
    slot_id: u32,
    pool_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_pool(session, pool_dn).await?;

    let mo = ManagedObject::new(
        COMPUTE_POOLED_SLOT,
        pool_dn.child(format!("blade-{}-{}", chassis_id, slot_id)),
    )
    .with_property("chassis_id", chassis_id.to_string())
    .with_property("slot_id", slot_id.to_string());
    session.add_mo(&mo, false).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}
