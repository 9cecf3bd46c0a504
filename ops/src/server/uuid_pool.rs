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

//! UUID suffix pools.

use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const UUIDPOOL_POOL: ClassId = ClassId::from_static("UuidpoolPool");
const UUIDPOOL_BLOCK: ClassId = ClassId::from_static("UuidpoolBlock");

/// Create a UUID suffix pool. `prefix` is `derived` or an explicit UUID
/// prefix value.
pub async fn uuid_pool_create<S: Session>(
    session: &S,
    name: &str,
    descr: &str,
    prefix: &str,
    assignment_order: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(UUIDPOOL_POOL, parent_dn.child(format!("uuid-pool-{}", name)))
        .with_property("prefix", prefix)
        .with_property("descr", descr)
        .with_property("assignment_order", assignment_order)
        .with_property("name", name);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Add a suffix block to a UUID pool, e.g. from `0000-010101000000` to
/// `0000-010101000100`.
pub async fn uuid_block_create<S: Session>(
    session: &S,
    pool_dn: &Dn,
    r_from: &str,
    to: &str,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(
        UUIDPOOL_BLOCK,
        pool_dn.child(format!("block-from-{}-to-{}", r_from, to)),
    )
    .with_property("r_from", r_from)
    .with_property("to", to);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}
