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

//! Sub-organization management.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const ORG_ORG: ClassId = ClassId::from_static("OrgOrg");

fn org_dn(parent_dn: &Dn, name: &str) -> Dn {
    parent_dn.child(format!("org-{}", name))
}

/// Create a sub-organization under `parent_dn`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the parent organization does not exist;
/// nothing is written in that case.
pub async fn org_create<S: Session>(
    session: &S,
    name: &str,
    descr: &str,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "org", parent_dn).await?;

    let mo = ManagedObject::new(ORG_ORG, org_dn(parent_dn, name))
        .with_property("name", name)
        .with_property("descr", descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Modify a sub-organization. Only provided fields are changed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the organization does not exist.
pub async fn org_modify<S: Session>(
    session: &S,
    name: &str,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<ManagedObject, Error<S>> {
    let dn = org_dn(parent_dn, name);
    let mut mo = require_dn(session, "org", &dn).await?;

    if let Some(descr) = descr {
        mo.set_property("descr", descr);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a sub-organization by dn.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the organization does not exist.
pub async fn org_remove_by_dn<S: Session>(session: &S, org_dn: &Dn) -> Result<(), Error<S>> {
    require_dn(session, "org", org_dn).await?;
    session.remove_mo(org_dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Remove a sub-organization by name.
pub async fn org_remove<S: Session>(
    session: &S,
    name: &str,
    parent_dn: &Dn,
) -> Result<(), Error<S>> {
    org_remove_by_dn(session, &org_dn(parent_dn, name)).await
}

/// Check if the organization exists with the given description.
pub async fn org_exists<S: Session>(
    session: &S,
    name: &str,
    descr: Option<&str>,
    parent_dn: &Dn,
) -> Result<bool, Error<S>> {
    exists_with_props(session, &org_dn(parent_dn, name), &[("descr", descr)]).await
}
