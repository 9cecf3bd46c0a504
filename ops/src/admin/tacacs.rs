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

//! TACACS+ authentication providers and provider groups, rooted at
//! `sys/tacacs-ext`.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const AAA_TACACS_PLUS_PROVIDER: ClassId = ClassId::from_static("AaaTacacsPlusProvider");
const AAA_PROVIDER_GROUP: ClassId = ClassId::from_static("AaaProviderGroup");
const AAA_PROVIDER_REF: ClassId = ClassId::from_static("AaaProviderRef");

fn tacacs_ext_dn() -> Dn {
    Dn::sys().child("tacacs-ext")
}

fn provider_dn(name: &str) -> Dn {
    tacacs_ext_dn().child(format!("provider-{}", name))
}

fn group_dn(name: &str) -> Dn {
    tacacs_ext_dn().child(format!("providergroup-{}", name))
}

/// TACACS+ provider settings.
#[derive(Debug, Clone)]
pub struct TacacsProviderParams {
    /// `lowest-available` or `0`-`16`.
    pub order: String,
    pub key: String,
    pub port: String,
    pub timeout: String,
    pub retries: String,
    pub enc_key: String,
    pub descr: String,
}

impl Default for TacacsProviderParams {
    fn default() -> Self {
        Self {
            order: "lowest-available".into(),
            key: String::new(),
            port: "49".into(),
            timeout: "5".into(),
            retries: "1".into(),
            enc_key: String::new(),
            descr: String::new(),
        }
    }
}

/// Per-field overrides/expectations for modify and exists.
#[derive(Debug, Clone, Default)]
pub struct TacacsProviderUpdate {
    pub order: Option<String>,
    pub key: Option<String>,
    pub port: Option<String>,
    pub timeout: Option<String>,
    pub retries: Option<String>,
    pub enc_key: Option<String>,
    pub descr: Option<String>,
}

impl TacacsProviderUpdate {
    fn fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("order", self.order.as_deref()),
            ("key", self.key.as_deref()),
            ("port", self.port.as_deref()),
            ("timeout", self.timeout.as_deref()),
            ("retries", self.retries.as_deref()),
            ("enc_key", self.enc_key.as_deref()),
            ("descr", self.descr.as_deref()),
        ]
    }
}

/// Create a TACACS+ provider.
pub async fn tacacsplus_provider_create<S: Session>(
    session: &S,
    name: &str,
    params: &TacacsProviderParams,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(AAA_TACACS_PLUS_PROVIDER, provider_dn(name))
        .with_property("name", name)
        .with_property("order", &params.order)
        .with_property("key", &params.key)
        .with_property("port", &params.port)
        .with_property("timeout", &params.timeout)
        .with_property("retries", &params.retries)
        .with_property("enc_key", &params.enc_key)
        .with_property("descr", &params.descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Check if the TACACS+ provider exists with the expected settings.
pub async fn tacacsplus_provider_exists<S: Session>(
    session: &S,
    name: &str,
    expected: &TacacsProviderUpdate,
) -> Result<bool, Error<S>> {
    exists_with_props(session, &provider_dn(name), &expected.fields()).await
}

/// Modify a TACACS+ provider. Only provided fields are changed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the provider does not exist.
pub async fn tacacsplus_provider_modify<S: Session>(
    session: &S,
    name: &str,
    changes: &TacacsProviderUpdate,
) -> Result<ManagedObject, Error<S>> {
    let dn = provider_dn(name);
    let mut mo = require_dn(session, "TACACS+ provider", &dn).await?;

    for (field, value) in changes.fields() {
        if let Some(value) = value {
            mo.set_property(field, value);
        }
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Delete a TACACS+ provider.
pub async fn tacacsplus_provider_delete<S: Session>(
    session: &S,
    name: &str,
) -> Result<(), Error<S>> {
    let dn = provider_dn(name);
    require_dn(session, "TACACS+ provider", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Create a TACACS+ provider group.
pub async fn tacacsplus_provider_group_create<S: Session>(
    session: &S,
    name: &str,
    descr: &str,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(AAA_PROVIDER_GROUP, group_dn(name))
        .with_property("name", name)
        .with_property("descr", descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Check if the TACACS+ provider group exists.
pub async fn tacacsplus_provider_group_exists<S: Session>(
    session: &S,
    name: &str,
    descr: Option<&str>,
) -> Result<bool, Error<S>> {
    exists_with_props(session, &group_dn(name), &[("descr", descr)]).await
}

/// Delete a TACACS+ provider group.
pub async fn tacacsplus_provider_group_delete<S: Session>(
    session: &S,
    name: &str,
) -> Result<(), Error<S>> {
    let dn = group_dn(name);
    require_dn(session, "TACACS+ provider group", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}

/// Add a TACACS+ provider to a provider group.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the group or the provider does not
/// exist.
pub async fn tacacsplus_provider_group_add_provider<S: Session>(
    session: &S,
    group_name: &str,
    name: &str,
    order: &str,
    descr: &str,
) -> Result<ManagedObject, Error<S>> {
    require_dn(session, "TACACS+ provider group", &group_dn(group_name)).await?;
    require_dn(session, "TACACS+ provider", &provider_dn(name)).await?;

    let mo = ManagedObject::new(
        AAA_PROVIDER_REF,
        group_dn(group_name).child(format!("provider-ref-{}", name)),
    )
    .with_property("name", name)
    .with_property("order", order)
    .with_property("descr", descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Check if the group references the provider with the expected order.
pub async fn tacacsplus_provider_group_provider_exists<S: Session>(
    session: &S,
    group_name: &str,
    name: &str,
    order: Option<&str>,
) -> Result<bool, Error<S>> {
    exists_with_props(
        session,
        &group_dn(group_name).child(format!("provider-ref-{}", name)),
        &[("order", order)],
    )
    .await
}

/// Change the order of a provider inside a group.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the group does not reference the
/// provider.
pub async fn tacacsplus_provider_group_modify_provider<S: Session>(
    session: &S,
    group_name: &str,
    name: &str,
    order: Option<&str>,
) -> Result<ManagedObject, Error<S>> {
    let dn = group_dn(group_name).child(format!("provider-ref-{}", name));
    let mut mo = require_dn(session, "TACACS+ provider reference", &dn).await?;

    if let Some(order) = order {
        mo.set_property("order", order);
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Remove a provider from a group.
pub async fn tacacsplus_provider_group_remove_provider<S: Session>(
    session: &S,
    group_name: &str,
    name: &str,
) -> Result<(), Error<S>> {
    let dn = group_dn(group_name).child(format!("provider-ref-{}", name));
    require_dn(session, "TACACS+ provider reference", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}
