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

//! RADIUS authentication providers, rooted at `sys/radius-ext`.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const AAA_RADIUS_PROVIDER: ClassId = ClassId::from_static("AaaRadiusProvider");

fn provider_dn(name: &str) -> Dn {
    Dn::sys()
        .child("radius-ext")
        .child(format!("provider-{}", name))
}

/// RADIUS provider settings.
#[derive(Debug, Clone)]
pub struct RadiusProviderParams {
    /// `lowest-available` or `0`-`16`.
    pub order: String,
    pub key: String,
    pub auth_port: String,
    pub timeout: String,
    pub retries: String,
    pub enc_key: String,
    pub descr: String,
}

impl Default for RadiusProviderParams {
    fn default() -> Self {
        Self {
            order: "lowest-available".into(),
            key: String::new(),
            auth_port: "1812".into(),
            timeout: "5".into(),
            retries: "1".into(),
            enc_key: String::new(),
            descr: String::new(),
        }
    }
}

/// Per-field overrides/expectations for modify and exists.
#[derive(Debug, Clone, Default)]
pub struct RadiusProviderUpdate {
    pub order: Option<String>,
    pub key: Option<String>,
    pub auth_port: Option<String>,
    pub timeout: Option<String>,
    pub retries: Option<String>,
    pub enc_key: Option<String>,
    pub descr: Option<String>,
}

impl RadiusProviderUpdate {
    fn fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("order", self.order.as_deref()),
            ("key", self.key.as_deref()),
            ("auth_port", self.auth_port.as_deref()),
            ("timeout", self.timeout.as_deref()),
            ("retries", self.retries.as_deref()),
            ("enc_key", self.enc_key.as_deref()),
            ("descr", self.descr.as_deref()),
        ]
    }
}

/// Create a RADIUS provider.
pub async fn radius_provider_create<S: Session>(
    session: &S,
    name: &str,
    params: &RadiusProviderParams,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(AAA_RADIUS_PROVIDER, provider_dn(name))
        .with_property("name", name)
        .with_property("order", &params.order)
        .with_property("key", &params.key)
        .with_property("auth_port", &params.auth_port)
        .with_property("timeout", &params.timeout)
        .with_property("retries", &params.retries)
        .with_property("enc_key", &params.enc_key)
        .with_property("descr", &params.descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Check if the RADIUS provider exists with the expected settings.
pub async fn radius_provider_exists<S: Session>(
    session: &S,
    name: &str,
    expected: &RadiusProviderUpdate,
) -> Result<bool, Error<S>> {
    exists_with_props(session, &provider_dn(name), &expected.fields()).await
}

/// Modify a RADIUS provider. Only provided fields are changed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the provider does not exist.
pub async fn radius_provider_modify<S: Session>(
    session: &S,
    name: &str,
    changes: &RadiusProviderUpdate,
) -> Result<ManagedObject, Error<S>> {
    let dn = provider_dn(name);
    let mut mo = require_dn(session, "RADIUS provider", &dn).await?;

    for (field, value) in changes.fields() {
        if let Some(value) = value {
            mo.set_property(field, value);
        }
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Delete a RADIUS provider.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the provider does not exist.
pub async fn radius_provider_delete<S: Session>(session: &S, name: &str) -> Result<(), Error<S>> {
    let dn = provider_dn(name);
    require_dn(session, "RADIUS provider", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}
