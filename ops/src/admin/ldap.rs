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

//! LDAP authentication providers, rooted at `sys/ldap-ext`.

use crate::exists_with_props;
use crate::require_dn;
use crate::Error;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::Session;

const AAA_LDAP_PROVIDER: ClassId = ClassId::from_static("AaaLdapProvider");

fn provider_dn(name: &str) -> Dn {
    Dn::sys().child("ldap-ext").child(format!("provider-{}", name))
}

/// LDAP provider settings.
#[derive(Debug, Clone)]
pub struct LdapProviderParams {
    /// `lowest-available` or `0`-`16`.
    pub order: String,
    pub rootdn: String,
    pub basedn: String,
    pub port: String,
    /// `yes`/`no`.
    pub enable_ssl: String,
    pub filter: String,
    pub attribute: String,
    pub key: String,
    pub timeout: String,
    pub vendor: String,
    pub retries: String,
    pub descr: String,
}

impl Default for LdapProviderParams {
    fn default() -> Self {
        Self {
            order: "lowest-available".into(),
            rootdn: String::new(),
            basedn: String::new(),
            port: "389".into(),
            enable_ssl: "no".into(),
            filter: String::new(),
            attribute: String::new(),
            key: String::new(),
            timeout: "30".into(),
            vendor: "OpenLdap".into(),
            retries: "1".into(),
            descr: String::new(),
        }
    }
}

/// Per-field overrides/expectations for modify and exists.
#[derive(Debug, Clone, Default)]
pub struct LdapProviderUpdate {
    pub order: Option<String>,
    pub rootdn: Option<String>,
    pub basedn: Option<String>,
    pub port: Option<String>,
    pub enable_ssl: Option<String>,
    pub filter: Option<String>,
    pub attribute: Option<String>,
    pub key: Option<String>,
    pub timeout: Option<String>,
    pub vendor: Option<String>,
    pub retries: Option<String>,
    pub descr: Option<String>,
}

impl LdapProviderUpdate {
    fn fields(&self) -> [(&'static str, Option<&str>); 12] {
        [
            ("order", self.order.as_deref()),
            ("rootdn", self.rootdn.as_deref()),
            ("basedn", self.basedn.as_deref()),
            ("port", self.port.as_deref()),
            ("enable_ssl", self.enable_ssl.as_deref()),
            ("filter", self.filter.as_deref()),
            ("attribute", self.attribute.as_deref()),
            ("key", self.key.as_deref()),
            ("timeout", self.timeout.as_deref()),
            ("vendor", self.vendor.as_deref()),
            ("retries", self.retries.as_deref()),
            ("descr", self.descr.as_deref()),
        ]
    }
}

/// Create an LDAP provider.
pub async fn ldap_provider_create<S: Session>(
    session: &S,
    name: &str,
    params: &LdapProviderParams,
) -> Result<ManagedObject, Error<S>> {
    let mo = ManagedObject::new(AAA_LDAP_PROVIDER, provider_dn(name))
        .with_property("name", name)
        .with_property("order", &params.order)
        .with_property("rootdn", &params.rootdn)
        .with_property("basedn", &params.basedn)
        .with_property("port", &params.port)
        .with_property("enable_ssl", &params.enable_ssl)
        .with_property("filter", &params.filter)
        .with_property("attribute", &params.attribute)
        .with_property("key", &params.key)
        .with_property("timeout", &params.timeout)
        .with_property("vendor", &params.vendor)
        .with_property("retries", &params.retries)
        .with_property("descr", &params.descr);
    session.add_mo(&mo, true).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Check if the LDAP provider exists with the expected settings.
pub async fn ldap_provider_exists<S: Session>(
    session: &S,
    name: &str,
    expected: &LdapProviderUpdate,
) -> Result<bool, Error<S>> {
    exists_with_props(session, &provider_dn(name), &expected.fields()).await
}

/// Modify an LDAP provider. Only provided fields are changed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the provider does not exist.
pub async fn ldap_provider_modify<S: Session>(
    session: &S,
    name: &str,
    changes: &LdapProviderUpdate,
) -> Result<ManagedObject, Error<S>> {
    let dn = provider_dn(name);
    let mut mo = require_dn(session, "LDAP provider", &dn).await?;

    for (field, value) in changes.fields() {
        if let Some(value) = value {
            mo.set_property(field, value);
        }
    }

    session.set_mo(&mo).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(mo)
}

/// Delete an LDAP provider.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the provider does not exist.
pub async fn ldap_provider_delete<S: Session>(session: &S, name: &str) -> Result<(), Error<S>> {
    let dn = provider_dn(name);
    require_dn(session, "LDAP provider", &dn).await?;
    session.remove_mo(&dn).await.map_err(Error::Session)?;
    session.commit().await.map_err(Error::Session)?;
    Ok(())
}
