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
//! Integration tests of AAA provider management.

use std::error::Error as StdError;
use tokio::test;
use ucsm_ops::admin::ldap::ldap_provider_create;
use ucsm_ops::admin::ldap::LdapProviderParams;
use ucsm_ops::admin::radius::radius_provider_exists;
use ucsm_ops::admin::radius::radius_provider_modify;
use ucsm_ops::admin::radius::RadiusProviderUpdate;
use ucsm_ops::admin::tacacs::tacacsplus_provider_group_add_provider;
use ucsm_ops::admin::tacacs::tacacsplus_provider_group_create;
use ucsm_ops::Error;
use ucsm_tests::mo;
use ucsm_tests::Expect;
use ucsm_tests::Session;

#[test]
async fn ldap_provider_create_stages_defaults() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let provider = mo(
        "AaaLdapProvider",
        "sys/ldap-ext/provider-dc01",
        &[
            ("name", "dc01"),
            ("order", "lowest-available"),
            ("rootdn", ""),
            ("basedn", ""),
            ("port", "389"),
            ("enable_ssl", "no"),
            ("filter", ""),
            ("attribute", ""),
            ("key", ""),
            ("timeout", "30"),
            ("vendor", "OpenLdap"),
            ("retries", "1"),
            ("descr", ""),
        ],
    );
    session.expect(Expect::add_mo(&provider, true));
    session.expect(Expect::commit());

    let created = ldap_provider_create(&session, "dc01", &LdapProviderParams::default()).await?;
    assert_eq!(created, provider);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn radius_provider_modify_requires_existing_provider() {
    let session = Session::default();
    session.expect(Expect::query_dn("sys/radius-ext/provider-rad01", None));

    let changes = RadiusProviderUpdate {
        timeout: Some("10".into()),
        ..RadiusProviderUpdate::default()
    };
    let err = radius_provider_modify(&session, "rad01", &changes)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            kind: "RADIUS provider",
            ..
        }
    ));
    assert_eq!(session.remaining(), 0);
}

#[test]
async fn radius_provider_modify_overlays_fields() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "AaaRadiusProvider",
        "sys/radius-ext/provider-rad01",
        &[("name", "rad01"), ("timeout", "5"), ("retries", "1")],
    );
    session.expect(Expect::query_dn(
        "sys/radius-ext/provider-rad01",
        existing.clone(),
    ));
    let mut updated = existing;
    updated.set_property("timeout", "10");
    session.expect(Expect::set_mo(&updated));
    session.expect(Expect::commit());

    let changes = RadiusProviderUpdate {
        timeout: Some("10".into()),
        ..RadiusProviderUpdate::default()
    };
    radius_provider_modify(&session, "rad01", &changes).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn radius_provider_exists_rejects_any_field_mismatch() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "AaaRadiusProvider",
        "sys/radius-ext/provider-rad01",
        &[("auth_port", "1812"), ("timeout", "5")],
    );
    session.expect(Expect::query_dn("sys/radius-ext/provider-rad01", existing));

    // Matching auth_port must not mask the timeout mismatch.
    let expected = RadiusProviderUpdate {
        auth_port: Some("1812".into()),
        timeout: Some("30".into()),
        ..RadiusProviderUpdate::default()
    };
    assert!(!radius_provider_exists(&session, "rad01", &expected).await?);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn tacacs_group_create_and_add_provider() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let group = mo(
        "AaaProviderGroup",
        "sys/tacacs-ext/providergroup-ops",
        &[("name", "ops"), ("descr", "")],
    );
    session.expect(Expect::add_mo(&group, true));
    session.expect(Expect::commit());
    tacacsplus_provider_group_create(&session, "ops", "").await?;

    session.expect(Expect::query_dn(
        "sys/tacacs-ext/providergroup-ops",
        group,
    ));
    session.expect(Expect::query_dn(
        "sys/tacacs-ext/provider-tac01",
        mo(
            "AaaTacacsPlusProvider",
            "sys/tacacs-ext/provider-tac01",
            &[("name", "tac01")],
        ),
    ));
    let provider_ref = mo(
        "AaaProviderRef",
        "sys/tacacs-ext/providergroup-ops/provider-ref-tac01",
        &[("name", "tac01"), ("order", "1"), ("descr", "")],
    );
    session.expect(Expect::add_mo(&provider_ref, true));
    session.expect(Expect::commit());
    tacacsplus_provider_group_add_provider(&session, "ops", "tac01", "1", "").await?;

    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn tacacs_group_add_provider_requires_group_and_provider() {
    let session = Session::default();
    session.expect(Expect::query_dn("sys/tacacs-ext/providergroup-ops", None));

    // Missing group fails before the provider lookup.
    let err = tacacsplus_provider_group_add_provider(&session, "ops", "tac01", "1", "")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::NotFound {
            kind: "TACACS+ provider group",
            ..
        }
    ));
    assert_eq!(session.remaining(), 0);
}
