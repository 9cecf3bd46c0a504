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
//! Integration tests of sub-organization management.

use std::error::Error as StdError;
use tokio::test;
use ucsm_ops::org::org_create;
use ucsm_ops::org::org_exists;
use ucsm_ops::org::org_modify;
use ucsm_ops::org::org_remove;
use ucsm_ops::Error;
use ucsm_tests::mo;
use ucsm_tests::Dn;
use ucsm_tests::Expect;
use ucsm_tests::Session;

#[test]
async fn org_create_stages_fields_and_commits_once() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let parent = Dn::org_root();
    session.expect(Expect::query_dn(
        parent.clone(),
        mo("OrgOrg", "org-root", &[("name", "root")]),
    ));
    let expected = mo(
        "OrgOrg",
        "org-root/org-finance",
        &[("name", "finance"), ("descr", "Finance org")],
    );
    session.expect(Expect::add_mo(&expected, true));
    session.expect(Expect::commit());

    let created = org_create(&session, "finance", "Finance org", &parent).await?;
    assert_eq!(created, expected);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn org_create_missing_parent_is_an_error_without_write() {
    let session = Session::default();
    let parent = Dn::org_root().child("org-absent");
    session.expect(Expect::query_dn(parent.clone(), None));

    let err = org_create(&session, "finance", "", &parent)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "org", .. }));
    assert_eq!(session.remaining(), 0);
}

#[test]
async fn org_modify_overlays_only_provided_fields() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let parent = Dn::org_root();
    let existing = mo(
        "OrgOrg",
        "org-root/org-finance",
        &[("name", "finance"), ("descr", "old")],
    );
    let updated = mo(
        "OrgOrg",
        "org-root/org-finance",
        &[("name", "finance"), ("descr", "new")],
    );
    session.expect(Expect::query_dn("org-root/org-finance", existing));
    session.expect(Expect::set_mo(&updated));
    session.expect(Expect::commit());

    let result = org_modify(&session, "finance", Some("new"), &parent).await?;
    assert_eq!(result, updated);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn org_remove_deletes_by_dn() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn(
        "org-root/org-finance",
        mo("OrgOrg", "org-root/org-finance", &[("name", "finance")]),
    ));
    session.expect(Expect::remove_mo("org-root/org-finance"));
    session.expect(Expect::commit());

    org_remove(&session, "finance", &Dn::org_root()).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn org_exists_checks_provided_fields_only() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "OrgOrg",
        "org-root/org-finance",
        &[("name", "finance"), ("descr", "Finance org")],
    );

    session.expect(Expect::query_dn("org-root/org-finance", existing.clone()));
    assert!(org_exists(&session, "finance", None, &Dn::org_root()).await?);

    session.expect(Expect::query_dn("org-root/org-finance", existing.clone()));
    assert!(org_exists(&session, "finance", Some("Finance org"), &Dn::org_root()).await?);

    session.expect(Expect::query_dn("org-root/org-finance", existing));
    assert!(!org_exists(&session, "finance", Some("other"), &Dn::org_root()).await?);

    session.expect(Expect::query_dn("org-root/org-finance", None));
    assert!(!org_exists(&session, "finance", None, &Dn::org_root()).await?);

    assert_eq!(session.remaining(), 0);
    Ok(())
}
