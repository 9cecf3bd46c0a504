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
//! Integration tests of VLAN management.

use std::error::Error as StdError;
use tokio::test;
use ucsm_ops::network::lan_cloud_dn;
use ucsm_ops::network::vlan::vlan_create;
use ucsm_ops::network::vlan::vlan_delete;
use ucsm_ops::network::vlan::vlan_exists;
use ucsm_ops::network::vlan::vlan_group_create;
use ucsm_ops::network::vlan::VlanMatch;
use ucsm_ops::network::vlan::VlanParams;
use ucsm_ops::Error;
use ucsm_tests::mo;
use ucsm_tests::Expect;
use ucsm_tests::Session;

#[test]
async fn vlan_create_stages_all_properties() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let parent = lan_cloud_dn();
    session.expect(Expect::query_dn(
        parent.clone(),
        mo("FabricLanCloud", "fabric/lan", &[]),
    ));
    let expected = mo(
        "FabricVlan",
        "fabric/lan/net-vlan-lab",
        &[
            ("sharing", "none"),
            ("name", "vlan-lab"),
            ("id", "123"),
            ("mcast_policy_name", ""),
            ("policy_owner", "local"),
            ("default_net", "no"),
            ("pub_nw_name", ""),
            ("compression_type", "included"),
        ],
    );
    session.expect(Expect::add_mo(&expected, true));
    session.expect(Expect::commit());

    let created = vlan_create(&session, "vlan-lab", "123", &VlanParams::default(), &parent).await?;
    assert_eq!(created, expected);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn vlan_create_missing_lan_cloud_is_an_error() {
    let session = Session::default();
    let parent = lan_cloud_dn();
    session.expect(Expect::query_dn(parent.clone(), None));

    let err = vlan_create(&session, "vlan-lab", "123", &VlanParams::default(), &parent)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "lan", .. }));
    assert_eq!(session.remaining(), 0);
}

#[test]
async fn vlan_delete_removes_by_rn() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let parent = lan_cloud_dn();
    session.expect(Expect::query_dn(
        "fabric/lan/net-vlan-lab",
        mo("FabricVlan", "fabric/lan/net-vlan-lab", &[("id", "123")]),
    ));
    session.expect(Expect::remove_mo("fabric/lan/net-vlan-lab"));
    session.expect(Expect::commit());

    vlan_delete(&session, "vlan-lab", &parent).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn vlan_exists_rejects_any_field_mismatch() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let parent = lan_cloud_dn();
    let existing = mo(
        "FabricVlan",
        "fabric/lan/net-vlan-lab",
        &[("id", "123"), ("sharing", "none")],
    );

    // One matching field must not mask a mismatching one.
    session.expect(Expect::query_dn("fabric/lan/net-vlan-lab", existing.clone()));
    let expected = VlanMatch {
        vlan_id: Some("123".into()),
        sharing: Some("primary".into()),
        ..VlanMatch::default()
    };
    assert!(!vlan_exists(&session, "vlan-lab", &expected, &parent).await?);

    session.expect(Expect::query_dn("fabric/lan/net-vlan-lab", existing));
    let expected = VlanMatch {
        vlan_id: Some("123".into()),
        sharing: Some("none".into()),
        ..VlanMatch::default()
    };
    assert!(vlan_exists(&session, "vlan-lab", &expected, &parent).await?);

    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn vlan_group_create_adds_members() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    session.expect(Expect::query_dn("fabric/lan/net-group-mygroup", None));
    let group = mo(
        "FabricNetGroup",
        "fabric/lan/net-group-mygroup",
        &[("name", "mygroup"), ("native_net", "vlan-lab")],
    );
    session.expect(Expect::add_mo(&group, true));
    for member in ["vlan-a", "vlan-b"] {
        let pooled = mo(
            "FabricPooledVlan",
            format!("fabric/lan/net-group-mygroup/net-{}", member),
            &[("name", member)],
        );
        session.expect(Expect::add_mo(&pooled, true));
    }
    session.expect(Expect::commit());

    let created = vlan_group_create(&session, "mygroup", "vlan-lab", &["vlan-a", "vlan-b"]).await?;
    assert_eq!(created, group);
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn vlan_group_create_updates_existing_group() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let existing = mo(
        "FabricNetGroup",
        "fabric/lan/net-group-mygroup",
        &[("name", "mygroup"), ("native_net", "old-native")],
    );
    session.expect(Expect::query_dn(
        "fabric/lan/net-group-mygroup",
        existing.clone(),
    ));
    let mut updated = existing;
    updated.set_property("native_net", "new-native");
    session.expect(Expect::add_mo(&updated, true));
    session.expect(Expect::commit());

    vlan_group_create(&session, "mygroup", "new-native", &[]).await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}
