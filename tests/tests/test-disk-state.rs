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
//! Integration tests of physical disk state control.

use std::error::Error as StdError;
use tokio::test;
use ucsm_ops::server::local_disk::disk_state_set;
use ucsm_ops::Error;
use ucsm_tests::mo;
use ucsm_tests::Expect;
use ucsm_tests::Session;

#[test]
async fn disk_state_set_builds_exact_dn_and_action() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let expected = mo(
        "StorageLocalDisk",
        "sys/rack-unit-1/board/storage-SAS-1/disk-4",
        &[
            ("id", "4"),
            ("admin_action", "jbod"),
            ("admin_action_trigger", "triggered"),
        ],
    );
    session.expect(Expect::add_mo(&expected, true));
    session.expect(Expect::commit());

    let created = disk_state_set(&session, 1, 4, "jbod", "storage-SAS-1").await?;
    assert_eq!(
        created.dn().to_string(),
        "sys/rack-unit-1/board/storage-SAS-1/disk-4"
    );
    assert_eq!(created.property("admin_action"), Some("jbod"));
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn disk_state_set_accepts_unconfigured_good() -> Result<(), Box<dyn StdError>> {
    let session = Session::default();
    let expected = mo(
        "StorageLocalDisk",
        "sys/rack-unit-2/board/storage-SAS-2/disk-1",
        &[
            ("id", "1"),
            ("admin_action", "unconfigured-good"),
            ("admin_action_trigger", "triggered"),
        ],
    );
    session.expect(Expect::add_mo(&expected, true));
    session.expect(Expect::commit());

    disk_state_set(&session, 2, 1, "unconfigured-good", "storage-SAS-2").await?;
    assert_eq!(session.remaining(), 0);
    Ok(())
}

#[test]
async fn disk_state_set_rejects_unknown_state_without_write() {
    let session = Session::default();

    let err = disk_state_set(&session, 1, 4, "raid0", "storage-SAS-1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidValue {
            field: "disk state",
            ..
        }
    ));
    assert_eq!(session.remaining(), 0);
}
