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

//! LAN cloud configuration: VLANs, pools, QoS, ports and vNIC templates.

pub mod ip_pool;
pub mod mac_pool;
pub mod port;
pub mod qos;
pub mod vlan;
pub mod vnic;

use ucsm_core::Dn;

/// Dn of the LAN cloud, the parent of VLANs and QoS system classes.
#[must_use]
pub fn lan_cloud_dn() -> Dn {
    Dn::from("fabric/lan")
}
