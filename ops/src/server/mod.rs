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

//! Server-side policies, pools, disks and service-profile deployment.

pub mod bios;
pub mod boot_policy;
pub mod deployment;
pub mod local_disk;
pub mod maintenance;
pub mod power;
pub mod scrub;
pub mod server_pool;
pub mod uuid_pool;
