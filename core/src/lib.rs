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

//! Core abstractions for UCS Manager automation.
//!
//! This crate defines the transport-agnostic [`Session`] trait, the
//! contract of an authenticated connection to a UCS Manager instance, and
//! the value types that flow through it: [`Dn`], [`ClassId`],
//! [`ManagedObject`] and the [`PropFilter`] query filter builder.
//!
//! The actual XML-API client is an external collaborator; implementors of
//! [`Session`] bridge to it. Automation code in `ucsm-ops` is written purely
//! against the trait, which is what makes it testable with the
//! expectation-queue mock in `ucsm-session-mock`.
//!
//! Time is abstracted behind the [`Clock`] trait so that polling loops can
//! run against simulated time in tests. A tokio-backed implementation is
//! available behind the `tokio` feature (enabled by default).

pub mod clock;
pub mod dn;
pub mod filter;
pub mod mo;
pub mod session;

#[doc(inline)]
pub use clock::Clock;
#[cfg(feature = "tokio")]
pub use clock::TokioClock;
pub use dn::Dn;
pub use filter::PropFilter;
pub use mo::ClassId;
pub use mo::ManagedObject;
pub use session::ManagerEndpoint;
pub use session::Session;
pub use session::SessionCredentials;
