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

//! Time source abstraction for polling loops.
//!
//! Firmware activation and service-profile association are observed by
//! bounded poll loops: sleep a fixed interval, re-query, compare elapsed
//! time against a timeout. Going through [`Clock`] instead of
//! `tokio::time` directly keeps those loops testable against simulated
//! time; the mock crate advances a manual clock on every `sleep`.

use std::future::Future;
use std::time::Duration;
use std::time::Instant;

/// Monotonic time source with an async sleep.
pub trait Clock: Send + Sync {
    /// Current instant, comparable across calls on the same clock.
    fn now(&self) -> Instant;

    /// Suspend for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Clock`] backed by the tokio runtime.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[cfg(feature = "tokio")]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
