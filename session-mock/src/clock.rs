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

//! Manually advanced clock for waiter tests.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;
use ucsm_core::Clock;

/// [`Clock`] whose time only moves when someone sleeps on it (or calls
/// [`ManualClock::advance`]). Sleeps complete immediately, so a polling
/// loop with a 20-minute timeout runs in microseconds of real time while
/// observing the full simulated 20 minutes.
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move simulated time forward without sleeping.
    pub fn advance(&self, duration: Duration) {
        *self.offset.lock().expect("not poisoned") += duration;
    }

    /// Total simulated time passed since construction.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().expect("not poisoned")
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.advance(duration);
        std::future::ready(())
    }
}
