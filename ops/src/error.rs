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

//! Operation errors.
//!
//! Two families, mirroring how callers must react:
//! - precondition errors (`NotFound`, `WrongClass`, `InvalidValue`,
//!   `AlreadyAssociated`, `NotBound`): raised before any write is staged,
//!   never retried;
//! - terminal-state errors (`ConfigFailure`, `AssociationFailed`,
//!   `DownloadFailed`, `ActivationIncomplete`, `LoginTimeout`): the remote
//!   side reached a state that polling cannot recover from.
//!
//! Transient connectivity failures inside the waiters are NOT errors; the
//! loops log and retry them, and plain timeout is reported as `Ok(false)`.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::Session;

pub enum Error<S: Session> {
    /// Underlying session failure.
    Session(S::Error),
    /// A required object did not resolve by dn.
    NotFound { kind: &'static str, dn: Dn },
    /// The object at `dn` is not of the class the operation needs.
    WrongClass {
        dn: Dn,
        expected: ClassId,
        actual: ClassId,
    },
    /// An argument is outside the accepted value set.
    InvalidValue { field: &'static str, value: String },
    /// The service profile is already bound to the server.
    AlreadyAssociated { sp_dn: Dn, server_dn: Dn },
    /// The service profile has no binding to remove.
    NotBound { sp_dn: Dn },
    /// The service profile reported a configuration failure.
    ConfigFailure {
        sp_dn: Dn,
        config_state: String,
        qualifier: String,
    },
    /// The service profile association FSM reported failure.
    AssociationFailed { sp_dn: Dn },
    /// Malformed firmware bundle version string.
    BadBundleVersion { version: String },
    /// The requested bundle is not present on the fabric interconnect.
    BundleNotAvailable { version: String },
    /// A required image type is missing from the firmware bundle.
    ImageNotInBundle {
        image_type: String,
        bundle_version: String,
    },
    /// No management controller record matched the subject.
    NoMgmtController { subject: String },
    /// A management controller has no running-firmware records.
    NoRunningFirmware { subject: String },
    /// A firmware download reached a terminal failure (or timed out).
    DownloadFailed { image: String, reason: String },
    /// Activation finished without the manager reaching the version.
    ActivationIncomplete { version: String },
    /// Could not re-establish the session within the timeout.
    LoginTimeout { waited: Duration },
}

impl<S: Session> fmt::Display for Error<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => write!(f, "session error: {}", err),
            Self::NotFound { kind, dn } => write!(f, "{} '{}' does not exist", kind, dn),
            Self::WrongClass {
                dn,
                expected,
                actual,
            } => write!(
                f,
                "object '{}' is a {}, expected {}",
                dn, actual, expected
            ),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid {}: \"{}\"", field, value)
            }
            Self::AlreadyAssociated { sp_dn, server_dn } => write!(
                f,
                "service profile '{}' is already associated with server '{}'",
                sp_dn, server_dn
            ),
            Self::NotBound { sp_dn } => {
                write!(f, "service profile '{}' is already dissociated", sp_dn)
            }
            Self::ConfigFailure {
                sp_dn,
                config_state,
                qualifier,
            } => write!(
                f,
                "service profile '{}' config failure: {} qualifier: {}",
                sp_dn, config_state, qualifier
            ),
            Self::AssociationFailed { sp_dn } => {
                write!(f, "service profile '{}' association failed", sp_dn)
            }
            Self::BadBundleVersion { version } => {
                write!(f, "malformed bundle version '{}'", version)
            }
            Self::BundleNotAvailable { version } => write!(
                f,
                "bundle '{}' is not available on the fabric interconnect",
                version
            ),
            Self::ImageNotInBundle {
                image_type,
                bundle_version,
            } => write!(
                f,
                "image type '{}' of bundle '{}' is not present",
                image_type, bundle_version
            ),
            Self::NoMgmtController { subject } => {
                write!(f, "no management controller with subject '{}'", subject)
            }
            Self::NoRunningFirmware { subject } => {
                write!(f, "no running firmware for subject '{}'", subject)
            }
            Self::DownloadFailed { image, reason } => {
                write!(f, "download of '{}' failed: {}", image, reason)
            }
            Self::ActivationIncomplete { version } => {
                write!(f, "manager not updated to version '{}'", version)
            }
            Self::LoginTimeout { waited } => write!(
                f,
                "unable to log in to UCS Manager after {}s",
                waited.as_secs()
            ),
        }
    }
}

impl<S: Session> fmt::Debug for Error<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => f.debug_tuple("Session").field(err).finish(),
            _ => write!(f, "Error({})", self),
        }
    }
}

impl<S: Session> StdError for Error<S>
where
    S::Error: 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}
