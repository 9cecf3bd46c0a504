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

//! Expectation-queue mock of the UCS Manager session.
//!
//! Tests enqueue [`Expect`] values describing the requests an operation is
//! allowed to make, in order, each with a canned response. Any deviation
//! (a request with no expectation left, or one that does not match the
//! head of the queue) fails the calling operation with a descriptive
//! error.
//! Asserting `remaining() == 0` afterwards proves the operation performed
//! every expected request, commits included, and nothing else.

pub mod clock;
pub mod expect;

#[doc(inline)]
pub use clock::ManualClock;
#[doc(inline)]
pub use expect::Expect;
pub use expect::ExpectedRequest;

use serde_json::from_value;
use serde_json::to_value;
use serde_json::Error as JsonError;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Mutex;
use std::sync::PoisonError;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::PropFilter;
use ucsm_core::Session as UcsmSession;

#[derive(Debug)]
pub enum Error {
    ErrorResponse(Box<dyn StdError + Send + Sync>),
    MutexLock(String),
    NothingIsExpected,
    BadResponseJson(JsonError),
    UnexpectedQueryDn(Dn, ExpectedRequest),
    UnexpectedQueryChildren(Dn, ExpectedRequest),
    UnexpectedQueryClassId(ClassId, ExpectedRequest),
    UnexpectedAddMo(Dn, String, ExpectedRequest),
    UnexpectedSetMo(Dn, String, ExpectedRequest),
    UnexpectedRemoveMo(Dn, ExpectedRequest),
    UnexpectedCommit(ExpectedRequest),
    UnexpectedLogin(ExpectedRequest),
    UnexpectedLogout(ExpectedRequest),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ErrorResponse(err) => write!(f, "response: {}", err),
            Self::MutexLock(err) => write!(f, "lock error: {}", err),
            Self::NothingIsExpected => {
                write!(f, "nothing is expected to happen but something happened")
            }
            Self::BadResponseJson(err) => write!(f, "bad json response: {}", err),
            Self::UnexpectedQueryDn(dn, expected) => {
                write!(f, "unexpected query_dn: {}; expected: {:?}", dn, expected)
            }
            Self::UnexpectedQueryChildren(dn, expected) => {
                write!(
                    f,
                    "unexpected query_children: {}; expected: {:?}",
                    dn, expected
                )
            }
            Self::UnexpectedQueryClassId(class_id, expected) => {
                write!(
                    f,
                    "unexpected query_class_id: {}; expected: {:?}",
                    class_id, expected
                )
            }
            Self::UnexpectedAddMo(dn, json, expected) => {
                write!(
                    f,
                    "unexpected add_mo: {}; json: {} expected: {:?}",
                    dn, json, expected
                )
            }
            Self::UnexpectedSetMo(dn, json, expected) => {
                write!(
                    f,
                    "unexpected set_mo: {}; json: {} expected: {:?}",
                    dn, json, expected
                )
            }
            Self::UnexpectedRemoveMo(dn, expected) => {
                write!(f, "unexpected remove_mo: {}; expected: {:?}", dn, expected)
            }
            Self::UnexpectedCommit(expected) => {
                write!(f, "unexpected commit; expected: {:?}", expected)
            }
            Self::UnexpectedLogin(expected) => {
                write!(f, "unexpected login; expected: {:?}", expected)
            }
            Self::UnexpectedLogout(expected) => {
                write!(f, "unexpected logout; expected: {:?}", expected)
            }
        }
    }
}

impl StdError for Error {}

impl Error {
    pub fn mutex_lock<T>(err: PoisonError<T>) -> Self {
        Self::MutexLock(err.to_string())
    }
}

/// Mock session holding a queue of expectations.
pub struct Session<E> {
    expect: Mutex<VecDeque<Expect<E>>>,
}

impl<E> Default for Session<E> {
    fn default() -> Self {
        Self {
            expect: Mutex::new(VecDeque::new()),
        }
    }
}

impl<E> Session<E> {
    /// Append an expectation to the queue.
    pub fn expect(&self, exp: Expect<E>) {
        self.expect
            .lock()
            .expect("not poisoned")
            .push_back(exp);
    }

    /// Drop all queued expectations.
    pub fn clear(&self) {
        self.expect.lock().expect("not poisoned").clear();
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expect.lock().expect("not poisoned").len()
    }

    pub fn debug_expect(&self) {
        let expect: &VecDeque<Expect<E>> = &self.expect.lock().expect("not poisoned");
        println!("Expectations (total: {})", expect.len());
        for v in expect {
            println!("{:#?}", v.request);
        }
    }

    fn pop(&self) -> Result<Expect<E>, Error> {
        self.expect
            .lock()
            .map_err(Error::mutex_lock)?
            .pop_front()
            .ok_or(Error::NothingIsExpected)
    }
}

fn unwrap_response<E>(response: expect::Response<E>) -> Result<serde_json::Value, Error>
where
    E: StdError + Send + Sync + 'static,
{
    response.map_err(|err| Error::ErrorResponse(Box::new(err)))
}

impl<E> UcsmSession for Session<E>
where
    E: StdError + Send + Sync + 'static,
{
    type Error = Error;

    async fn query_dn(&self, in_dn: &Dn) -> Result<Option<ManagedObject>, Error> {
        let expect = self.pop()?;
        match expect {
            Expect {
                request: ExpectedRequest::QueryDn { dn },
                response,
            } if dn == *in_dn => {
                let response = unwrap_response(response)?;
                from_value(response).map_err(Error::BadResponseJson)
            }
            _ => Err(Error::UnexpectedQueryDn(in_dn.clone(), expect.request)),
        }
    }

    async fn query_children(
        &self,
        in_dn: &Dn,
        in_class_id: Option<&ClassId>,
    ) -> Result<Vec<ManagedObject>, Error> {
        let expect = self.pop()?;
        match expect {
            Expect {
                request: ExpectedRequest::QueryChildren { dn, class_id },
                response,
            } if dn == *in_dn && class_id.as_ref() == in_class_id => {
                let response = unwrap_response(response)?;
                from_value(response).map_err(Error::BadResponseJson)
            }
            _ => Err(Error::UnexpectedQueryChildren(
                in_dn.clone(),
                expect.request,
            )),
        }
    }

    async fn query_class_id(
        &self,
        in_class_id: &ClassId,
        in_filter: Option<&PropFilter>,
    ) -> Result<Vec<ManagedObject>, Error> {
        let expect = self.pop()?;
        let in_filter = in_filter.map(PropFilter::to_filter_string);
        match expect {
            Expect {
                request: ExpectedRequest::QueryClassId { class_id, filter },
                response,
            } if class_id == *in_class_id && filter == in_filter => {
                let response = unwrap_response(response)?;
                from_value(response).map_err(Error::BadResponseJson)
            }
            _ => Err(Error::UnexpectedQueryClassId(
                in_class_id.clone(),
                expect.request,
            )),
        }
    }

    async fn add_mo(&self, in_mo: &ManagedObject, in_modify_present: bool) -> Result<(), Error> {
        let expect = self.pop()?;
        let in_request = to_value(in_mo).expect("json serializable");
        match expect {
            Expect {
                request:
                    ExpectedRequest::AddMo {
                        mo,
                        modify_present,
                    },
                response,
            } if mo == in_request && modify_present == in_modify_present => {
                unwrap_response(response)?;
                Ok(())
            }
            _ => Err(Error::UnexpectedAddMo(
                in_mo.dn().clone(),
                in_request.to_string(),
                expect.request,
            )),
        }
    }

    async fn set_mo(&self, in_mo: &ManagedObject) -> Result<(), Error> {
        let expect = self.pop()?;
        let in_request = to_value(in_mo).expect("json serializable");
        match expect {
            Expect {
                request: ExpectedRequest::SetMo { mo },
                response,
            } if mo == in_request => {
                unwrap_response(response)?;
                Ok(())
            }
            _ => Err(Error::UnexpectedSetMo(
                in_mo.dn().clone(),
                in_request.to_string(),
                expect.request,
            )),
        }
    }

    async fn remove_mo(&self, in_dn: &Dn) -> Result<(), Error> {
        let expect = self.pop()?;
        match expect {
            Expect {
                request: ExpectedRequest::RemoveMo { dn },
                response,
            } if dn == *in_dn => {
                unwrap_response(response)?;
                Ok(())
            }
            _ => Err(Error::UnexpectedRemoveMo(in_dn.clone(), expect.request)),
        }
    }

    async fn commit(&self) -> Result<(), Error> {
        let expect = self.pop()?;
        match expect {
            Expect {
                request: ExpectedRequest::Commit,
                response,
            } => {
                unwrap_response(response)?;
                Ok(())
            }
            _ => Err(Error::UnexpectedCommit(expect.request)),
        }
    }

    async fn login(&self, in_force: bool) -> Result<bool, Error> {
        let expect = self.pop()?;
        match expect {
            Expect {
                request: ExpectedRequest::Login { force },
                response,
            } if force == in_force => {
                let response = unwrap_response(response)?;
                from_value(response).map_err(Error::BadResponseJson)
            }
            _ => Err(Error::UnexpectedLogin(expect.request)),
        }
    }

    async fn logout(&self) -> Result<(), Error> {
        let expect = self.pop()?;
        match expect {
            Expect {
                request: ExpectedRequest::Logout,
                response,
            } => {
                unwrap_response(response)?;
                Ok(())
            }
            _ => Err(Error::UnexpectedLogout(expect.request)),
        }
    }
}
