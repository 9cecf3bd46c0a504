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

//! Expectations for the session mock.

use serde_json::to_value;
use serde_json::Value as JsonValue;
use ucsm_core::ClassId;
use ucsm_core::Dn;
use ucsm_core::ManagedObject;
use ucsm_core::PropFilter;

pub type Response<E> = Result<JsonValue, E>;

/// Request expected by the mock session.
#[derive(Debug)]
pub enum ExpectedRequest {
    /// Expected dn lookup.
    QueryDn { dn: Dn },
    /// Expected children query.
    QueryChildren {
        dn: Dn,
        class_id: Option<ClassId>,
    },
    /// Expected class query. The filter is compared in its rendered string
    /// form.
    QueryClassId {
        class_id: ClassId,
        filter: Option<String>,
    },
    /// Expected staged create.
    AddMo {
        mo: JsonValue,
        modify_present: bool,
    },
    /// Expected staged update.
    SetMo { mo: JsonValue },
    /// Expected staged removal.
    RemoveMo { dn: Dn },
    /// Expected commit.
    Commit,
    /// Expected login.
    Login { force: bool },
    /// Expected logout.
    Logout,
}

/// Expectation for the tests: one request and its canned response.
#[derive(Debug)]
pub struct Expect<E> {
    pub request: ExpectedRequest,
    pub response: Response<E>,
}

impl<E> Expect<E> {
    pub fn query_dn(dn: impl Into<Dn>, mo: impl Into<Option<ManagedObject>>) -> Self {
        let mo: Option<ManagedObject> = mo.into();
        Expect {
            request: ExpectedRequest::QueryDn { dn: dn.into() },
            response: Ok(to_value(mo).expect("json serializable")),
        }
    }

    pub fn query_children(
        dn: impl Into<Dn>,
        class_id: impl Into<Option<ClassId>>,
        mos: &[ManagedObject],
    ) -> Self {
        Expect {
            request: ExpectedRequest::QueryChildren {
                dn: dn.into(),
                class_id: class_id.into(),
            },
            response: Ok(to_value(mos).expect("json serializable")),
        }
    }

    pub fn query_class_id(
        class_id: ClassId,
        filter: Option<&PropFilter>,
        mos: &[ManagedObject],
    ) -> Self {
        Expect {
            request: ExpectedRequest::QueryClassId {
                class_id,
                filter: filter.map(PropFilter::to_filter_string),
            },
            response: Ok(to_value(mos).expect("json serializable")),
        }
    }

    pub fn add_mo(mo: &ManagedObject, modify_present: bool) -> Self {
        Expect {
            request: ExpectedRequest::AddMo {
                mo: to_value(mo).expect("json serializable"),
                modify_present,
            },
            response: Ok(JsonValue::Null),
        }
    }

    pub fn set_mo(mo: &ManagedObject) -> Self {
        Expect {
            request: ExpectedRequest::SetMo {
                mo: to_value(mo).expect("json serializable"),
            },
            response: Ok(JsonValue::Null),
        }
    }

    pub fn remove_mo(dn: impl Into<Dn>) -> Self {
        Expect {
            request: ExpectedRequest::RemoveMo { dn: dn.into() },
            response: Ok(JsonValue::Null),
        }
    }

    pub fn commit() -> Self {
        Expect {
            request: ExpectedRequest::Commit,
            response: Ok(JsonValue::Null),
        }
    }

    pub fn login(force: bool, connected: bool) -> Self {
        Expect {
            request: ExpectedRequest::Login { force },
            response: Ok(JsonValue::Bool(connected)),
        }
    }

    /// Login attempt answered with a transport error, as seen while the
    /// managed endpoint reboots.
    pub fn login_error(force: bool, error: E) -> Self {
        Expect {
            request: ExpectedRequest::Login { force },
            response: Err(error),
        }
    }

    /// Dn lookup answered with a transport error.
    pub fn query_dn_error(dn: impl Into<Dn>, error: E) -> Self {
        Expect {
            request: ExpectedRequest::QueryDn { dn: dn.into() },
            response: Err(error),
        }
    }

    /// Class query answered with a transport error.
    pub fn query_class_id_error(
        class_id: ClassId,
        filter: Option<&PropFilter>,
        error: E,
    ) -> Self {
        Expect {
            request: ExpectedRequest::QueryClassId {
                class_id,
                filter: filter.map(PropFilter::to_filter_string),
            },
            response: Err(error),
        }
    }

    pub fn logout() -> Self {
        Expect {
            request: ExpectedRequest::Logout,
            response: Ok(JsonValue::Null),
        }
    }
}
