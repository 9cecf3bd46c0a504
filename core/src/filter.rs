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

//! Property filter builder for class queries.
//!
//! Class-wide queries ([`Session::query_class_id`](crate::Session::query_class_id))
//! accept a property filter in the UCS XML-API string form: an atom is
//! `(prop, value, type="eq")` and atoms combine with ` and ` / ` or `.
//!
//! ```rust
//! use ucsm_core::PropFilter;
//!
//! let filter = PropFilter::eq("type", "b-series-bundle");
//! assert_eq!(filter.to_filter_string(), r#"(type, b-series-bundle, type="eq")"#);
//!
//! let filter = PropFilter::eq("name", "img-a").or_eq("name", "img-b");
//! assert_eq!(
//!     filter.to_filter_string(),
//!     r#"(name, img-a, type="eq") or (name, img-b, type="eq")"#
//! );
//! ```

/// Filter expression component.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterExpr {
    Eq { property: String, value: String },
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
}

impl FilterExpr {
    fn to_filter_string(&self) -> String {
        match self {
            Self::Eq { property, value } => {
                format!("({}, {}, type=\"eq\")", property, value)
            }
            Self::And(left, right) => {
                format!(
                    "{} and {}",
                    left.to_filter_string(),
                    right.to_filter_string()
                )
            }
            Self::Or(left, right) => {
                format!("{} or {}", left.to_filter_string(), right.to_filter_string())
            }
        }
    }
}

/// Builder for class query property filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropFilter {
    expr: FilterExpr,
}

impl PropFilter {
    /// Filter on property equality.
    pub fn eq(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expr: FilterExpr::Eq {
                property: property.into(),
                value: value.into(),
            },
        }
    }

    /// Chain another equality with logical AND.
    #[must_use]
    pub fn and_eq(self, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expr: FilterExpr::And(
                Box::new(self.expr),
                Box::new(FilterExpr::Eq {
                    property: property.into(),
                    value: value.into(),
                }),
            ),
        }
    }

    /// Chain another equality with logical OR.
    #[must_use]
    pub fn or_eq(self, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expr: FilterExpr::Or(
                Box::new(self.expr),
                Box::new(FilterExpr::Eq {
                    property: property.into(),
                    value: value.into(),
                }),
            ),
        }
    }

    /// Combine with another filter using logical OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            expr: FilterExpr::Or(Box::new(self.expr), Box::new(other.expr)),
        }
    }

    /// Render as the wire filter string.
    #[must_use]
    pub fn to_filter_string(&self) -> String {
        self.expr.to_filter_string()
    }
}
