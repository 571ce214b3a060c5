//! Declarative catalog of read-only upstream operations.
//!
//! Every REST endpoint exposed as a tool is described by one [`OperationSpec`]: a name,
//! an HTTP path template and the parameters it accepts. [`bind`] checks tool arguments
//! against an operation and produces a [`BoundRequest`] that the
//! [`Gateway`](crate::Gateway) can send. No endpoint has hand-written request code.
//!
//! ```
//! use cloudrelay_client::catalog::{self, bind};
//! use serde_json::json;
//!
//! let spec = catalog::find("list_dns_records").unwrap();
//! let request = bind(spec, &json!({
//!     "zone_id": "023e105f4ecef8ad9ca31a8372d0c353",
//!     "type": "MX",
//!     "per_page": 50,
//! })).unwrap();
//!
//! assert_eq!(request.path, "/zones/023e105f4ecef8ad9ca31a8372d0c353/dns_records");
//! assert_eq!(request.query, vec![
//!     ("type".to_string(), "MX".to_string()),
//!     ("per_page".to_string(), "50".to_string()),
//! ]);
//! ```

mod bind;
mod operations;

use serde::Serialize;

pub use bind::{BoundRequest, bind};
pub use operations::OPERATIONS;

/// Longest accepted identifier value.
pub const MAX_IDENTIFIER_LENGTH: usize = 64;
/// Longest accepted email address.
pub const MAX_EMAIL_LENGTH: usize = 254;
/// Longest accepted free-text value.
pub const MAX_TEXT_LENGTH: usize = 10_000;
/// Largest page size accepted by list endpoints.
pub const MAX_PER_PAGE: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
        }
    }
}

/// Where a parameter goes in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into `{name}` in the path template.
    Path,
    /// Appended to the query string under the parameter's `wire_name`.
    Query,
}

/// Accepted shape of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Up to 64 characters of `[A-Za-z0-9_.:-]`.
    Identifier,
    /// Free text up to 10 000 characters.
    Text,
    /// Email address up to 254 characters.
    Email,
    /// Integer within an inclusive range.
    Integer { min: i64, max: i64 },
    Boolean,
    /// One of a fixed set of strings.
    Enum(&'static [&'static str]),
}

/// One parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Argument name as seen by the tool caller.
    pub name: &'static str,
    /// Name sent upstream, e.g. `account.id` for a `account_id` argument.
    pub wire_name: &'static str,
    pub location: ParamLocation,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    /// Required path parameter holding an identifier.
    #[must_use]
    pub const fn path(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            location: ParamLocation::Path,
            kind: ParamKind::Identifier,
            required: true,
            description,
        }
    }

    /// Optional query parameter.
    #[must_use]
    pub const fn query(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            location: ParamLocation::Query,
            kind,
            required: false,
            description,
        }
    }

    /// Sends the value upstream under a different name.
    #[must_use]
    pub const fn wire(mut self, wire_name: &'static str) -> Self {
        self.wire_name = wire_name;
        self
    }

    /// Marks the parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replaces the kind, e.g. for an enum-valued path segment.
    #[must_use]
    pub const fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }
}

/// One read-only upstream operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// Tool name, `snake_case`.
    pub name: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    /// Path relative to the API base, with `{param}` placeholders.
    pub path: &'static str,
    pub params: &'static [ParamSpec],
}

impl OperationSpec {
    /// A `GET` operation.
    #[must_use]
    pub const fn get(
        name: &'static str,
        description: &'static str,
        path: &'static str,
        params: &'static [ParamSpec],
    ) -> Self {
        Self {
            name,
            description,
            method: HttpMethod::Get,
            path,
            params,
        }
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// All catalog operations.
#[must_use]
pub fn operations() -> &'static [OperationSpec] {
    OPERATIONS
}

/// Looks an operation up by tool name.
#[must_use]
pub fn find(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|op| op.name == name)
}
