//! Operation descriptors for the user profile API
//!
//! Every remote call is described as data: a route template whose `:field`
//! segments are filled from the session, query parameters bound to session
//! fields, and an optional key whose presence marks success.

use std::fmt;
use std::str::FromStr;

/// Immutable description of one remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    /// Route relative to the API root, e.g. "contacts/:secret/:token"
    pub route_template: &'static str,
    /// (remote query parameter, local session field) pairs, sent in order
    pub param_bindings: &'static [(&'static str, &'static str)],
    /// Response key whose non-blank presence means the call succeeded.
    /// Operations without one hand back the normalized response instead.
    pub success_key: Option<&'static str>,
}

/// Operations exposed on a user profile session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Mentions,
    Company,
    Contacts,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Login,
        Operation::Mentions,
        Operation::Company,
        Operation::Contacts,
    ];

    pub fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Operation::Login => &LOGIN,
            Operation::Mentions => &MENTIONS,
            Operation::Company => &COMPANY,
            Operation::Contacts => &CONTACTS,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown operation: {}", s))
    }
}

static LOGIN: OperationDescriptor = OperationDescriptor {
    name: "login",
    route_template: "userprofile.ashx",
    param_bindings: &[("apisecrete", "secret"), ("token", "token")],
    success_key: Some("id"),
};

static MENTIONS: OperationDescriptor = OperationDescriptor {
    name: "mentions",
    route_template: "status/mentions/:secret/:token",
    param_bindings: &[],
    success_key: None,
};

static COMPANY: OperationDescriptor = OperationDescriptor {
    name: "company",
    route_template: "GetCompany/:secret/:token",
    param_bindings: &[],
    success_key: None,
};

static CONTACTS: OperationDescriptor = OperationDescriptor {
    name: "contacts",
    route_template: "contacts/:secret/:token",
    param_bindings: &[],
    success_key: None,
};
