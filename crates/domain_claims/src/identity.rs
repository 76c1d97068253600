//! Caller identity capability
//!
//! The host resolves credentials; the claims domain only ever asks for a
//! named attribute.

use std::collections::HashMap;

use crate::roles::Role;

/// Attribute name the role is read from unless configured otherwise
pub const DEFAULT_ROLE_ATTRIBUTE: &str = "role";

/// Attribute lookup on the identity that invoked an operation
pub trait CallerIdentity: Send + Sync {
    /// Returns the value of an identity attribute, if the credential carries it
    fn attribute(&self, name: &str) -> Option<String>;

    /// Opaque caller identifier, used for logging only
    fn id(&self) -> Option<String> {
        None
    }
}

/// Identity backed by a fixed attribute map
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    id: Option<String>,
    attributes: HashMap<String, String>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity carrying `role` under the default role attribute
    pub fn with_role(role: Role) -> Self {
        Self::new().attribute_value(DEFAULT_ROLE_ATTRIBUTE, role.as_str())
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attribute_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl CallerIdentity for StaticIdentity {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}
