//! Authorization gate
//!
//! Resolves the caller's role from a single identity attribute and checks it
//! against the allow-list of the requested operation. The gate has no side
//! effects and must run before any ledger access.

use tracing::{debug, warn};

use crate::error::ClaimError;
use crate::identity::{CallerIdentity, DEFAULT_ROLE_ATTRIBUTE};
use crate::roles::{AccessPolicy, Operation, Role};

/// Resolves `attribute` on the caller to a known role
pub fn resolve_role(caller: &dyn CallerIdentity, attribute: &str) -> Option<Role> {
    caller
        .attribute(attribute)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

/// Checks the caller's role against `allowed`
///
/// Fails `Unauthorized` when the attribute is missing, empty, names no known
/// role, or names a role outside the list.
pub fn check_role(
    caller: &dyn CallerIdentity,
    attribute: &str,
    allowed: &[Role],
    operation: Operation,
) -> Result<Role, ClaimError> {
    match resolve_role(caller, attribute) {
        Some(role) if allowed.contains(&role) => {
            debug!(operation = %operation, role = %role, "Caller authorized");
            Ok(role)
        }
        _ => {
            let raw = caller.attribute(attribute);
            warn!(
                operation = %operation,
                role = raw.as_deref().unwrap_or("<none>"),
                caller = caller.id().as_deref().unwrap_or("<unknown>"),
                "Caller not authorized"
            );
            Err(ClaimError::unauthorized(operation, raw))
        }
    }
}

/// Access policy bound to the identity attribute carrying the role
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    policy: AccessPolicy,
    role_attribute: String,
}

impl Default for AuthorizationGate {
    fn default() -> Self {
        Self::new(AccessPolicy::default())
    }
}

impl AuthorizationGate {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy,
            role_attribute: DEFAULT_ROLE_ATTRIBUTE.to_string(),
        }
    }

    /// Reads the role from a different identity attribute (e.g. `hf.role`)
    pub fn with_role_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.role_attribute = attribute.into();
        self
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn role_attribute(&self) -> &str {
        &self.role_attribute
    }

    /// Authorizes `caller` for `operation` under the configured policy
    pub fn authorize(&self, caller: &dyn CallerIdentity, operation: Operation) -> Result<Role, ClaimError> {
        check_role(
            caller,
            &self.role_attribute,
            self.policy.allowed_roles(operation),
            operation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentity;

    #[test]
    fn test_missing_attribute_is_unauthorized() {
        let caller = StaticIdentity::new();
        let err = check_role(&caller, "role", &Role::ALL, Operation::GetClaim).unwrap_err();
        assert!(matches!(err, ClaimError::Unauthorized { role: None, .. }));
    }

    #[test]
    fn test_empty_attribute_is_unauthorized() {
        let caller = StaticIdentity::new().attribute_value("role", "");
        assert!(check_role(&caller, "role", &Role::ALL, Operation::GetClaim).is_err());
    }

    #[test]
    fn test_unknown_role_is_unauthorized() {
        let caller = StaticIdentity::new().attribute_value("role", "invalidRole");
        let err = check_role(&caller, "role", &Role::ALL, Operation::GetClaim).unwrap_err();
        match err {
            ClaimError::Unauthorized { operation, role } => {
                assert_eq!(operation, Operation::GetClaim);
                assert_eq!(role.as_deref(), Some("invalidRole"));
            }
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_allowed_role_resolves() {
        let caller = StaticIdentity::with_role(Role::ClaimsAdjuster);
        let role = check_role(
            &caller,
            "role",
            &[Role::ClaimsAdjuster, Role::InsuranceCompanyManager],
            Operation::RejectClaim,
        )
        .unwrap();
        assert_eq!(role, Role::ClaimsAdjuster);
    }

    #[test]
    fn test_gate_reads_configured_attribute() {
        let gate = AuthorizationGate::default().with_role_attribute("hf.role");
        let caller = StaticIdentity::new().attribute_value("hf.role", "insuranceCompanyManager");

        assert_eq!(
            gate.authorize(&caller, Operation::CloseClaim).unwrap(),
            Role::InsuranceCompanyManager
        );

        let default_attr = StaticIdentity::with_role(Role::InsuranceCompanyManager);
        assert!(gate.authorize(&default_attr, Operation::CloseClaim).is_err());
    }

    #[test]
    fn test_error_message_matches_contract_wording() {
        let gate = AuthorizationGate::default();
        let err = gate
            .authorize(&StaticIdentity::with_role(Role::ClaimsAdjuster), Operation::FileClaim)
            .unwrap_err();
        assert_eq!(err.to_string(), "Current user cannot perform this operation.");
    }
}
