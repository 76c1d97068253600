//! Caller roles and per-operation access policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role attribute carried by a caller's identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Driver,
    ClaimsAdjuster,
    InsuranceCompanyManager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Driver, Role::ClaimsAdjuster, Role::InsuranceCompanyManager];

    /// Attribute value as issued in caller credentials
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Driver => "driver",
            Role::ClaimsAdjuster => "claimsAdjuster",
            Role::InsuranceCompanyManager => "insuranceCompanyManager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an attribute value names no known role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Lifecycle operations gated by the access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    FileClaim,
    /// Covers every read: fetching a claim, its status, or its existence
    GetClaim,
    RejectClaim,
    EstablishCoverage,
    CloseClaim,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::FileClaim,
        Operation::GetClaim,
        Operation::RejectClaim,
        Operation::EstablishCoverage,
        Operation::CloseClaim,
    ];

    /// Transaction name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FileClaim => "fileClaim",
            Operation::GetClaim => "getClaim",
            Operation::RejectClaim => "rejectClaim",
            Operation::EstablishCoverage => "establishCoverage",
            Operation::CloseClaim => "closeClaim",
        }
    }

    pub(crate) fn verb(&self) -> &'static str {
        match self {
            Operation::FileClaim => "file",
            Operation::GetClaim => "read",
            Operation::RejectClaim => "reject",
            Operation::EstablishCoverage => "establish coverage for",
            Operation::CloseClaim => "close",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-operation role allow-lists
///
/// The default grants rejection to both claims adjusters and insurance company
/// managers. [`AccessPolicy::adjuster_rejection_only`] restricts rejection to
/// claims adjusters. An empty list disables the operation for everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    pub file_claim: Vec<Role>,
    pub get_claim: Vec<Role>,
    pub reject_claim: Vec<Role>,
    pub establish_coverage: Vec<Role>,
    pub close_claim: Vec<Role>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            file_claim: vec![Role::Driver],
            get_claim: Role::ALL.to_vec(),
            reject_claim: vec![Role::ClaimsAdjuster, Role::InsuranceCompanyManager],
            establish_coverage: vec![Role::ClaimsAdjuster],
            close_claim: vec![Role::InsuranceCompanyManager],
        }
    }
}

impl AccessPolicy {
    /// Default policy with rejection limited to claims adjusters
    pub fn adjuster_rejection_only() -> Self {
        Self {
            reject_claim: vec![Role::ClaimsAdjuster],
            ..Self::default()
        }
    }

    /// Roles allowed to perform `operation`
    pub fn allowed_roles(&self, operation: Operation) -> &[Role] {
        match operation {
            Operation::FileClaim => &self.file_claim,
            Operation::GetClaim => &self.get_claim,
            Operation::RejectClaim => &self.reject_claim,
            Operation::EstablishCoverage => &self.establish_coverage,
            Operation::CloseClaim => &self.close_claim,
        }
    }

    /// Replaces the allow-list for one operation
    pub fn allow(mut self, operation: Operation, roles: impl IntoIterator<Item = Role>) -> Self {
        let roles: Vec<Role> = roles.into_iter().collect();
        match operation {
            Operation::FileClaim => self.file_claim = roles,
            Operation::GetClaim => self.get_claim = roles,
            Operation::RejectClaim => self.reject_claim = roles,
            Operation::EstablishCoverage => self.establish_coverage = roles,
            Operation::CloseClaim => self.close_claim = roles,
        }
        self
    }

    pub fn permits(&self, role: Role, operation: Operation) -> bool {
        self.allowed_roles(operation).contains(&role)
    }
}
