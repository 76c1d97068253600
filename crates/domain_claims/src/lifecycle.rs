//! Claim lifecycle service
//!
//! Every operation follows the same order: authorize the caller, load the
//! current record, verify existence and status, then write once. A failure at
//! any step returns before the ledger is written.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use core_kernel::{ClaimId, PortError};

use crate::authorization::AuthorizationGate;
use crate::claim::{ClaimRecord, ClaimStatus};
use crate::error::ClaimError;
use crate::identity::CallerIdentity;
use crate::payload::{ClaimPayload, ClaimSubmission};
use crate::ports::LedgerStore;
use crate::roles::Operation;

/// Constraint applied to the amount passed to `establish_coverage`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageAmountPolicy {
    /// Any amount is recorded as given
    #[default]
    AcceptAsGiven,
    /// Negative amounts are refused
    RequireNonNegative,
    /// Zero and negative amounts are refused
    RequirePositive,
}

impl CoverageAmountPolicy {
    pub fn check(&self, amount: Decimal) -> Result<(), ClaimError> {
        let accepted = match self {
            CoverageAmountPolicy::AcceptAsGiven => true,
            CoverageAmountPolicy::RequireNonNegative => amount >= Decimal::ZERO,
            CoverageAmountPolicy::RequirePositive => amount > Decimal::ZERO,
        };
        if accepted {
            Ok(())
        } else {
            Err(ClaimError::InvalidCoverageAmount(amount))
        }
    }
}

/// Lifecycle controller over an injected ledger
///
/// Holds no claim state of its own; every call reads the ledger.
#[derive(Clone)]
pub struct ClaimLifecycleService {
    ledger: Arc<dyn LedgerStore>,
    gate: AuthorizationGate,
    coverage_policy: CoverageAmountPolicy,
}

impl ClaimLifecycleService {
    /// Service with the default access policy and `role` attribute
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self {
            ledger,
            gate: AuthorizationGate::default(),
            coverage_policy: CoverageAmountPolicy::default(),
        }
    }

    pub fn with_gate(mut self, gate: AuthorizationGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_coverage_policy(mut self, policy: CoverageAmountPolicy) -> Self {
        self.coverage_policy = policy;
        self
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    pub fn coverage_policy(&self) -> CoverageAmountPolicy {
        self.coverage_policy
    }

    /// Files a new claim in status `Filed` with zero coverage
    ///
    /// Returns the id the claim was stored under. A payload without an id is
    /// assigned a generated one.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, then `AlreadyExists`, then `MissingField` for the first
    /// missing required field, then `Store`.
    #[instrument(skip(self, caller, payload), fields(claim_id))]
    pub async fn file_claim(
        &self,
        caller: &dyn CallerIdentity,
        payload: ClaimPayload,
    ) -> Result<ClaimId, ClaimError> {
        self.gate.authorize(caller, Operation::FileClaim)?;

        let id = payload.claim_id().cloned().unwrap_or_else(ClaimId::generate);
        self.ensure_absent(&id).await?;
        self.insert(id, payload).await
    }

    /// Files a claim from an undecoded submission
    ///
    /// The existence check runs on the submitted id before the remaining
    /// fields are decoded, so a badly typed field in a duplicate submission
    /// still reports `AlreadyExists`.
    #[instrument(skip(self, caller, submission), fields(claim_id))]
    pub async fn file_submission(
        &self,
        caller: &dyn CallerIdentity,
        submission: ClaimSubmission,
    ) -> Result<ClaimId, ClaimError> {
        self.gate.authorize(caller, Operation::FileClaim)?;

        let id = submission.claim_id()?.unwrap_or_else(ClaimId::generate);
        self.ensure_absent(&id).await?;
        let payload = submission.decode()?;
        self.insert(id, payload).await
    }

    /// Reads a claim
    #[instrument(skip(self, caller), fields(claim_id = %id))]
    pub async fn get_claim(&self, caller: &dyn CallerIdentity, id: &ClaimId) -> Result<ClaimRecord, ClaimError> {
        self.gate.authorize(caller, Operation::GetClaim)?;
        self.load(id).await
    }

    /// Reports whether a claim exists; never fails `NotFound`
    #[instrument(skip(self, caller), fields(claim_id = %id))]
    pub async fn claim_exists(&self, caller: &dyn CallerIdentity, id: &ClaimId) -> Result<bool, ClaimError> {
        self.gate.authorize(caller, Operation::GetClaim)?;
        if id.is_empty() {
            return Ok(false);
        }
        Ok(self.ledger.exists(id).await?)
    }

    /// Current status of a claim
    #[instrument(skip(self, caller), fields(claim_id = %id))]
    pub async fn claim_status(&self, caller: &dyn CallerIdentity, id: &ClaimId) -> Result<ClaimStatus, ClaimError> {
        self.gate.authorize(caller, Operation::GetClaim)?;
        Ok(self.load(id).await?.status)
    }

    /// Filed -> Rejected
    #[instrument(skip(self, caller), fields(claim_id = %id))]
    pub async fn reject_claim(&self, caller: &dyn CallerIdentity, id: &ClaimId) -> Result<ClaimRecord, ClaimError> {
        self.gate.authorize(caller, Operation::RejectClaim)?;
        let mut record = self.load(id).await?;
        record.reject()?;
        self.store(&record).await?;

        info!(claim_id = %id, status = %record.status, "Claim rejected");
        Ok(record)
    }

    /// Filed -> CoverageEstablished with the given payout amount
    ///
    /// The amount is checked against the coverage policy after the status
    /// check.
    #[instrument(skip(self, caller), fields(claim_id = %id, amount = %amount))]
    pub async fn establish_coverage(
        &self,
        caller: &dyn CallerIdentity,
        id: &ClaimId,
        amount: Decimal,
    ) -> Result<ClaimRecord, ClaimError> {
        self.gate.authorize(caller, Operation::EstablishCoverage)?;
        let mut record = self.load(id).await?;
        record.check_transition(Operation::EstablishCoverage, ClaimStatus::CoverageEstablished)?;
        self.coverage_policy.check(amount)?;

        record.establish_coverage(amount)?;
        self.store(&record).await?;

        info!(claim_id = %id, status = %record.status, amount = %amount, "Coverage established");
        Ok(record)
    }

    /// CoverageEstablished -> CoverageIsPaid
    #[instrument(skip(self, caller), fields(claim_id = %id))]
    pub async fn close_claim(&self, caller: &dyn CallerIdentity, id: &ClaimId) -> Result<ClaimRecord, ClaimError> {
        self.gate.authorize(caller, Operation::CloseClaim)?;
        let mut record = self.load(id).await?;
        record.close()?;
        self.store(&record).await?;

        info!(claim_id = %id, status = %record.status, "Claim closed");
        Ok(record)
    }

    async fn ensure_absent(&self, id: &ClaimId) -> Result<(), ClaimError> {
        tracing::Span::current().record("claim_id", tracing::field::display(id));
        if self.ledger.exists(id).await? {
            return Err(ClaimError::AlreadyExists(id.clone()));
        }
        Ok(())
    }

    async fn insert(&self, id: ClaimId, payload: ClaimPayload) -> Result<ClaimId, ClaimError> {
        let record = payload.into_record(id.clone())?;
        let bytes = record.to_bytes()?;

        self.ledger.create(&id, bytes).await.map_err(|e| match e {
            PortError::Conflict { .. } => ClaimError::AlreadyExists(id.clone()),
            other => ClaimError::Store(other),
        })?;

        info!(claim_id = %id, status = %ClaimStatus::Filed, "Claim filed");
        Ok(id)
    }

    // No key is stored under the empty id.
    async fn load(&self, id: &ClaimId) -> Result<ClaimRecord, ClaimError> {
        if id.is_empty() {
            return Err(ClaimError::NotFound(id.clone()));
        }
        match self.ledger.get(id).await {
            Ok(Some(bytes)) if !bytes.is_empty() => ClaimRecord::from_bytes(id, &bytes),
            Ok(_) => Err(ClaimError::NotFound(id.clone())),
            Err(e) if e.is_not_found() => Err(ClaimError::NotFound(id.clone())),
            Err(e) => Err(ClaimError::Store(e)),
        }
    }

    async fn store(&self, record: &ClaimRecord) -> Result<(), ClaimError> {
        let bytes = record.to_bytes()?;
        self.ledger.put(&record.id, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_as_given_allows_anything() {
        let policy = CoverageAmountPolicy::AcceptAsGiven;
        assert!(policy.check(Decimal::new(-1, 0)).is_ok());
        assert!(policy.check(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_require_non_negative() {
        let policy = CoverageAmountPolicy::RequireNonNegative;
        assert!(policy.check(Decimal::ZERO).is_ok());
        assert!(policy.check(Decimal::new(25000, 2)).is_ok());
        assert!(matches!(
            policy.check(Decimal::new(-1, 2)),
            Err(ClaimError::InvalidCoverageAmount(_))
        ));
    }

    #[test]
    fn test_require_positive() {
        let policy = CoverageAmountPolicy::RequirePositive;
        assert!(policy.check(Decimal::ZERO).is_err());
        assert!(policy.check(Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn test_policy_names() {
        let policy: CoverageAmountPolicy = serde_json::from_str("\"require_positive\"").unwrap();
        assert_eq!(policy, CoverageAmountPolicy::RequirePositive);
    }
}
