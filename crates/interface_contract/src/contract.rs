//! Claims contract entry points
//!
//! The host dispatches named transactions with string arguments. Each entry
//! point converts its arguments, runs the lifecycle operation, and encodes the
//! result the way the host expects it.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info_span, Instrument};

use core_kernel::{ClaimId, CoreError, OperationMetadata};
use domain_claims::{
    CallerIdentity, ClaimError, ClaimLifecycleService, ClaimStatus, ClaimSubmission, LedgerStore,
    Operation,
};

use crate::config::ContractConfig;
use crate::error::ContractError;

/// Invocation context handed over by the host for one transaction
pub struct TransactionContext {
    identity: Box<dyn CallerIdentity>,
    metadata: OperationMetadata,
}

impl TransactionContext {
    pub fn new(identity: impl CallerIdentity + 'static) -> Self {
        Self {
            identity: Box::new(identity),
            metadata: OperationMetadata::default(),
        }
    }

    /// Attaches the host transaction id, used as correlation id in logs
    pub fn with_transaction_id(mut self, tx_id: impl Into<String>) -> Self {
        self.metadata = OperationMetadata::with_correlation_id(tx_id);
        self
    }

    pub fn identity(&self) -> &dyn CallerIdentity {
        self.identity.as_ref()
    }

    pub fn metadata(&self) -> &OperationMetadata {
        &self.metadata
    }

    fn transaction_id(&self) -> &str {
        self.metadata.correlation_id.as_deref().unwrap_or("-")
    }
}

/// Car accident claims contract
#[derive(Clone)]
pub struct InsuranceContract {
    service: ClaimLifecycleService,
}

impl InsuranceContract {
    /// Builds the contract over `ledger`, validating `config` first
    pub fn new(config: &ContractConfig, ledger: Arc<dyn LedgerStore>) -> Result<Self, CoreError> {
        use validator::Validate;
        config
            .validate()
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        let service = ClaimLifecycleService::new(ledger)
            .with_gate(config.gate())
            .with_coverage_policy(config.coverage_amount);
        Ok(Self { service })
    }

    pub fn service(&self) -> &ClaimLifecycleService {
        &self.service
    }

    /// `fileClaim(claimJson)`; returns the id the claim was stored under
    pub async fn file_claim(&self, ctx: &TransactionContext, claim_json: &str) -> Result<ClaimId, ContractError> {
        let span = info_span!("fileClaim", tx_id = ctx.transaction_id());
        async {
            let submission = match ClaimSubmission::parse(claim_json) {
                Ok(submission) => submission,
                Err(err) => return Err(self.argument_failure(ctx, Operation::FileClaim, err.into())),
            };
            Ok::<_, ContractError>(self.service.file_submission(ctx.identity(), submission).await?)
        }
        .instrument(span)
        .await
    }

    /// `getClaim(id)`; returns the ledger document as JSON
    pub async fn get_claim(&self, ctx: &TransactionContext, id: &str) -> Result<String, ContractError> {
        let span = info_span!("getClaim", tx_id = ctx.transaction_id());
        async {
            let id = ClaimId::new(id);
            let record = self.service.get_claim(ctx.identity(), &id).await?;
            let json = serde_json::to_string(&record).map_err(|e| ClaimError::corrupt(&id, e.to_string()))?;
            debug!(claim_id = %id, bytes = json.len(), "Claim encoded");
            Ok::<_, ContractError>(json)
        }
        .instrument(span)
        .await
    }

    /// `claimExists(id)`
    pub async fn claim_exists(&self, ctx: &TransactionContext, id: &str) -> Result<bool, ContractError> {
        let span = info_span!("claimExists", tx_id = ctx.transaction_id());
        async {
            let id = ClaimId::new(id);
            Ok::<_, ContractError>(self.service.claim_exists(ctx.identity(), &id).await?)
        }
        .instrument(span)
        .await
    }

    /// `claimStatus(id)`
    pub async fn claim_status(&self, ctx: &TransactionContext, id: &str) -> Result<ClaimStatus, ContractError> {
        let span = info_span!("claimStatus", tx_id = ctx.transaction_id());
        async {
            let id = ClaimId::new(id);
            Ok::<_, ContractError>(self.service.claim_status(ctx.identity(), &id).await?)
        }
        .instrument(span)
        .await
    }

    /// `rejectClaim(id)`
    pub async fn reject_claim(&self, ctx: &TransactionContext, id: &str) -> Result<(), ContractError> {
        let span = info_span!("rejectClaim", tx_id = ctx.transaction_id());
        async {
            let id = ClaimId::new(id);
            self.service.reject_claim(ctx.identity(), &id).await?;
            Ok::<_, ContractError>(())
        }
        .instrument(span)
        .await
    }

    /// `establishCoverage(id, amount)`; `amount` is a decimal string
    pub async fn establish_coverage(
        &self,
        ctx: &TransactionContext,
        id: &str,
        amount: &str,
    ) -> Result<(), ContractError> {
        let span = info_span!("establishCoverage", tx_id = ctx.transaction_id());
        async {
            let id = ClaimId::new(id);
            let amount = match parse_amount(amount) {
                Ok(amount) => amount,
                Err(err) => return Err(self.argument_failure(ctx, Operation::EstablishCoverage, err)),
            };
            self.service.establish_coverage(ctx.identity(), &id, amount).await?;
            Ok::<_, ContractError>(())
        }
        .instrument(span)
        .await
    }

    /// `closeClaim(id)`
    pub async fn close_claim(&self, ctx: &TransactionContext, id: &str) -> Result<(), ContractError> {
        let span = info_span!("closeClaim", tx_id = ctx.transaction_id());
        async {
            let id = ClaimId::new(id);
            self.service.close_claim(ctx.identity(), &id).await?;
            Ok::<_, ContractError>(())
        }
        .instrument(span)
        .await
    }

    // Unauthorized callers learn nothing about their arguments.
    fn argument_failure(&self, ctx: &TransactionContext, operation: Operation, err: ContractError) -> ContractError {
        match self.service.gate().authorize(ctx.identity(), operation) {
            Ok(_) => err,
            Err(denied) => denied.into(),
        }
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ContractError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| ContractError::invalid_argument("coverageAmount", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_forms() {
        assert_eq!(parse_amount("250.0").unwrap(), Decimal::new(2500, 1));
        assert_eq!(parse_amount(" 100.50 ").unwrap().to_string(), "100.50");
        assert_eq!(parse_amount("2.5e2").unwrap(), Decimal::new(250, 0));
        assert!(matches!(
            parse_amount("lots"),
            Err(ContractError::InvalidArgument { name: "coverageAmount", .. })
        ));
        assert!(parse_amount("").is_err());
    }
}
