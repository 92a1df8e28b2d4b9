use crate::domain::account::{AccountSummary, Amount};
use crate::domain::ports::{AccountRepositoryRef, LedgerRepositoryRef, RoleRepositoryRef};
use crate::domain::role::RoleKind;
use crate::domain::transaction::{ActivityType, Transaction};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payer's request to move `amount` to a payee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub payer_id: String,
    pub payee_id: String,
    pub amount: Decimal,
}

impl PaymentRequest {
    pub fn new(payer_id: impl Into<String>, payee_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            payer_id: payer_id.into(),
            payee_id: payee_id.into(),
            amount,
        }
    }
}

/// Outcome of an accepted payment.
///
/// `transaction` is the record as stored in the ledger, with its assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payer_id: String,
    pub payee_id: String,
    pub transaction: Transaction,
}

/// An account and every ledger record it originated, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub account: AccountSummary,
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
}

/// Orchestrates payments across the account, role and ledger repositories.
///
/// Owns no state of its own. Each repository call takes and releases that
/// repository's lock, so a payment is not atomic across repositories.
/// Every call to [`PaymentEngine::process_payment`] appends exactly one
/// ledger record, whatever its outcome.
#[derive(Clone)]
pub struct PaymentEngine {
    accounts: AccountRepositoryRef,
    roles: RoleRepositoryRef,
    ledger: LedgerRepositoryRef,
}

impl PaymentEngine {
    /// Creates a new `PaymentEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Source of payer accounts; receives the debited balance.
    /// * `roles` - Role catalogue used to classify the payer.
    /// * `ledger` - Destination of the one record each payment attempt produces.
    pub fn new(
        accounts: AccountRepositoryRef,
        roles: RoleRepositoryRef,
        ledger: LedgerRepositoryRef,
    ) -> Self {
        Self {
            accounts,
            roles,
            ledger,
        }
    }

    /// Debits the payer and records the outcome in the ledger.
    ///
    /// Rejections (non-positive amount, unknown or inactive payer, insufficient
    /// balance, unresolvable roles, failed account update) append a
    /// FAILED_PAYMENT record and return the matching error. Fee-exempt payers
    /// are credited back after the debit.
    ///
    /// # Arguments
    ///
    /// * `request` - Payer id, payee id and the amount to pay.
    pub async fn process_payment(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        let draft = Transaction::draft(&request.payer_id, ActivityType::Payment)
            .with_merchant(&request.payee_id)
            .with_amount(request.amount);

        let amount = match Amount::new(request.amount) {
            Ok(amount) => amount,
            Err(e) => return self.reject(draft, "amount must be positive", e).await,
        };

        let mut payer = match self.accounts.find_by_id(&request.payer_id).await {
            Ok(account) => account,
            Err(e) => return self.reject(draft, "invalid account", e).await,
        };

        if !payer.is_active {
            let err = LedgerError::AccountInactive(payer.id.clone());
            return self.reject(draft, "account is not active", err).await;
        }

        if let Err(e) = payer.debit(amount) {
            return self.reject(draft, "insufficient balance", e).await;
        }

        let kinds = match self.role_kinds(&payer.id).await {
            Ok(kinds) => kinds,
            Err(e) => return self.reject(draft, "role resolution failed", e).await,
        };

        // Fee-exempt payers get the debit back; standard payers keep it.
        // TODO: confirm with product whether merchant payments should move funds at all.
        if kinds.contains(&RoleKind::FeeExempt) {
            payer.credit(amount);
        }

        if let Err(e) = self.accounts.update(payer).await {
            return self.reject(draft, "failed to update account", e).await;
        }

        let mut success = draft;
        success.mark(ActivityType::Payment, "processed successfully");
        let transaction = self.ledger.append(success).await?;

        tracing::info!(
            transaction_id = %transaction.id,
            payer_id = %request.payer_id,
            payee_id = %request.payee_id,
            amount = %request.amount,
            "payment processed"
        );

        Ok(shape_receipt(&request, &kinds, transaction))
    }

    /// Returns the account and every ledger record whose `account_id` is it.
    ///
    /// Fails with `AccountNotFound` when the account does not exist.
    pub async fn transaction_history(&self, account_id: &str) -> Result<HistorySummary> {
        let account = self.accounts.find_by_id(account_id).await?;
        let transactions: Vec<Transaction> = self
            .ledger
            .list_all()
            .await?
            .into_iter()
            .filter(|t| t.account_id == account_id)
            .collect();

        Ok(HistorySummary {
            account: account.into(),
            total_count: transactions.len(),
            transactions,
        })
    }

    async fn role_kinds(&self, account_id: &str) -> Result<Vec<RoleKind>> {
        let links = self.roles.find_roles_for_account(account_id).await?;
        let mut kinds = Vec::with_capacity(links.len());
        for link in links {
            kinds.push(self.roles.find_by_id(&link.role_id).await?.kind);
        }
        Ok(kinds)
    }

    /// Records a failed attempt and returns `err`.
    ///
    /// A failing audit write is logged; the business error stays the result.
    async fn reject<T>(
        &self,
        mut draft: Transaction,
        details: &str,
        err: LedgerError,
    ) -> Result<T> {
        draft.mark(ActivityType::FailedPayment, details);
        tracing::warn!(
            account_id = %draft.account_id,
            reason = details,
            error = %err,
            "payment rejected"
        );
        if let Err(audit) = self.ledger.append(draft).await {
            tracing::error!(error = %audit, "failed to record rejected payment");
        }
        Err(err)
    }
}

/// Echoes the request ids, re-applied per role kind.
fn shape_receipt(
    request: &PaymentRequest,
    kinds: &[RoleKind],
    transaction: Transaction,
) -> PaymentReceipt {
    let mut receipt = PaymentReceipt {
        payer_id: request.payer_id.clone(),
        payee_id: request.payee_id.clone(),
        transaction,
    };
    for kind in kinds {
        match kind {
            RoleKind::FeeExempt => receipt.payee_id = request.payee_id.clone(),
            RoleKind::Standard => receipt.payer_id = request.payer_id.clone(),
            RoleKind::Unclassified => {}
        }
    }
    receipt
}
