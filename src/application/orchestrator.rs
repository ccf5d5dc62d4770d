use crate::application::writers::RecordWriter;
use crate::domain::id::{HexId, IdGeneratorBox};
use crate::domain::ports::StatementExecutorBox;
use crate::domain::purchase::{PromotionRequest, PurchaseRequest};
use crate::domain::validation;
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// The generated ids of one recorded bundle, under their wire names.
///
/// The two optional members mirror the two conditional records; they are
/// absent (not null placeholders) when the condition did not hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleReceipt {
    #[serde(rename = "primaryPaymentID")]
    pub primary_payment_id: HexId,
    #[serde(rename = "customerLedgerEntryID")]
    pub customer_ledger_entry_id: HexId,
    #[serde(rename = "pursTransactionID")]
    pub purs_transaction_id: HexId,
    #[serde(rename = "primaryFedNowPaymentID", skip_serializing_if = "Option::is_none")]
    pub primary_fed_now_payment_id: Option<HexId>,
    #[serde(rename = "promotionLedgerEntryID", skip_serializing_if = "Option::is_none")]
    pub promotion_ledger_entry_id: Option<HexId>,
}

/// Sequences the writes of one purchase bundle.
///
/// Validation runs first and aborts before any write; after that each write
/// awaits the previous one because later records embed earlier ids. There is
/// no rollback here: a mid-sequence store error leaves the earlier inserts
/// in the caller's still-open transaction scope.
pub struct BundleOrchestrator {
    writer: RecordWriter,
}

impl BundleOrchestrator {
    pub fn new(executor: StatementExecutorBox, ids: IdGeneratorBox) -> Self {
        Self {
            writer: RecordWriter::new(executor, ids),
        }
    }

    /// Records one purchase event as a coherent set of inserts and returns
    /// the ids that correlate them.
    pub async fn execute_bundle(
        &self,
        purchase: &PurchaseRequest,
        promotion: &PromotionRequest,
        scope_token: &str,
    ) -> Result<BundleReceipt> {
        let (purchase, promotion, scope) =
            validation::validate_bundle(purchase, promotion, scope_token)?;

        let payment_id = self.writer.insert_payment(&scope, &purchase).await?;
        debug!(payment_id = %payment_id, "payment written");

        let mut settlement_payment_id = None;
        if let Some((payer_account, payee_account)) = purchase.settlement_accounts() {
            let id = self
                .writer
                .insert_settlement_payment(&scope, &payment_id, payer_account, payee_account)
                .await?;
            debug!(settlement_payment_id = %id, "settlement payment written");
            settlement_payment_id = Some(id);
        }

        let mut ledger_entry_ids = Vec::with_capacity(2);
        let ledger_entry_id = self.writer.insert_ledger_entry(&scope, &purchase).await?;
        debug!(ledger_entry_id = %ledger_entry_id, "ledger entry written");
        ledger_entry_ids.push(ledger_entry_id.clone());

        let mut promotion_ledger_entry_id = None;
        if let Some(promo_amount) = promotion.active_amount() {
            let id = self
                .writer
                .insert_promotion_ledger_entry(&scope, &purchase, promo_amount)
                .await?;
            debug!(promotion_ledger_entry_id = %id, "promotion ledger entry written");
            ledger_entry_ids.push(id.clone());
            promotion_ledger_entry_id = Some(id);
        }

        let transaction_id = self
            .writer
            .insert_transaction_record(&scope, &ledger_entry_ids)
            .await?;
        debug!(transaction_id = %transaction_id, entries = ledger_entry_ids.len(), "transaction record written");

        Ok(BundleReceipt {
            primary_payment_id: payment_id,
            customer_ledger_entry_id: ledger_entry_id,
            purs_transaction_id: transaction_id,
            primary_fed_now_payment_id: settlement_payment_id,
            promotion_ledger_entry_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::id::RandIdGenerator;
    use crate::infrastructure::recording::RecordingExecutor;
    use rust_decimal_macros::dec;

    fn orchestrator(executor: &RecordingExecutor) -> BundleOrchestrator {
        BundleOrchestrator::new(Box::new(executor.clone()), Box::new(RandIdGenerator))
    }

    fn card_purchase() -> PurchaseRequest {
        PurchaseRequest {
            payer_id: "b".repeat(32),
            payee_id: "a".repeat(32),
            developer_id: "c".repeat(32),
            amount: dec!(100),
            interaction_type_id: 1,
            payment_method: 1,
            payer_account_id: None,
            payee_account_id: None,
        }
    }

    #[tokio::test]
    async fn test_receipt_serializes_to_wire_names() {
        let executor = RecordingExecutor::new();
        let receipt = orchestrator(&executor)
            .execute_bundle(&card_purchase(), &PromotionRequest::default(), &"d".repeat(32))
            .await
            .unwrap();

        let json = serde_json::to_value(&receipt).unwrap();
        assert!(json.get("primaryPaymentID").is_some());
        assert!(json.get("customerLedgerEntryID").is_some());
        assert!(json.get("pursTransactionID").is_some());
        // Conditional members are omitted, not null
        assert!(json.get("primaryFedNowPaymentID").is_none());
        assert!(json.get("promotionLedgerEntryID").is_none());
    }

    #[tokio::test]
    async fn test_fresh_ids_on_every_invocation() {
        let executor = RecordingExecutor::new();
        let orchestrator = orchestrator(&executor);
        let scope = "d".repeat(32);

        let first = orchestrator
            .execute_bundle(&card_purchase(), &PromotionRequest::default(), &scope)
            .await
            .unwrap();
        let second = orchestrator
            .execute_bundle(&card_purchase(), &PromotionRequest::default(), &scope)
            .await
            .unwrap();

        assert_ne!(first.primary_payment_id, second.primary_payment_id);
        assert_ne!(first.purs_transaction_id, second.purs_transaction_id);
        assert_eq!(executor.calls().await.len(), 6);
    }
}
