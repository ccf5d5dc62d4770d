use crate::domain::id::{HexId, IdGeneratorBox};
use crate::domain::ports::{ParamSet, SqlValue, StatementExecutorBox};
use crate::domain::purchase::{Amount, PaymentStatus, PurchaseInput, TransactionScope};
use crate::domain::validation;
use crate::error::Result;
use chrono::Utc;

pub const INSERT_PAYMENT_SQL: &str = "INSERT INTO payments \
    (id, payer_id, payee_id, developer_id, amount, interaction_type_id, payment_method, payment_status, date_paid) \
    VALUES (:id, :payer_id, :payee_id, :developer_id, :amount, :interaction_type_id, :payment_method, :payment_status, :date_paid)";

pub const INSERT_SETTLEMENT_PAYMENT_SQL: &str = "INSERT INTO fednow_payments \
    (id, payment_id, payer_account_id, payee_account_id) \
    VALUES (:id, :payment_id, :payer_account_id, :payee_account_id)";

pub const INSERT_LEDGER_ENTRY_SQL: &str = "INSERT INTO ledger_entries \
    (id, payer_id, payee_id, developer_id, amount, interaction_type_id) \
    VALUES (:id, :payer_id, :payee_id, :developer_id, :amount, :interaction_type_id)";

pub const INSERT_TRANSACTION_RECORD_SQL: &str = "INSERT INTO transaction_records \
    (id, ledger_entry_id) \
    VALUES (:id, :ledger_entry_id)";

const DATE_PAID_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Issues the single parameterized insert behind each record type.
///
/// Every operation generates the new record's id, executes exactly one
/// statement (one batch for the transaction record) under the given scope,
/// and hands the id back for correlation. Store failures pass through
/// unchanged.
pub struct RecordWriter {
    executor: StatementExecutorBox,
    ids: IdGeneratorBox,
}

impl RecordWriter {
    pub fn new(executor: StatementExecutorBox, ids: IdGeneratorBox) -> Self {
        Self { executor, ids }
    }

    /// Inserts the payment row with its derived settlement fields.
    ///
    /// A card or zero-amount payment completes at write time and gets the
    /// current timestamp; a funded real-time-settlement payment is written
    /// PENDING with a null `date_paid`.
    pub async fn insert_payment(
        &self,
        scope: &TransactionScope,
        purchase: &PurchaseInput,
    ) -> Result<HexId> {
        let id = self.ids.generate();
        let status = purchase.payment_status();
        let date_paid = match status {
            PaymentStatus::Complete => {
                SqlValue::Text(Utc::now().format(DATE_PAID_FORMAT).to_string())
            }
            PaymentStatus::Pending => SqlValue::Null,
        };

        let params = ParamSet::new()
            .with("id", SqlValue::Text(id.to_string()))
            .with("payer_id", SqlValue::Text(purchase.payer_id.to_string()))
            .with("payee_id", SqlValue::Text(purchase.payee_id.to_string()))
            .with("developer_id", SqlValue::Text(purchase.developer_id.to_string()))
            .with("amount", SqlValue::Decimal(purchase.amount.value()))
            .with("interaction_type_id", SqlValue::Integer(purchase.interaction_type_id))
            .with("payment_method", SqlValue::Integer(purchase.payment_method.code()))
            .with("payment_status", SqlValue::Text(status.as_str().to_string()))
            .with("date_paid", date_paid);

        self.executor
            .execute_statement(scope, INSERT_PAYMENT_SQL, params)
            .await?;
        Ok(id)
    }

    /// Inserts the real-time-settlement sub-payment linked to `payment_id`.
    pub async fn insert_settlement_payment(
        &self,
        scope: &TransactionScope,
        payment_id: &HexId,
        payer_account_id: &HexId,
        payee_account_id: &HexId,
    ) -> Result<HexId> {
        let id = self.ids.generate();
        let params = ParamSet::new()
            .with("id", SqlValue::Text(id.to_string()))
            .with("payment_id", SqlValue::Text(payment_id.to_string()))
            .with("payer_account_id", SqlValue::Text(payer_account_id.to_string()))
            .with("payee_account_id", SqlValue::Text(payee_account_id.to_string()));

        self.executor
            .execute_statement(scope, INSERT_SETTLEMENT_PAYMENT_SQL, params)
            .await?;
        Ok(id)
    }

    /// Inserts the primary ledger entry for the purchase.
    pub async fn insert_ledger_entry(
        &self,
        scope: &TransactionScope,
        purchase: &PurchaseInput,
    ) -> Result<HexId> {
        let id = self.ids.generate();
        let params = ParamSet::new()
            .with("id", SqlValue::Text(id.to_string()))
            .with("payer_id", SqlValue::Text(purchase.payer_id.to_string()))
            .with("payee_id", SqlValue::Text(purchase.payee_id.to_string()))
            .with("developer_id", SqlValue::Text(purchase.developer_id.to_string()))
            .with("amount", SqlValue::Decimal(purchase.amount.value()))
            .with("interaction_type_id", SqlValue::Integer(purchase.interaction_type_id));

        self.executor
            .execute_statement(scope, INSERT_LEDGER_ENTRY_SQL, params)
            .await?;
        Ok(id)
    }

    /// Inserts the promotion ledger entry into the same ledger table. The
    /// developer funds the promotion, so it is written as the payer of this
    /// entry.
    pub async fn insert_promotion_ledger_entry(
        &self,
        scope: &TransactionScope,
        purchase: &PurchaseInput,
        promo_amount: Amount,
    ) -> Result<HexId> {
        let id = self.ids.generate();
        let params = ParamSet::new()
            .with("id", SqlValue::Text(id.to_string()))
            .with("payer_id", SqlValue::Text(purchase.developer_id.to_string()))
            .with("payee_id", SqlValue::Text(purchase.payee_id.to_string()))
            .with("developer_id", SqlValue::Text(purchase.developer_id.to_string()))
            .with("amount", SqlValue::Decimal(promo_amount.value()))
            .with("interaction_type_id", SqlValue::Integer(purchase.interaction_type_id));

        self.executor
            .execute_statement(scope, INSERT_LEDGER_ENTRY_SQL, params)
            .await?;
        Ok(id)
    }

    /// Inserts the transaction record binding the ledger entries together.
    ///
    /// One batch call, one parameter set per ledger entry id, in the order
    /// given. The list must not be empty.
    pub async fn insert_transaction_record(
        &self,
        scope: &TransactionScope,
        ledger_entry_ids: &[HexId],
    ) -> Result<HexId> {
        validation::validate_ledger_ids(ledger_entry_ids)?;

        let id = self.ids.generate();
        let param_sets = ledger_entry_ids
            .iter()
            .map(|ledger_id| {
                ParamSet::new()
                    .with("id", SqlValue::Text(id.to_string()))
                    .with("ledger_entry_id", SqlValue::Text(ledger_id.to_string()))
            })
            .collect();

        self.executor
            .execute_batch(scope, INSERT_TRANSACTION_RECORD_SQL, param_sets)
            .await?;
        Ok(id)
    }
}
