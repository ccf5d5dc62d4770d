#![allow(dead_code)]

use purs_bundler::application::orchestrator::BundleOrchestrator;
use purs_bundler::domain::ports::StatementExecutor;
use purs_bundler::domain::purchase::{PromotionRequest, PurchaseRequest};
use purs_bundler::infrastructure::id::RandIdGenerator;
use rust_decimal_macros::dec;

pub fn scope() -> String {
    "d".repeat(32)
}

pub fn card_purchase() -> PurchaseRequest {
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

pub fn rts_purchase() -> PurchaseRequest {
    PurchaseRequest {
        payment_method: 0,
        payer_account_id: Some("1".repeat(32)),
        payee_account_id: Some("2".repeat(32)),
        ..card_purchase()
    }
}

pub fn promotion(amount: rust_decimal::Decimal) -> PromotionRequest {
    PromotionRequest {
        promo_amount: Some(amount),
    }
}

pub fn orchestrator<E>(executor: E) -> BundleOrchestrator
where
    E: StatementExecutor + 'static,
{
    BundleOrchestrator::new(Box::new(executor), Box::new(RandIdGenerator))
}
