use crate::domain::id::HexId;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// A non-negative monetary amount.
///
/// Wraps `rust_decimal::Decimal` so negative values cannot reach a write.
/// Zero is allowed: a zero-amount purchase settles immediately regardless of
/// payment method.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

#[derive(Error, Debug, PartialEq)]
#[error("amount must not be negative")]
pub struct NegativeAmount;

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, NegativeAmount> {
        if value < Decimal::ZERO {
            Err(NegativeAmount)
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = NegativeAmount;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How the payer settles the purchase. Wire values: 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    RealTimeSettlement,
    Card,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown payment method code {0}")]
pub struct UnknownPaymentMethod(pub u8);

impl PaymentMethod {
    pub fn code(&self) -> i64 {
        match self {
            Self::RealTimeSettlement => 0,
            Self::Card => 1,
        }
    }
}

impl TryFrom<u8> for PaymentMethod {
    type Error = UnknownPaymentMethod;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::RealTimeSettlement),
            1 => Ok(Self::Card),
            other => Err(UnknownPaymentMethod(other)),
        }
    }
}

/// Settlement state recorded on the payment row.
///
/// Card and zero-amount payments settle at write time; real-time-settlement
/// payments stay pending until the settlement network confirms them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Complete,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "COMPLETE",
            Self::Pending => "PENDING",
        }
    }
}

/// Token for the caller's already-open store transaction.
///
/// Not owned by this crate; every write of one bundle passes it through to
/// the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionScope(HexId);

impl TransactionScope {
    pub fn new(token: HexId) -> Self {
        Self(token)
    }

    pub fn token(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw purchase parameters as received at the boundary.
///
/// Fields stay loosely typed (plain strings, raw method code) so the
/// validator can report every problem in one pass; `validation::validate_bundle`
/// turns this into a [`PurchaseInput`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PurchaseRequest {
    pub payer_id: String,
    pub payee_id: String,
    pub developer_id: String,
    pub amount: Decimal,
    pub interaction_type_id: i64,
    pub payment_method: u8,
    #[serde(default)]
    pub payer_account_id: Option<String>,
    #[serde(default)]
    pub payee_account_id: Option<String>,
}

/// Raw promotion parameters; absent or non-positive means no promotion.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PromotionRequest {
    #[serde(default)]
    pub promo_amount: Option<Decimal>,
}

/// A validated purchase: everything past this point is well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseInput {
    pub payer_id: HexId,
    pub payee_id: HexId,
    pub developer_id: HexId,
    pub amount: Amount,
    pub interaction_type_id: i64,
    pub payment_method: PaymentMethod,
    pub payer_account_id: Option<HexId>,
    pub payee_account_id: Option<HexId>,
}

impl PurchaseInput {
    /// Derives the settlement state for the payment row. Only a funded
    /// real-time-settlement purchase waits on the network.
    pub fn payment_status(&self) -> PaymentStatus {
        if self.payment_method != PaymentMethod::RealTimeSettlement || self.amount.is_zero() {
            PaymentStatus::Complete
        } else {
            PaymentStatus::Pending
        }
    }

    /// Both bank account ids, but only when the purchase qualifies for a
    /// settlement sub-payment: real-time method, funded, both ids supplied.
    pub fn settlement_accounts(&self) -> Option<(&HexId, &HexId)> {
        if self.payment_method != PaymentMethod::RealTimeSettlement || self.amount.is_zero() {
            return None;
        }
        match (&self.payer_account_id, &self.payee_account_id) {
            (Some(payer), Some(payee)) => Some((payer, payee)),
            _ => None,
        }
    }
}

/// A validated promotion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionInput {
    pub promo_amount: Option<Amount>,
}

impl PromotionInput {
    /// The promo amount when it actually funds a ledger entry (> 0).
    pub fn active_amount(&self) -> Option<Amount> {
        self.promo_amount.filter(|a| !a.is_zero())
    }
}
