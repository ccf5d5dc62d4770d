use crate::domain::id::{HexId, ID_LEN, IdError};
use crate::domain::purchase::{
    Amount, PaymentMethod, PromotionInput, PromotionRequest, PurchaseInput, PurchaseRequest,
    TransactionScope,
};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCode {
    WrongLength,
    NotHex,
    BelowMinimum,
    NotInEnum,
    Empty,
}

impl ViolationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WrongLength => "wrong length",
            Self::NotHex => "not hexadecimal",
            Self::BelowMinimum => "below minimum",
            Self::NotInEnum => "not in enumerated set",
            Self::Empty => "empty",
        }
    }
}

/// One field-level problem: which field, what rule it broke, and a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: String,
    pub code: ViolationCode,
    pub message: String,
}

impl Violation {
    fn new(field: &str, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.code.as_str(), self.message)
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every violation found across all fields of one shape, in field order.
///
/// Validation is total: the whole input is checked before this is raised, so
/// a caller sees all problems at once rather than one per round trip.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid input: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn field_names(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Accumulates violations while building the normalized output alongside.
#[derive(Default)]
struct Collector {
    violations: Vec<Violation>,
}

impl Collector {
    fn id(&mut self, field: &str, value: &str) -> Option<HexId> {
        match HexId::parse(value) {
            Ok(id) => Some(id),
            Err(IdError::WrongLength(got)) => {
                self.violations.push(Violation::new(
                    field,
                    ViolationCode::WrongLength,
                    format!("must be exactly {ID_LEN} characters, got {got}"),
                ));
                None
            }
            Err(IdError::NotHex) => {
                self.violations.push(Violation::new(
                    field,
                    ViolationCode::NotHex,
                    "must contain only lowercase hexadecimal characters",
                ));
                None
            }
        }
    }

    fn optional_id(&mut self, field: &str, value: Option<&str>) -> Option<HexId> {
        value.and_then(|v| self.id(field, v))
    }

    fn amount(&mut self, field: &str, value: rust_decimal::Decimal) -> Option<Amount> {
        match Amount::new(value) {
            Ok(amount) => Some(amount),
            Err(_) => {
                self.violations.push(Violation::new(
                    field,
                    ViolationCode::BelowMinimum,
                    "must not be negative",
                ));
                None
            }
        }
    }

    fn payment_method(&mut self, field: &str, value: u8) -> Option<PaymentMethod> {
        match PaymentMethod::try_from(value) {
            Ok(method) => Some(method),
            Err(err) => {
                self.violations.push(Violation::new(
                    field,
                    ViolationCode::NotInEnum,
                    err.to_string(),
                ));
                None
            }
        }
    }

    fn finish<T>(self, output: Option<T>) -> Result<T, ValidationError> {
        match output {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(ValidationError {
                violations: self.violations,
            }),
        }
    }
}

/// Validates the full bundle input as one shape and normalizes it.
///
/// Runs before any write; on failure nothing has been written and the error
/// names every offending field.
pub fn validate_bundle(
    purchase: &PurchaseRequest,
    promotion: &PromotionRequest,
    scope_token: &str,
) -> Result<(PurchaseInput, PromotionInput, TransactionScope), ValidationError> {
    let mut c = Collector::default();

    let payer_id = c.id("purchase.payerId", &purchase.payer_id);
    let payee_id = c.id("purchase.payeeId", &purchase.payee_id);
    let developer_id = c.id("purchase.developerId", &purchase.developer_id);
    let amount = c.amount("purchase.amount", purchase.amount);
    let payment_method = c.payment_method("purchase.paymentMethod", purchase.payment_method);
    let payer_account_id =
        c.optional_id("purchase.payerAccountId", purchase.payer_account_id.as_deref());
    let payee_account_id =
        c.optional_id("purchase.payeeAccountId", purchase.payee_account_id.as_deref());

    let promo_amount = match promotion.promo_amount {
        Some(value) => c.amount("promotion.promoAmount", value).map(Some),
        None => Some(None),
    };

    let scope = c.id("scope", scope_token).map(TransactionScope::new);

    let normalized = match (
        payer_id,
        payee_id,
        developer_id,
        amount,
        payment_method,
        promo_amount,
        scope,
    ) {
        (
            Some(payer_id),
            Some(payee_id),
            Some(developer_id),
            Some(amount),
            Some(payment_method),
            Some(promo_amount),
            Some(scope),
        ) => Some((
            PurchaseInput {
                payer_id,
                payee_id,
                developer_id,
                amount,
                interaction_type_id: purchase.interaction_type_id,
                payment_method,
                payer_account_id,
                payee_account_id,
            },
            PromotionInput { promo_amount },
            scope,
        )),
        _ => None,
    };

    c.finish(normalized)
}

/// Validates the transaction-record shape: at least one ledger entry id.
pub fn validate_ledger_ids(ledger_ids: &[HexId]) -> Result<(), ValidationError> {
    if ledger_ids.is_empty() {
        return Err(ValidationError {
            violations: vec![Violation::new(
                "ledgerEntryIds",
                ViolationCode::Empty,
                "must reference at least one ledger entry",
            )],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_purchase() -> PurchaseRequest {
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

    #[test]
    fn test_valid_bundle_normalizes() {
        let (purchase, promotion, scope) =
            validate_bundle(&valid_purchase(), &PromotionRequest::default(), &"d".repeat(32))
                .unwrap();

        assert_eq!(purchase.payer_id.as_str(), "b".repeat(32));
        assert_eq!(purchase.payment_method, PaymentMethod::Card);
        assert!(promotion.promo_amount.is_none());
        assert_eq!(scope.token(), "d".repeat(32));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let request = PurchaseRequest {
            payer_id: "invalid".to_string(),
            amount: dec!(-1),
            payment_method: 9,
            ..valid_purchase()
        };
        let promotion = PromotionRequest {
            promo_amount: Some(dec!(-5)),
        };

        let err = validate_bundle(&request, &promotion, "short").unwrap_err();
        assert_eq!(
            err.field_names(),
            vec![
                "purchase.payerId",
                "purchase.amount",
                "purchase.paymentMethod",
                "promotion.promoAmount",
                "scope",
            ]
        );
    }

    #[test]
    fn test_violation_codes() {
        let request = PurchaseRequest {
            payer_id: "z".repeat(32),
            payment_method: 2,
            ..valid_purchase()
        };

        let err = validate_bundle(&request, &PromotionRequest::default(), "short").unwrap_err();
        let codes: Vec<_> = err.violations.iter().map(|v| v.code).collect();
        assert_eq!(
            codes,
            vec![
                ViolationCode::NotHex,
                ViolationCode::NotInEnum,
                ViolationCode::WrongLength,
            ]
        );
    }

    #[test]
    fn test_optional_account_ids_are_checked_when_present() {
        let request = PurchaseRequest {
            payment_method: 0,
            payer_account_id: Some("nope".to_string()),
            payee_account_id: Some("1".repeat(32)),
            ..valid_purchase()
        };

        let err = validate_bundle(&request, &PromotionRequest::default(), &"d".repeat(32))
            .unwrap_err();
        assert_eq!(err.field_names(), vec!["purchase.payerAccountId"]);
    }

    #[test]
    fn test_zero_amounts_are_valid() {
        let request = PurchaseRequest {
            amount: dec!(0),
            ..valid_purchase()
        };
        let promotion = PromotionRequest {
            promo_amount: Some(dec!(0)),
        };

        let (_, promotion, _) =
            validate_bundle(&request, &promotion, &"d".repeat(32)).unwrap();
        assert!(promotion.active_amount().is_none());
    }

    #[test]
    fn test_empty_ledger_id_list_is_rejected() {
        let err = validate_ledger_ids(&[]).unwrap_err();
        assert_eq!(err.violations[0].code, ViolationCode::Empty);

        let id = HexId::parse(&"e".repeat(32)).unwrap();
        assert!(validate_ledger_ids(&[id]).is_ok());
    }
}
