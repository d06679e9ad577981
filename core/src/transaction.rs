//! The transaction record and its payment-method vocabulary.

use crate::{
    pattern::FraudPattern,
    pools::Location,
    types::{DeviceFingerprint, MerchantId, TransactionId, UserId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currencies assigned to normal transactions. Attack batches are
/// tagged USD throughout, matching the card rails they abuse.
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "NGN", "KES", "GHS", "ZAR"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    DigitalWallet,
    MobileMoney,
    BankTransfer,
}

impl PaymentMethod {
    /// The card/wallet baseline every user carries.
    pub const BASE: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::DigitalWallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::DigitalWallet => "digital_wallet",
            Self::MobileMoney => "mobile_money",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

/// One synthetic payment transaction. Immutable once created.
///
/// `fraud_pattern` is Some exactly when an attack generator produced
/// the record; `risk_score` stays inside that pattern's declared range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub amount: f64,
    pub currency: String,
    pub merchant_id: MerchantId,
    pub merchant_category: String,
    pub timestamp: DateTime<Utc>,
    pub device_fingerprint: DeviceFingerprint,
    pub ip_address: String,
    pub location: Location,
    pub payment_method: PaymentMethod,
    pub is_synthetic: bool,
    pub fraud_pattern: Option<FraudPattern>,
    pub risk_score: Option<f64>,
}

/// Round a monetary amount to cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_rounds_half_away() {
        assert_eq!(round_cents(12.345), 12.35);
        assert_eq!(round_cents(12.344), 12.34);
        assert_eq!(round_cents(1.0), 1.0);
    }

    #[test]
    fn payment_methods_serialize_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::MobileMoney).unwrap();
        assert_eq!(json, "\"mobile_money\"");
        assert_eq!(PaymentMethod::MobileMoney.as_str(), "mobile_money");
    }
}
