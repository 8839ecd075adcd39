//! Models shared by several API resources

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amount in the currency's minor unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// ISO 4217 currency code
    pub currency: String,
    /// Value in minor units, e.g. cents
    pub value: i64,
}

impl Amount {
    /// Create a new amount
    pub fn new(value: i64, currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }

    /// Amount in US cents
    pub fn usd(cents: i64) -> Self {
        Self::new(cents, "USD")
    }

    /// Get the amount in major units (e.g., 12.04 for 1204 with 2 decimals)
    pub fn to_decimal(&self, decimals: u32) -> Decimal {
        Decimal::new(self.value, decimals)
    }
}

/// Fee charged by the facilitator of a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilitatorFee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_decimal: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_decimal: Option<Decimal>,
}

/// Breakdown of the processing fee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoovFeeDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_scheme: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interchange: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moov_processing: Option<Decimal>,
}

/// Account on one side of a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferAccount {
    #[serde(rename = "accountID", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Rail and direction a payment method moves money over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethodType {
    MoovWallet,
    AchDebitFund,
    AchDebitCollect,
    AchCreditStandard,
    AchCreditSameDay,
    RtpCredit,
    CardPayment,
    PushToCard,
    PullFromCard,
    ApplePay,
    /// A type this version of the library does not know about
    #[serde(other)]
    Unknown,
}

/// Wallet held with Moov
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(rename = "walletID", skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

/// Card expiration date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiration {
    /// Two-digit month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Two-digit year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Card linked to an account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "cardID", skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_four_card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<CardExpiration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_country: Option<String>,
}

/// Apple Pay token used as a payment method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<CardExpiration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_last_four: Option<String>,
}

/// Card-rail progress of a transfer or refund
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiated_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
}
