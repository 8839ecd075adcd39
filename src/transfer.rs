//! Transfers, refunds and reversals
//!
//! <https://docs.moov.io/api/money-movement/transfers/>

use crate::bank_account::{AchDetails, BankAccount};
use crate::call::{
    accept_json, completed_list_or_error, completed_object_or_error, json_body,
    new_idempotency_key, path_segment, query, query_pairs, unmarshal_object, wait_for,
    CallResponse, CallStatus, Endpoint, QueryParams, WaitFor,
};
use crate::client::MoovClient;
use crate::dispute::Dispute;
use crate::types::{
    Amount, ApplePay, Card, CardDetails, FacilitatorFee, MoovFeeDetails, PaymentMethodType,
    TransferAccount, Wallet,
};
use crate::{MoovError, Result};
use chrono::{DateTime, Utc};
use http::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PATH_TRANSFERS: &str = "/transfers";
const PATH_TRANSFER_OPTIONS: &str = "/transfer-options";

/// Lifecycle state of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Created,
    Pending,
    Completed,
    Failed,
    Reversed,
    Queued,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl TransferStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Created => "created",
            TransferStatus::Pending => "pending",
            TransferStatus::Completed => "completed",
            TransferStatus::Failed => "failed",
            TransferStatus::Reversed => "reversed",
            TransferStatus::Queued => "queued",
            TransferStatus::Canceled => "canceled",
            TransferStatus::Unknown => "unknown",
        }
    }
}

/// Transfer as returned once it has been fully processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynchronousTransfer {
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    pub created_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilitator_fee: Option<FacilitatorFee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moov_fee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moov_fee_decimal: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moov_fee_details: Option<MoovFeeDetails>,
    #[serde(rename = "groupID", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refunds: Vec<Refund>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disputed_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disputes: Vec<Dispute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
}

/// Handle of a transfer still being processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsynchronousTransfer {
    #[serde(rename = "transferID")]
    pub transfer_id: String,
    pub created_on: DateTime<Utc>,
}

/// Result of [`MoovClient::create_transfer`]
#[derive(Debug, Clone, PartialEq)]
pub enum CreatedTransfer {
    /// The rail answered in time, the full transfer is available
    Synchronous(Box<SynchronousTransfer>),
    /// The transfer was accepted and completes out of band
    Asynchronous(AsynchronousTransfer),
}

impl CreatedTransfer {
    /// The full transfer, if the call completed synchronously
    pub fn synchronous(&self) -> Option<&SynchronousTransfer> {
        match self {
            CreatedTransfer::Synchronous(transfer) => Some(transfer),
            CreatedTransfer::Asynchronous(_) => None,
        }
    }

    /// The async handle, if the call did not complete synchronously
    pub fn asynchronous(&self) -> Option<&AsynchronousTransfer> {
        match self {
            CreatedTransfer::Synchronous(_) => None,
            CreatedTransfer::Asynchronous(transfer) => Some(transfer),
        }
    }

    /// ID of the created transfer
    pub fn transfer_id(&self) -> &str {
        match self {
            CreatedTransfer::Synchronous(transfer) => &transfer.transfer_id,
            CreatedTransfer::Asynchronous(transfer) => &transfer.transfer_id,
        }
    }
}

/// Funding side of a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "paymentMethodID", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<TransferAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Wallet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_pay: Option<ApplePay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach_details: Option<AchDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_details: Option<CardDetails>,
    /// Set when the source is the result of an earlier transfer
    #[serde(rename = "transferID", skip_serializing_if = "Option::is_none")]
    pub transfer_id: Option<String>,
}

impl Source {
    /// Source identified only by its payment method
    pub fn payment_method(payment_method_id: impl Into<String>) -> Self {
        Self {
            payment_method_id: Some(payment_method_id.into()),
            ..Default::default()
        }
    }
}

/// Receiving side of a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(rename = "paymentMethodID", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_type: Option<PaymentMethodType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<TransferAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Wallet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_pay: Option<ApplePay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach_details: Option<AchDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_details: Option<CardDetails>,
}

impl Destination {
    /// Destination identified only by its payment method
    pub fn payment_method(payment_method_id: impl Into<String>) -> Self {
        Self {
            payment_method_id: Some(payment_method_id.into()),
            ..Default::default()
        }
    }
}

/// Request body of [`MoovClient::create_transfer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransfer {
    pub source: Source,
    pub destination: Destination,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilitator_fee: Option<FacilitatorFee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

impl CreateTransfer {
    /// Create a transfer request
    pub fn new(source: Source, destination: Destination, amount: Amount) -> Self {
        Self {
            source,
            destination,
            amount,
            facilitator_fee: None,
            description: None,
            metadata: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the metadata
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the facilitator fee
    pub fn with_facilitator_fee(mut self, fee: FacilitatorFee) -> Self {
        self.facilitator_fee = Some(fee);
        self
    }
}

/// Filters for [`MoovClient::list_transfers`]. Zero values are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferListFilter {
    pub account_ids: Vec<String>,
    pub status: Option<TransferStatus>,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    pub group_id: String,
    pub count: u32,
    pub skip: u32,
    pub refunded: bool,
    pub disputed: bool,
}

impl TransferListFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Only transfers touching these accounts
    pub fn with_account_ids<I, S>(mut self, account_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.account_ids = account_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Only transfers in this state
    pub fn with_status(mut self, status: TransferStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Only transfers created inside this window
    pub fn with_date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date_time = Some(start);
        self.end_date_time = Some(end);
        self
    }

    /// Page size and offset
    pub fn with_page(mut self, count: u32, skip: u32) -> Self {
        self.count = count;
        self.skip = skip;
        self
    }

    /// Query parameters for this filter
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        QueryParams::default()
            .list("accountIDs", &self.account_ids)
            .string(
                "status",
                self.status
                    .filter(|s| *s != TransferStatus::Unknown)
                    .map(|s| s.as_str())
                    .unwrap_or_default(),
            )
            .time("startDateTime", self.start_date_time.as_ref())
            .time("endDateTime", self.end_date_time.as_ref())
            .string("groupID", &self.group_id)
            .count("count", self.count)
            .count("skip", self.skip)
            .flag("refunded", self.refunded)
            .flag("disputed", self.disputed)
            .build()
    }
}

#[derive(Debug, Serialize)]
struct MetadataPayload<'a> {
    metadata: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct AmountPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
}

/// One side of a [`TransferOptionsRequest`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptionsParty {
    #[serde(rename = "paymentMethodID", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    #[serde(rename = "accountID", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl TransferOptionsParty {
    /// Party identified by account
    pub fn account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            payment_method_id: None,
        }
    }

    /// Party identified by payment method
    pub fn payment_method(payment_method_id: impl Into<String>) -> Self {
        Self {
            payment_method_id: Some(payment_method_id.into()),
            account_id: None,
        }
    }
}

/// Request body of [`MoovClient::transfer_options`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptionsRequest {
    pub source: TransferOptionsParty,
    pub destination: TransferOptionsParty,
    pub amount: Amount,
}

/// Payment methods usable between a source and destination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    #[serde(default)]
    pub source_options: Vec<Source>,
    #[serde(default)]
    pub destination_options: Vec<Destination>,
}

/// Lifecycle state of a refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    Created,
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Refund of a card transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(rename = "refundID")]
    pub refund_id: String,
    pub created_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RefundStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_details: Option<CardDetails>,
}

/// Cancellation leg of a reversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    pub status: String,
    pub created_on: DateTime<Utc>,
}

/// Result of [`MoovClient::reverse_transfer`]: either a cancellation or a refund
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanceledTransfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation: Option<Cancellation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<Refund>,
}

fn transfer_path(transfer_id: &str) -> String {
    format!("{}/{}", PATH_TRANSFERS, path_segment(transfer_id))
}

impl MoovClient {
    /// Create a transfer.
    ///
    /// With `is_sync` the API holds the response until the rail answers. The
    /// call is accepted asynchronously when `is_sync` is false or when the
    /// rail times out.
    ///
    /// <https://docs.moov.io/api/money-movement/transfers/create/>
    pub async fn create_transfer(
        &self,
        transfer: &CreateTransfer,
        is_sync: bool,
    ) -> Result<CreatedTransfer> {
        let mut args = vec![accept_json(), json_body(transfer), new_idempotency_key()];
        if is_sync {
            args.push(wait_for(WaitFor::RailResponse));
        }

        let resp = self
            .call_http(Endpoint::new(Method::POST, PATH_TRANSFERS), args)
            .await?;

        match resp.status() {
            CallStatus::Completed => match unmarshal_object::<SynchronousTransfer>(&resp) {
                Ok(transfer) => Ok(CreatedTransfer::Synchronous(Box::new(transfer))),
                // without X-Wait-For the body may be only the handle
                Err(MoovError::Json(_)) => {
                    Ok(CreatedTransfer::Asynchronous(unmarshal_object(&resp)?))
                }
                Err(e) => Err(e),
            },
            CallStatus::Started => Ok(CreatedTransfer::Asynchronous(unmarshal_object(&resp)?)),
            CallStatus::StateConflict => Err(MoovError::IdempotencyKey),
            _ => Err(resp.error()),
        }
    }

    /// List transfers matching `filter`
    ///
    /// <https://docs.moov.io/api/money-movement/transfers/list/>
    pub async fn list_transfers(
        &self,
        filter: &TransferListFilter,
    ) -> Result<Vec<SynchronousTransfer>> {
        let resp = self
            .call_http(
                Endpoint::new(Method::GET, PATH_TRANSFERS),
                vec![accept_json(), query_pairs(filter.query_params())],
            )
            .await?;

        completed_list_or_error(&resp)
    }

    /// Retrieve a transfer. `account_id` scopes the lookup for facilitators.
    ///
    /// <https://docs.moov.io/api/money-movement/transfers/get/>
    pub async fn get_transfer(
        &self,
        transfer_id: &str,
        account_id: Option<&str>,
    ) -> Result<SynchronousTransfer> {
        let mut args = vec![accept_json()];
        if let Some(account_id) = account_id.filter(|id| !id.is_empty()) {
            args.push(query("accountID", account_id));
        }

        let resp = self
            .call_http(Endpoint::new(Method::GET, transfer_path(transfer_id)), args)
            .await?;

        completed_object_or_error(&resp)
    }

    /// Replace the metadata of a transfer
    ///
    /// <https://docs.moov.io/api/money-movement/transfers/update/>
    pub async fn update_transfer_metadata(
        &self,
        transfer_id: &str,
        account_id: Option<&str>,
        metadata: &HashMap<String, String>,
    ) -> Result<SynchronousTransfer> {
        let payload = MetadataPayload { metadata };
        let mut args = vec![accept_json(), json_body(&payload)];
        if let Some(account_id) = account_id.filter(|id| !id.is_empty()) {
            args.push(query("accountID", account_id));
        }

        let resp = self
            .call_http(Endpoint::new(Method::PATCH, transfer_path(transfer_id)), args)
            .await?;

        completed_object_or_error(&resp)
    }

    /// List the payment methods that can move `amount` between two parties
    ///
    /// <https://docs.moov.io/api/money-movement/transfer-options/>
    pub async fn transfer_options(
        &self,
        request: &TransferOptionsRequest,
    ) -> Result<TransferOptions> {
        let resp = self
            .call_http(
                Endpoint::new(Method::POST, PATH_TRANSFER_OPTIONS),
                vec![accept_json(), json_body(request)],
            )
            .await?;

        completed_object_or_error(&resp)
    }

    /// Refund a card transfer. `None` refunds the full amount.
    ///
    /// <https://docs.moov.io/api/money-movement/refunds/create/>
    pub async fn refund_transfer(
        &self,
        transfer_id: &str,
        is_sync: bool,
        amount: Option<i64>,
    ) -> Result<Refund> {
        let payload = AmountPayload { amount };
        let mut args = vec![accept_json(), json_body(&payload), new_idempotency_key()];
        if is_sync {
            args.push(wait_for(WaitFor::RailResponse));
        }

        let path = format!("{}/refunds", transfer_path(transfer_id));
        let resp = self
            .call_http(Endpoint::new(Method::POST, path), args)
            .await?;

        match resp.status() {
            CallStatus::Completed | CallStatus::Started => unmarshal_object(&resp),
            CallStatus::StateConflict => Err(MoovError::IdempotencyKey),
            CallStatus::FailedValidation => Err(MoovError::RequestBody),
            _ => Err(resp.error()),
        }
    }

    /// List the refunds of a transfer
    ///
    /// <https://docs.moov.io/api/money-movement/refunds/list/>
    pub async fn list_refunds(&self, transfer_id: &str) -> Result<Vec<Refund>> {
        let path = format!("{}/refunds", transfer_path(transfer_id));
        let resp = self
            .call_http(Endpoint::new(Method::GET, path), vec![accept_json()])
            .await?;

        completed_list_or_error(&resp)
    }

    /// Retrieve one refund of a transfer
    ///
    /// <https://docs.moov.io/api/money-movement/refunds/get/>
    pub async fn get_refund(&self, transfer_id: &str, refund_id: &str) -> Result<Refund> {
        let path = format!(
            "{}/refunds/{}",
            transfer_path(transfer_id),
            path_segment(refund_id)
        );
        let resp = self
            .call_http(Endpoint::new(Method::GET, path), vec![accept_json()])
            .await?;

        completed_object_or_error(&resp)
    }

    /// Reverse a transfer, cancelling it if possible and refunding otherwise.
    /// `None` reverses the full amount.
    ///
    /// <https://docs.moov.io/api/money-movement/refunds/reverse/>
    pub async fn reverse_transfer(
        &self,
        transfer_id: &str,
        amount: Option<i64>,
    ) -> Result<CanceledTransfer> {
        let payload = AmountPayload { amount };
        let path = format!("{}/reversals", transfer_path(transfer_id));
        let resp = self
            .call_http(
                Endpoint::new(Method::POST, path),
                vec![accept_json(), json_body(&payload), new_idempotency_key()],
            )
            .await?;

        match resp.status() {
            CallStatus::Completed | CallStatus::Started => unmarshal_object(&resp),
            CallStatus::StateConflict => Err(MoovError::IdempotencyKey),
            CallStatus::FailedValidation => Err(MoovError::RequestBody),
            _ => Err(resp.error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_empty_filter_has_no_params() {
        let filter = TransferListFilter::new().with_page(0, 0);
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_filter_params() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap();
        let filter = TransferListFilter::new()
            .with_account_ids(["acc-1", "acc-2"])
            .with_status(TransferStatus::Pending)
            .with_date_range(start, end)
            .with_page(50, 100);

        assert_eq!(
            filter.query_params(),
            vec![
                ("accountIDs", "acc-1,acc-2".to_string()),
                ("status", "pending".to_string()),
                ("startDateTime", "2024-03-01T00:00:00Z".to_string()),
                ("endDateTime", "2024-03-31T23:59:59Z".to_string()),
                ("count", "50".to_string()),
                ("skip", "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_flags() {
        let filter = TransferListFilter {
            group_id: "grp".into(),
            refunded: true,
            disputed: true,
            ..Default::default()
        };

        assert_eq!(
            filter.query_params(),
            vec![
                ("groupID", "grp".to_string()),
                ("refunded", "true".to_string()),
                ("disputed", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_transfer_body() {
        let transfer = CreateTransfer::new(
            Source::payment_method("pm-src"),
            Destination::payment_method("pm-dst"),
            Amount::usd(1204),
        )
        .with_description("rent");

        assert_eq!(
            serde_json::to_value(&transfer).unwrap(),
            json!({
                "source": { "paymentMethodID": "pm-src" },
                "destination": { "paymentMethodID": "pm-dst" },
                "amount": { "currency": "USD", "value": 1204 },
                "description": "rent"
            })
        );
    }

    #[test]
    fn test_amount_payload_omits_full_refund() {
        assert_eq!(
            serde_json::to_value(AmountPayload { amount: None }).unwrap(),
            json!({})
        );
        assert_eq!(
            serde_json::to_value(AmountPayload { amount: Some(50) }).unwrap(),
            json!({ "amount": 50 })
        );
    }

    #[test]
    fn test_synchronous_transfer_decode() {
        let transfer: SynchronousTransfer = serde_json::from_value(json!({
            "transferID": "tr-1",
            "createdOn": "2024-03-01T12:00:00Z",
            "status": "completed",
            "amount": { "currency": "USD", "value": 1204 },
            "moovFee": 8,
            "moovFeeDecimal": "8.25",
            "source": {
                "paymentMethodID": "pm-src",
                "paymentMethodType": "ach-debit-fund",
                "achDetails": { "status": "completed", "traceNumber": "123" }
            },
            "destination": {
                "paymentMethodID": "pm-dst",
                "paymentMethodType": "moov-wallet",
                "wallet": { "walletID": "w-1" }
            }
        }))
        .unwrap();

        assert_eq!(transfer.transfer_id, "tr-1");
        assert_eq!(transfer.status, Some(TransferStatus::Completed));
        assert!(transfer.refunds.is_empty());
        let source = transfer.source.unwrap();
        assert_eq!(source.payment_method_type, Some(PaymentMethodType::AchDebitFund));
        assert_eq!(
            source.ach_details.unwrap().trace_number.as_deref(),
            Some("123")
        );
        assert_eq!(
            transfer.destination.unwrap().wallet.unwrap().wallet_id.as_deref(),
            Some("w-1")
        );
    }

    #[test]
    fn test_created_transfer_accessors() {
        let created = CreatedTransfer::Asynchronous(AsynchronousTransfer {
            transfer_id: "tr-9".into(),
            created_on: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        });
        assert!(created.synchronous().is_none());
        assert_eq!(created.asynchronous().unwrap().transfer_id, "tr-9");
        assert_eq!(created.transfer_id(), "tr-9");
    }

    #[test]
    fn test_filter_skips_unknown_status() {
        let filter = TransferListFilter::new().with_status(TransferStatus::Unknown);
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_synchronous_transfer_json_round_trip() {
        let transfer: SynchronousTransfer = serde_json::from_value(json!({
            "transferID": "tr-1",
            "createdOn": "2024-03-01T12:00:00Z",
            "completedOn": "2024-03-01T12:00:03Z",
            "status": "reversed",
            "failureReason": "rail-timeout",
            "amount": { "currency": "USD", "value": 1204 },
            "description": "invoice 42",
            "metadata": { "order": "42" },
            "facilitatorFee": { "total": 12, "totalDecimal": "12.000000001", "markup": 1, "markupDecimal": "0.5" },
            "moovFee": 8,
            "moovFeeDecimal": "8.25",
            "moovFeeDetails": { "cardScheme": "1.5", "interchange": "5.25", "moovProcessing": "1.5" },
            "groupID": "grp-1",
            "refundedAmount": { "currency": "USD", "value": 100 },
            "refunds": [{
                "refundID": "rf-1",
                "createdOn": "2024-03-02T09:00:00Z",
                "updatedOn": "2024-03-02T09:05:00Z",
                "status": "completed",
                "amount": { "currency": "USD", "value": 100 },
                "cardDetails": { "status": "settled", "settledOn": "2024-03-03T00:00:00Z" }
            }],
            "disputedAmount": { "currency": "USD", "value": 1104 },
            "disputes": [{
                "disputeID": "dp-1",
                "amount": { "currency": "USD", "value": 1104 },
                "createdOn": "2024-03-04T00:00:00Z",
                "networkReasonCode": "10.4",
                "status": "under-review",
                "transfer": { "transferID": "tr-1" }
            }],
            "source": {
                "paymentMethodID": "pm-src",
                "paymentMethodType": "ach-debit-fund",
                "account": { "accountID": "acc-1", "email": "jules@example.com", "displayName": "Jules" },
                "bankAccount": { "bankAccountID": "ba-1", "status": "verified", "holderType": "individual", "bankAccountType": "checking", "lastFourAccountNumber": "7000" },
                "achDetails": {
                    "status": "returned",
                    "traceNumber": "123",
                    "return": { "code": "R01", "reason": "Insufficient funds" },
                    "correction": { "code": "C01" },
                    "statusUpdates": { "initiated": "2024-03-01T12:00:00Z", "returned": "2024-03-02T10:00:00Z" },
                    "debitHoldPeriod": "2-days"
                },
                "transferID": "tr-0"
            },
            "destination": {
                "paymentMethodID": "pm-dst",
                "paymentMethodType": "push-to-card",
                "card": {
                    "cardID": "card-1",
                    "brand": "Visa",
                    "lastFourCardNumber": "4242",
                    "expiration": { "month": "01", "year": "28" }
                },
                "cardDetails": { "status": "initiated", "initiatedOn": "2024-03-01T12:00:01Z" }
            }
        }))
        .unwrap();

        let encoded = serde_json::to_string(&transfer).unwrap();
        let decoded: SynchronousTransfer = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, transfer);
        assert_eq!(decoded.disputes[0].status, crate::dispute::DisputeStatus::UnderReview);
        assert_eq!(
            decoded.source.unwrap().ach_details.unwrap().ach_return.unwrap().code.as_deref(),
            Some("R01")
        );
    }
}
