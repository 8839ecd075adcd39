//! Card disputes
//!
//! <https://docs.moov.io/api/money-movement/disputes/>

use crate::call::{
    accept_json, completed_list_or_error, completed_object_or_error, path_segment, query_pairs,
    Endpoint, QueryParams,
};
use crate::client::MoovClient;
use crate::types::Amount;
use crate::Result;
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

const PATH_DISPUTES: &str = "/disputes";

/// Lifecycle state of a dispute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisputeStatus {
    ResponseNeeded,
    Resolved,
    UnderReview,
    Closed,
    Accepted,
    Won,
    Lost,
    #[serde(other)]
    Unknown,
}

impl DisputeStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::ResponseNeeded => "response-needed",
            DisputeStatus::Resolved => "resolved",
            DisputeStatus::UnderReview => "under-review",
            DisputeStatus::Closed => "closed",
            DisputeStatus::Accepted => "accepted",
            DisputeStatus::Won => "won",
            DisputeStatus::Lost => "lost",
            DisputeStatus::Unknown => "unknown",
        }
    }
}

/// Transfer a dispute was raised against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeTransfer {
    #[serde(rename = "transferID")]
    pub transfer_id: String,
}

/// Chargeback raised by a cardholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    #[serde(rename = "disputeID")]
    pub dispute_id: String,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_reason_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_reason_description: Option<String>,
    /// Deadline for submitting evidence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respond_by: Option<DateTime<Utc>>,
    pub status: DisputeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer: Option<DisputeTransfer>,
}

/// Filters for [`MoovClient::list_disputes`]. Zero values are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisputeListFilter {
    pub count: u32,
    pub skip: u32,
    pub respond_start_date_time: Option<DateTime<Utc>>,
    pub respond_end_date_time: Option<DateTime<Utc>>,
    pub status: Option<DisputeStatus>,
    pub merchant_account_id: String,
    pub cardholder_account_id: String,
    pub start_date_time: Option<DateTime<Utc>>,
    pub end_date_time: Option<DateTime<Utc>>,
    /// Sort key, e.g. `createdOn:desc`
    pub order_by: String,
}

impl DisputeListFilter {
    /// Query parameters for this filter
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        QueryParams::default()
            .count("count", self.count)
            .count("skip", self.skip)
            .time("respondStartDateTime", self.respond_start_date_time.as_ref())
            .time("respondEndDateTime", self.respond_end_date_time.as_ref())
            .string(
                "status",
                self.status
                    .filter(|s| *s != DisputeStatus::Unknown)
                    .map(|s| s.as_str())
                    .unwrap_or_default(),
            )
            .string("merchantAccountID", &self.merchant_account_id)
            .string("cardholderAccountID", &self.cardholder_account_id)
            .time("startDateTime", self.start_date_time.as_ref())
            .time("endDateTime", self.end_date_time.as_ref())
            .string("orderBy", &self.order_by)
            .build()
    }
}

impl MoovClient {
    /// List disputes matching `filter`
    ///
    /// <https://docs.moov.io/api/money-movement/disputes/list/>
    pub async fn list_disputes(&self, filter: &DisputeListFilter) -> Result<Vec<Dispute>> {
        let resp = self
            .call_http(
                Endpoint::new(Method::GET, PATH_DISPUTES),
                vec![accept_json(), query_pairs(filter.query_params())],
            )
            .await?;

        completed_list_or_error(&resp)
    }

    /// Retrieve one dispute
    ///
    /// <https://docs.moov.io/api/money-movement/disputes/get/>
    pub async fn get_dispute(&self, dispute_id: &str) -> Result<Dispute> {
        let path = format!("{}/{}", PATH_DISPUTES, path_segment(dispute_id));
        let resp = self
            .call_http(Endpoint::new(Method::GET, path), vec![accept_json()])
            .await?;

        completed_object_or_error(&resp)
    }
}
