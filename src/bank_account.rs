//! Bank accounts and micro-deposit verification
//!
//! <https://docs.moov.io/api/sources/bank-accounts/>

use crate::call::{
    accept_json, completed_list_or_error, completed_nil_or_error, completed_object_or_error,
    json_body, path_segment, CallResponse, CallStatus, Endpoint,
};
use crate::client::MoovClient;
use crate::{MoovError, Result};
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

/// Verification state of a bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BankAccountStatus {
    New,
    Verified,
    VerificationFailed,
    Pending,
    Errored,
    #[serde(other)]
    Unknown,
}

/// Owner of a bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolderType {
    Individual,
    Business,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankAccountType {
    Checking,
    Savings,
    #[serde(other)]
    Unknown,
}

/// Bank account linked to a Moov account.
///
/// The same shape is sent when linking an account and returned by the API, so
/// every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[serde(rename = "bankAccountID", skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BankAccountStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_type: Option<HolderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_type: Option<BankAccountType>,
    /// Only sent when linking, never returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_four_account_number: Option<String>,
}

impl BankAccount {
    /// Bank account to link by account and routing number
    pub fn new(
        holder_name: impl Into<String>,
        holder_type: HolderType,
        bank_account_type: BankAccountType,
        account_number: impl Into<String>,
        routing_number: impl Into<String>,
    ) -> Self {
        Self {
            holder_name: Some(holder_name.into()),
            holder_type: Some(holder_type),
            bank_account_type: Some(bank_account_type),
            account_number: Some(account_number.into()),
            routing_number: Some(routing_number.into()),
            ..Default::default()
        }
    }
}

/// ACH-rail progress of a transfer leg
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_number: Option<String>,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub ach_return: Option<AchReturn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<AchCorrection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_entry_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originating_company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_updates: Option<AchStatusUpdates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_hold_period: Option<String>,
}

/// ACH return, e.g. `R01` insufficient funds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchReturn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// ACH notification of change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchCorrection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchStatusUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub originated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct BankAccountPayload<'a> {
    account: &'a BankAccount,
}

#[derive(Debug, Serialize)]
struct MicroDepositAmounts<'a> {
    amounts: &'a [i64],
}

fn bank_accounts_path(account_id: &str) -> String {
    format!("/accounts/{}/bank-accounts", path_segment(account_id))
}

fn bank_account_path(account_id: &str, bank_account_id: &str) -> String {
    format!(
        "{}/{}",
        bank_accounts_path(account_id),
        path_segment(bank_account_id)
    )
}

fn micro_deposits_path(account_id: &str, bank_account_id: &str) -> String {
    format!(
        "{}/micro-deposits",
        bank_account_path(account_id, bank_account_id)
    )
}

impl MoovClient {
    /// Link a bank account to an account
    ///
    /// <https://docs.moov.io/api/sources/bank-accounts/create/>
    pub async fn create_bank_account(
        &self,
        account_id: &str,
        bank_account: &BankAccount,
    ) -> Result<BankAccount> {
        let payload = BankAccountPayload {
            account: bank_account,
        };
        let resp = self
            .call_http(
                Endpoint::new(Method::POST, bank_accounts_path(account_id)),
                vec![accept_json(), json_body(&payload)],
            )
            .await?;

        match resp.status() {
            CallStatus::Completed => completed_object_or_error(&resp),
            CallStatus::StateConflict => Err(MoovError::DuplicateBankAccount),
            _ => Err(resp.error()),
        }
    }

    /// Retrieve one bank account
    ///
    /// <https://docs.moov.io/api/sources/bank-accounts/get/>
    pub async fn get_bank_account(
        &self,
        account_id: &str,
        bank_account_id: &str,
    ) -> Result<BankAccount> {
        let resp = self
            .call_http(
                Endpoint::new(Method::GET, bank_account_path(account_id, bank_account_id)),
                vec![accept_json()],
            )
            .await?;

        completed_object_or_error(&resp)
    }

    /// Unlink a bank account
    ///
    /// <https://docs.moov.io/api/sources/bank-accounts/delete/>
    pub async fn delete_bank_account(&self, account_id: &str, bank_account_id: &str) -> Result<()> {
        let resp = self
            .call_http(
                Endpoint::new(
                    Method::DELETE,
                    bank_account_path(account_id, bank_account_id),
                ),
                Vec::new(),
            )
            .await?;

        completed_nil_or_error(&resp)
    }

    /// List the bank accounts of an account
    ///
    /// <https://docs.moov.io/api/sources/bank-accounts/list/>
    pub async fn list_bank_accounts(&self, account_id: &str) -> Result<Vec<BankAccount>> {
        let resp = self
            .call_http(
                Endpoint::new(Method::GET, bank_accounts_path(account_id)),
                vec![accept_json()],
            )
            .await?;

        completed_list_or_error(&resp)
    }

    /// Send two micro-deposits to verify a bank account
    ///
    /// <https://docs.moov.io/api/sources/bank-accounts/initiate-micro-deposits/>
    pub async fn micro_deposit_initiate(
        &self,
        account_id: &str,
        bank_account_id: &str,
    ) -> Result<()> {
        let resp = self
            .call_http(
                Endpoint::new(
                    Method::POST,
                    micro_deposits_path(account_id, bank_account_id),
                ),
                Vec::new(),
            )
            .await?;

        completed_nil_or_error(&resp)
    }

    /// Confirm the micro-deposit amounts, in cents
    ///
    /// <https://docs.moov.io/api/sources/bank-accounts/complete-micro-deposits/>
    pub async fn micro_deposit_confirm(
        &self,
        account_id: &str,
        bank_account_id: &str,
        amounts: &[i64],
    ) -> Result<()> {
        let payload = MicroDepositAmounts { amounts };
        let resp = self
            .call_http(
                Endpoint::new(
                    Method::PUT,
                    micro_deposits_path(account_id, bank_account_id),
                ),
                vec![accept_json(), json_body(&payload)],
            )
            .await?;

        match resp.status() {
            CallStatus::Completed => Ok(()),
            CallStatus::NotFound => Err(MoovError::NoMicroDeposit),
            CallStatus::StateConflict => Err(MoovError::AmountIncorrect),
            _ => Err(resp.error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_escape_ids() {
        assert_eq!(bank_accounts_path("acc-1"), "/accounts/acc-1/bank-accounts");
        assert_eq!(
            micro_deposits_path("acc-1", "ba/2"),
            "/accounts/acc-1/bank-accounts/ba%2F2/micro-deposits"
        );
    }

    #[test]
    fn test_create_payload_wraps_account() {
        let account = BankAccount::new(
            "Jules Jackson",
            HolderType::Individual,
            BankAccountType::Checking,
            "0004321567000",
            "123456789",
        );
        let payload = BankAccountPayload { account: &account };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "account": {
                    "holderName": "Jules Jackson",
                    "holderType": "individual",
                    "bankAccountType": "checking",
                    "accountNumber": "0004321567000",
                    "routingNumber": "123456789"
                }
            })
        );
    }

    #[test]
    fn test_bank_account_decode() {
        let account: BankAccount = serde_json::from_value(json!({
            "bankAccountID": "ba-1",
            "status": "verificationFailed",
            "holderType": "business",
            "bankAccountType": "loan",
            "lastFourAccountNumber": "7000"
        }))
        .unwrap();

        assert_eq!(account.bank_account_id.as_deref(), Some("ba-1"));
        assert_eq!(account.status, Some(BankAccountStatus::VerificationFailed));
        assert_eq!(account.holder_type, Some(HolderType::Business));
        assert_eq!(account.bank_account_type, Some(BankAccountType::Unknown));
        assert_eq!(account.account_number, None);
    }

    #[test]
    fn test_ach_details_return_field() {
        let details: AchDetails = serde_json::from_value(json!({
            "status": "returned",
            "return": { "code": "R01", "reason": "Insufficient funds" },
            "statusUpdates": { "returned": "2024-03-02T10:00:00Z" }
        }))
        .unwrap();

        assert_eq!(details.ach_return.unwrap().code.as_deref(), Some("R01"));
        assert!(details.status_updates.unwrap().returned.is_some());
    }
}
