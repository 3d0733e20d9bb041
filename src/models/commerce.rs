//! Funding and purchase transaction records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every support is a fixed, non-refundable micro-donation of 500 currency
/// units. The amount is not configurable.
pub const SUPPORT_AMOUNT: u64 = 500;

/// Transaction state shared by fundings and purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransactionStatus::Pending),
            "completed" => Some(TransactionStatus::Completed),
            "cancelled" => Some(TransactionStatus::Cancelled),
            _ => None,
        }
    }
}

/// A supporter's donation toward a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    pub id: String,
    pub project_id: String,
    pub supporter_id: String,
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_id: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// A buyer's one-time payment for a product deliverable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub product_id: String,
    pub buyer_id: String,
    pub amount: u64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for starting a funding (support) flow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginFundingRequest {
    #[serde(default)]
    pub reward_id: Option<String>,
    #[serde(default)]
    pub supporter_id: Option<String>,
}

/// Request body for a one-step purchase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    #[serde(default)]
    pub buyer_id: Option<String>,
}
