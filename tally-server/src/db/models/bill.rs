//! Bill Model
//!
//! A bill is append-only once created: line items, totals and payment
//! method never change. `status` is a placeholder for a future payment
//! state machine and currently stays at its default.

use super::Product;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type BillId = RecordId;

/// Payment methods accepted at the till
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Upi => "upi",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bill lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

/// One product line on a bill
///
/// `product` is a record link used only for lookup — the bill does not own
/// the product. `cost` is a snapshot of `quantity * costPrice` taken at
/// sale time; later price edits never affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineItem {
    pub product: RecordId,
    pub quantity: i64,
    pub cost: f64,
}

/// Bill entity as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<BillId>,
    /// Line items in submitted order
    pub items: Vec<BillLineItem>,
    pub total_cost: f64,
    /// `BILL-<epoch_ms>-<000-999>`; uniqueness is best-effort
    pub bill_number: String,
    #[serde(default)]
    pub status: BillStatus,
    pub payment_method: PaymentMethod,
    pub created_at: i64,
}

/// Bill line with the linked product resolved to its full document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineResolved {
    pub product: Product,
    pub quantity: i64,
    pub cost: f64,
}

/// Bill with product details resolved (API shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResolved {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<BillId>,
    pub items: Vec<BillLineResolved>,
    pub total_cost: f64,
    pub bill_number: String,
    #[serde(default)]
    pub status: BillStatus,
    pub payment_method: PaymentMethod,
    pub created_at: i64,
}

/// One requested line of a bill-generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Generate bill request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillGenerate {
    pub items: Vec<BillLineRequest>,
    pub payment_method: PaymentMethod,
}
