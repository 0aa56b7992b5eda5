//! Daily Income Model
//!
//! One record per calendar day, keyed by the `YYYY-MM-DD` date string so
//! day-uniqueness is structural. Updated only through atomic
//! upsert-increments; never deleted when bills are deleted.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type DailyIncomeId = RecordId;

/// Running totals per payment method
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentTotals {
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub card: f64,
    #[serde(default)]
    pub upi: f64,
}

/// Daily income ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIncome {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<DailyIncomeId>,

    /// Business date (YYYY-MM-DD, server-local day)
    pub date: String,

    #[serde(default)]
    pub total_income: f64,

    #[serde(default)]
    pub bill_count: i64,

    #[serde(default)]
    pub payment_methods: PaymentTotals,
}
