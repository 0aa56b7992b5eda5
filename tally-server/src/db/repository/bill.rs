//! Bill Repository
//!
//! Bill persistence and the bill-collection aggregation queries behind the
//! income statistics report.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Bill, BillResolved};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const BILL_TABLE: &str = "bill";

/// One aggregated time bucket as returned by the store
///
/// Buckets come back sparse: slots without bills are absent and get
/// zero-filled by the stats layer.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeBucketRow {
    pub label: String,
    pub total_income: f64,
    pub total_bills: i64,
    pub average_ticket: f64,
}

#[derive(Clone)]
pub struct BillRepository {
    base: BaseRepository,
}

impl BillRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new bill
    pub async fn create(&self, bill: Bill) -> RepoResult<Bill> {
        let created: Option<Bill> = self.base.db().create(BILL_TABLE).content(bill).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create bill".to_string()))
    }

    /// All bills, newest first, with product details resolved
    pub async fn find_all_resolved(&self) -> RepoResult<Vec<BillResolved>> {
        let bills: Vec<BillResolved> = self
            .base
            .db()
            .query("SELECT * FROM bill ORDER BY createdAt DESC FETCH items.product")
            .await?
            .take(0)?;
        Ok(bills)
    }

    /// Single bill with product details resolved
    pub async fn find_by_id_resolved(&self, id: &str) -> RepoResult<Option<BillResolved>> {
        let record_id = parse_record_id(BILL_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM bill WHERE id = $id FETCH items.product")
            .bind(("id", record_id))
            .await?;
        let bills: Vec<BillResolved> = result.take(0)?;
        Ok(bills.into_iter().next())
    }

    /// Aggregate bills in `[start, end]` millis into time buckets
    ///
    /// Buckets are hour-of-day labels (`HH:00`) when `hourly`, calendar
    /// dates (`YYYY-MM-DD`) otherwise. Income is summed, bills counted and
    /// the ticket size averaged per bucket, all in the store.
    pub async fn income_buckets(
        &self,
        start_millis: i64,
        end_millis: i64,
        hourly: bool,
    ) -> RepoResult<Vec<IncomeBucketRow>> {
        let query = if hourly {
            r#"
                SELECT
                    time::format(time::from::unix(createdAt / 1000), '%H:00') AS label,
                    math::sum(totalCost) AS total_income,
                    count() AS total_bills,
                    math::mean(totalCost) AS average_ticket
                FROM bill
                WHERE createdAt >= $start AND createdAt <= $end
                GROUP BY label
                ORDER BY label
            "#
        } else {
            r#"
                SELECT
                    time::format(time::from::unix(createdAt / 1000), '%Y-%m-%d') AS label,
                    math::sum(totalCost) AS total_income,
                    count() AS total_bills,
                    math::mean(totalCost) AS average_ticket
                FROM bill
                WHERE createdAt >= $start AND createdAt <= $end
                GROUP BY label
                ORDER BY label
            "#
        };

        let rows: Vec<IncomeBucketRow> = self
            .base
            .db()
            .query(query)
            .bind(("start", start_millis))
            .bind(("end", end_millis))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
