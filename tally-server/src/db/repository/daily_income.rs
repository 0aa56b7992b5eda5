//! Daily Income Repository
//!
//! The precomputed income ledger: one record per calendar day, advanced
//! only by a single-statement upsert-increment so that concurrent bills on
//! the same day never lose updates.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DailyIncome, PaymentMethod};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const DAILY_INCOME_TABLE: &str = "daily_income";

#[derive(Clone)]
pub struct DailyIncomeRepository {
    base: BaseRepository,
}

impl DailyIncomeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fold one sale into the ledger record for `date` (YYYY-MM-DD)
    ///
    /// Atomic upsert-increment: the record id is derived from the date, so
    /// the statement creates the day's record on first use and increments
    /// it afterwards — read-modify-write never happens in application code.
    pub async fn record_sale(
        &self,
        date: &str,
        total_cost: f64,
        payment_method: PaymentMethod,
    ) -> RepoResult<DailyIncome> {
        let record = RecordId::from_table_key(DAILY_INCOME_TABLE, date);
        let (cash, card, upi) = match payment_method {
            PaymentMethod::Cash => (total_cost, 0.0, 0.0),
            PaymentMethod::Card => (0.0, total_cost, 0.0),
            PaymentMethod::Upi => (0.0, 0.0, total_cost),
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"
                UPSERT $record SET
                    date = $date,
                    totalIncome += $total,
                    billCount += 1,
                    paymentMethods.cash += $cash,
                    paymentMethods.card += $card,
                    paymentMethods.upi += $upi
                RETURN AFTER
                "#,
            )
            .bind(("record", record))
            .bind(("date", date.to_string()))
            .bind(("total", total_cost))
            .bind(("cash", cash))
            .bind(("card", card))
            .bind(("upi", upi))
            .await?;

        let records: Vec<DailyIncome> = result.take(0)?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to update daily income".to_string()))
    }

    /// Find the ledger record for a date
    pub async fn find_by_date(&self, date: &str) -> RepoResult<Option<DailyIncome>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM daily_income WHERE date = $date LIMIT 1")
            .bind(("date", date.to_string()))
            .await?;
        let records: Vec<DailyIncome> = result.take(0)?;
        Ok(records.into_iter().next())
    }

    /// Ledger records in an inclusive date range, oldest first
    ///
    /// With no range, returns the whole ledger.
    pub async fn find_range(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> RepoResult<Vec<DailyIncome>> {
        let records: Vec<DailyIncome> = match (start_date, end_date) {
            (Some(start), Some(end)) => {
                self.base
                    .db()
                    .query(
                        r#"
                        SELECT * FROM daily_income
                        WHERE date >= $start AND date <= $end
                        ORDER BY date ASC
                        "#,
                    )
                    .bind(("start", start.to_string()))
                    .bind(("end", end.to_string()))
                    .await?
                    .take(0)?
            }
            _ => {
                self.base
                    .db()
                    .query("SELECT * FROM daily_income ORDER BY date ASC")
                    .await?
                    .take(0)?
            }
        };
        Ok(records)
    }
}
