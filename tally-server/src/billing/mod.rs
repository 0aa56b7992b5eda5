//! Bill-generation workflow
//!
//! Orchestrates a sale: per-line stock deduction in submitted order, total
//! computation, bill persistence and the daily income ledger update. Stock
//! mutations and ledger increments are single atomic store statements; if
//! any line fails, every deduction already applied in this request is
//! returned to stock before the error is surfaced.

use rand::Rng;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Bill, BillGenerate, BillLineItem, BillResolved, BillStatus};
use crate::db::repository::{
    BillRepository, DailyIncomeRepository, ProductRepository, parse_record_id,
};
use crate::utils::money::round2;
use crate::utils::time::{local_date_string, now_millis};
use crate::utils::{AppError, AppResult};

const PRODUCT_TABLE: &str = "product";

/// Generate a human-readable bill number
///
/// Format: `BILL-<epoch_ms>-<000-999>`. Uniqueness is best-effort — two
/// bills in the same millisecond can collide on the random suffix.
pub fn generate_bill_number() -> String {
    let timestamp = now_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("BILL-{}-{:03}", timestamp, suffix)
}

/// Bill workflow service
#[derive(Clone)]
pub struct BillingService {
    products: ProductRepository,
    bills: BillRepository,
    income: DailyIncomeRepository,
}

impl BillingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            bills: BillRepository::new(db.clone()),
            income: DailyIncomeRepository::new(db),
        }
    }

    /// Generate a bill from the requested line items
    ///
    /// Steps:
    /// 1. deduct stock per line, in submitted order (atomic per line)
    /// 2. persist the bill with cost snapshots and a fresh bill number
    /// 3. upsert-increment today's income ledger
    /// 4. return the bill with product details resolved
    ///
    /// On a line failure or a persistence failure the already-deducted
    /// lines are restocked before returning.
    pub async fn generate_bill(&self, request: BillGenerate) -> AppResult<BillResolved> {
        if request.items.is_empty() {
            return Err(AppError::validation("A bill requires at least one item"));
        }
        for line in &request.items {
            if line.quantity < 1 {
                return Err(AppError::validation(format!(
                    "Quantity for product {} must be at least 1",
                    line.product_id
                )));
            }
        }

        let mut deducted: Vec<(String, i64)> = Vec::with_capacity(request.items.len());
        let mut items: Vec<BillLineItem> = Vec::with_capacity(request.items.len());
        let mut total_cost = 0.0;

        for line in &request.items {
            match self.products.try_deduct(&line.product_id, line.quantity).await {
                Ok(cost) => {
                    let product = parse_record_id(PRODUCT_TABLE, &line.product_id)
                        .map_err(AppError::from)?;
                    total_cost += cost;
                    items.push(BillLineItem {
                        product,
                        quantity: line.quantity,
                        cost: round2(cost),
                    });
                    deducted.push((line.product_id.clone(), line.quantity));
                }
                Err(err) => {
                    self.restock_all(&deducted).await;
                    return Err(err.into());
                }
            }
        }

        let bill = Bill {
            id: None,
            items,
            total_cost: round2(total_cost),
            bill_number: generate_bill_number(),
            status: BillStatus::default(),
            payment_method: request.payment_method,
            created_at: now_millis(),
        };

        let created = match self.bills.create(bill).await {
            Ok(created) => created,
            Err(err) => {
                self.restock_all(&deducted).await;
                return Err(err.into());
            }
        };

        self.income
            .record_sale(
                &local_date_string(),
                created.total_cost,
                request.payment_method,
            )
            .await
            .map_err(AppError::from)?;

        let id = created
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let resolved = self
            .bills
            .find_by_id_resolved(&id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::database("Created bill could not be read back"))?;

        tracing::info!(
            bill_number = %resolved.bill_number,
            total_cost = resolved.total_cost,
            items = resolved.items.len(),
            payment_method = %request.payment_method,
            "Bill generated"
        );

        Ok(resolved)
    }

    /// Return stock for every already-deducted line (best effort)
    async fn restock_all(&self, deducted: &[(String, i64)]) {
        for (product_id, quantity) in deducted {
            if let Err(e) = self.products.restock(product_id, *quantity).await {
                tracing::error!(
                    product = %product_id,
                    quantity = quantity,
                    error = %e,
                    "Failed to return stock after aborted bill"
                );
            }
        }
    }
}
