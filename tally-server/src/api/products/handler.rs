//! Product API Handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{DailyIncome, PaymentTotals, Product, ProductCreate, ProductUpdate};
use crate::db::repository::{BillRepository, DailyIncomeRepository, ProductRepository};
use crate::stats::{self, IncomeBucket, StatsPeriod};
use crate::utils::money::round2;
use crate::utils::time::parse_date;
use crate::utils::{ApiResponse, AppError, AppResult, created, no_content, ok, ok_with_results};

// =============================================================================
// Product CRUD Handlers
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ProductsData {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductData {
    pub product: Product,
}

/// GET /api/products - list all products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<ProductsData>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await.map_err(AppError::from)?;

    let results = products.len();
    Ok(ok_with_results(ProductsData { products }, results))
}

/// POST /api/products - create a product (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProductData>>)> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await.map_err(AppError::from)?;

    Ok(created(ProductData { product }))
}

/// GET /api/products/{id} - fetch a single product
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ProductData>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Product"))?;

    Ok(ok(ProductData { product }))
}

/// PATCH /api/products/{id} - update a product (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<ProductData>>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await.map_err(AppError::from)?;

    Ok(ok(ProductData { product }))
}

/// DELETE /api/products/{id} - delete a product (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(AppError::from)?;

    Ok(no_content())
}

// =============================================================================
// Inventory Valuation Handlers
// =============================================================================

/// Whole-inventory value summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub total_items: i64,
    pub total_value: f64,
    pub average_item_value: f64,
}

/// GET /api/products/inventory/total - aggregate stock value
pub async fn inventory_total(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<InventorySummary>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await.map_err(AppError::from)?;

    Ok(ok(summarize_inventory(&products)))
}

fn summarize_inventory(products: &[Product]) -> InventorySummary {
    let mut total_items: i64 = 0;
    let mut total_value: f64 = 0.0;
    for product in products {
        total_items += product.current_stock;
        total_value += product.current_stock as f64 * product.cost_price;
    }

    let average_item_value = if total_items > 0 {
        round2(total_value / total_items as f64)
    } else {
        0.0
    };

    InventorySummary {
        total_products: products.len(),
        total_items,
        total_value: round2(total_value),
        average_item_value,
    }
}

/// Per-product detail inside a category summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProduct {
    pub name: String,
    pub stock: i64,
    pub cost_price: f64,
    pub value: f64,
}

/// Per-category stock value summary
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub total_products: usize,
    pub total_items: i64,
    pub total_value: f64,
    pub percentage_of_total: f64,
    pub products: Vec<CategoryProduct>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWiseData {
    pub grand_total: f64,
    pub categories: BTreeMap<String, CategorySummary>,
}

/// GET /api/products/inventory/category - per-category stock value
pub async fn inventory_by_category(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<CategoryWiseData>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_all().await.map_err(AppError::from)?;

    Ok(ok(summarize_categories(&products)))
}

fn summarize_categories(products: &[Product]) -> CategoryWiseData {
    let mut categories: BTreeMap<String, CategorySummary> = BTreeMap::new();

    for product in products {
        let value = product.current_stock as f64 * product.cost_price;
        let category = categories.entry(product.category.clone()).or_default();

        category.total_products += 1;
        category.total_items += product.current_stock;
        category.total_value += value;
        category.products.push(CategoryProduct {
            name: product.name.clone(),
            stock: product.current_stock,
            cost_price: product.cost_price,
            value: round2(value),
        });
    }

    let mut grand_total = 0.0;
    for category in categories.values_mut() {
        category.total_value = round2(category.total_value);
        grand_total += category.total_value;
    }

    if grand_total > 0.0 {
        for category in categories.values_mut() {
            category.percentage_of_total = round2(category.total_value / grand_total * 100.0);
        }
    }

    CategoryWiseData {
        grand_total: round2(grand_total),
        categories,
    }
}

// =============================================================================
// Income Reporting Handlers
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct IncomeStatsQuery {
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IncomeStatsData {
    pub period: &'static str,
    pub stats: Vec<IncomeBucket>,
}

/// GET /api/products/inventory/income-stats?period= - bucketed income report
///
/// Aggregates the bill collection over the period window, then completes
/// the series so every bucket in the window is present.
pub async fn income_stats(
    State(state): State<ServerState>,
    Query(query): Query<IncomeStatsQuery>,
) -> AppResult<Json<ApiResponse<IncomeStatsData>>> {
    let period = StatsPeriod::parse(query.period.as_deref().unwrap_or("daily"));
    let window = stats::period_window(period, Utc::now().date_naive());

    tracing::debug!(
        period = period.as_str(),
        start = window.start_millis,
        end = window.end_millis,
        "Fetching income stats"
    );

    let repo = BillRepository::new(state.db.clone());
    let rows = repo
        .income_buckets(window.start_millis, window.end_millis, window.hourly)
        .await
        .map_err(AppError::from)?;

    let filled = stats::fill_missing_buckets(rows, &window);

    Ok(ok(IncomeStatsData {
        period: period.as_str(),
        stats: filled,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIncomeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One day of the precomputed income ledger
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIncomeEntry {
    pub date: String,
    pub total_income: f64,
    pub bill_count: i64,
    pub payment_breakdown: PaymentTotals,
}

#[derive(Debug, Serialize)]
pub struct DailyIncomeData {
    pub stats: Vec<DailyIncomeEntry>,
}

/// GET /api/products/daily-income?startDate&endDate - income ledger report
///
/// Reads the daily income ledger directly; the sibling income-stats
/// endpoint aggregates bills instead.
pub async fn daily_income(
    State(state): State<ServerState>,
    Query(query): Query<DailyIncomeQuery>,
) -> AppResult<Json<ApiResponse<DailyIncomeData>>> {
    if let Some(date) = query.start_date.as_deref() {
        parse_date(date)?;
    }
    if let Some(date) = query.end_date.as_deref() {
        parse_date(date)?;
    }

    let repo = DailyIncomeRepository::new(state.db.clone());
    let records = repo
        .find_range(query.start_date.as_deref(), query.end_date.as_deref())
        .await
        .map_err(AppError::from)?;

    let stats = records.into_iter().map(ledger_entry).collect();

    Ok(ok(DailyIncomeData { stats }))
}

fn ledger_entry(record: DailyIncome) -> DailyIncomeEntry {
    DailyIncomeEntry {
        date: record.date,
        total_income: record.total_income,
        bill_count: record.bill_count,
        payment_breakdown: record.payment_methods,
    }
}
