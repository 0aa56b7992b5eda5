//! Income aggregation integration tests against a real embedded store.
//! Run: cargo test -p tally-server --test income_stats

use chrono::{Duration, Utc};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tempfile::TempDir;

use tally_server::db::models::{Bill, BillLineItem, BillStatus, PaymentMethod};
use tally_server::db::repository::{BillRepository, DailyIncomeRepository};
use tally_server::stats::{self, StatsPeriod};
use tally_server::utils::time::day_start_millis;

async fn test_db() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    (tmp, db)
}

async fn seed_bill(db: &Surreal<Db>, total_cost: f64, created_at: i64) {
    let repo = BillRepository::new(db.clone());
    repo.create(Bill {
        id: None,
        items: vec![BillLineItem {
            product: RecordId::from_table_key("product", "seeded"),
            quantity: 1,
            cost: total_cost,
        }],
        total_cost,
        bill_number: format!("BILL-{}-000", created_at),
        status: BillStatus::Pending,
        payment_method: PaymentMethod::Cash,
        created_at,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn daily_stats_fill_all_24_hour_buckets() {
    let (_tmp, db) = test_db().await;
    let today = Utc::now().date_naive();
    let start = day_start_millis(today);
    let hour = 3_600_000i64;

    // Two bills at 05:00 UTC, one at 18:00 UTC, one the day before
    seed_bill(&db, 10.0, start + 5 * hour).await;
    seed_bill(&db, 20.0, start + 5 * hour + 60_000).await;
    seed_bill(&db, 40.0, start + 18 * hour).await;
    seed_bill(&db, 99.0, start - 2 * hour).await;

    let window = stats::period_window(StatsPeriod::Daily, today);
    let rows = BillRepository::new(db.clone())
        .income_buckets(window.start_millis, window.end_millis, window.hourly)
        .await
        .unwrap();
    let filled = stats::fill_missing_buckets(rows, &window);

    assert_eq!(filled.len(), 24);
    for (i, bucket) in filled.iter().enumerate() {
        assert_eq!(bucket.label, format!("{:02}:00", i));
    }

    assert_eq!(filled[5].total_income, 30.0);
    assert_eq!(filled[5].total_bills, 2);
    assert_eq!(filled[5].average_ticket_size, 15.0);

    assert_eq!(filled[18].total_income, 40.0);
    assert_eq!(filled[18].total_bills, 1);

    // Yesterday's bill is outside the window; every other bucket is zero
    let nonzero: Vec<_> = filled.iter().filter(|b| b.total_bills > 0).collect();
    assert_eq!(nonzero.len(), 2);
}

#[tokio::test]
async fn weekly_stats_bucket_by_date_and_exclude_older_bills() {
    let (_tmp, db) = test_db().await;
    let today = Utc::now().date_naive();

    seed_bill(&db, 12.5, day_start_millis(today) + 60_000).await;
    seed_bill(&db, 7.5, day_start_millis(today - Duration::days(3)) + 60_000).await;
    // Ten days old: outside the 7-day window
    seed_bill(&db, 50.0, day_start_millis(today - Duration::days(10)) + 60_000).await;

    let window = stats::period_window(StatsPeriod::Weekly, today);
    let rows = BillRepository::new(db.clone())
        .income_buckets(window.start_millis, window.end_millis, window.hourly)
        .await
        .unwrap();
    let filled = stats::fill_missing_buckets(rows, &window);

    assert_eq!(filled.len(), 8);
    assert_eq!(filled[0].label, (today - Duration::days(7)).format("%Y-%m-%d").to_string());
    assert_eq!(filled[7].label, today.format("%Y-%m-%d").to_string());

    let total: f64 = filled.iter().map(|b| b.total_income).sum();
    assert_eq!(total, 20.0);

    let three_days_ago = (today - Duration::days(3)).format("%Y-%m-%d").to_string();
    let bucket = filled.iter().find(|b| b.label == three_days_ago).unwrap();
    assert_eq!(bucket.total_income, 7.5);
    assert_eq!(bucket.total_bills, 1);
}

#[tokio::test]
async fn empty_store_still_yields_complete_series() {
    let (_tmp, db) = test_db().await;
    let today = Utc::now().date_naive();

    let window = stats::period_window(StatsPeriod::Monthly, today);
    let rows = BillRepository::new(db.clone())
        .income_buckets(window.start_millis, window.end_millis, window.hourly)
        .await
        .unwrap();
    let filled = stats::fill_missing_buckets(rows, &window);

    assert_eq!(filled.len(), 31);
    assert!(filled.iter().all(|b| b.total_income == 0.0));
    assert!(filled.iter().all(|b| b.total_bills == 0));
    assert!(filled.iter().all(|b| b.average_ticket_size == 0.0));
}

#[tokio::test]
async fn ledger_upserts_accumulate_per_day() {
    let (_tmp, db) = test_db().await;
    let repo = DailyIncomeRepository::new(db.clone());

    repo.record_sale("2026-08-01", 15.0, PaymentMethod::Cash)
        .await
        .unwrap();
    repo.record_sale("2026-08-01", 10.0, PaymentMethod::Card)
        .await
        .unwrap();
    repo.record_sale("2026-08-02", 5.0, PaymentMethod::Upi)
        .await
        .unwrap();

    let first = repo.find_by_date("2026-08-01").await.unwrap().unwrap();
    assert_eq!(first.total_income, 25.0);
    assert_eq!(first.bill_count, 2);
    assert_eq!(first.payment_methods.cash, 15.0);
    assert_eq!(first.payment_methods.card, 10.0);
    assert_eq!(first.payment_methods.upi, 0.0);

    let second = repo.find_by_date("2026-08-02").await.unwrap().unwrap();
    assert_eq!(second.total_income, 5.0);
    assert_eq!(second.bill_count, 1);
    assert_eq!(second.payment_methods.upi, 5.0);
}

#[tokio::test]
async fn ledger_range_reads_are_inclusive_and_ascending() {
    let (_tmp, db) = test_db().await;
    let repo = DailyIncomeRepository::new(db.clone());

    for (date, amount) in [
        ("2026-08-03", 30.0),
        ("2026-08-01", 10.0),
        ("2026-08-02", 20.0),
        ("2026-08-05", 50.0),
    ] {
        repo.record_sale(date, amount, PaymentMethod::Cash)
            .await
            .unwrap();
    }

    let range = repo
        .find_range(Some("2026-08-01"), Some("2026-08-03"))
        .await
        .unwrap();
    let dates: Vec<&str> = range.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-08-01", "2026-08-02", "2026-08-03"]);

    let all = repo.find_range(None, None).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all.last().unwrap().date, "2026-08-05");
}
