//! Bill workflow integration tests against a real embedded store.
//! Run: cargo test -p tally-server --test bill_workflow

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tempfile::TempDir;

use tally_server::AppError;
use tally_server::billing::BillingService;
use tally_server::db::models::{BillGenerate, BillLineRequest, PaymentMethod, ProductCreate, ProductUpdate};
use tally_server::db::repository::{BillRepository, DailyIncomeRepository, ProductRepository};
use tally_server::utils::time::local_date_string;

async fn test_db() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    (tmp, db)
}

async fn seed_product(db: &Surreal<Db>, name: &str, cost_price: f64, current_stock: i64) -> String {
    let repo = ProductRepository::new(db.clone());
    let product = repo
        .create(ProductCreate {
            name: name.to_string(),
            category: "general".to_string(),
            cost_price,
            current_stock,
            is_active: None,
        })
        .await
        .unwrap();
    product.id.unwrap().to_string()
}

async fn stock_of(db: &Surreal<Db>, id: &str) -> i64 {
    ProductRepository::new(db.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .current_stock
}

fn bill_request(lines: &[(&str, i64)], payment_method: PaymentMethod) -> BillGenerate {
    BillGenerate {
        items: lines
            .iter()
            .map(|(product_id, quantity)| BillLineRequest {
                product_id: product_id.to_string(),
                quantity: *quantity,
            })
            .collect(),
        payment_method,
    }
}

#[tokio::test]
async fn generate_bill_deducts_stock_and_updates_ledger() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Espresso", 5.0, 10).await;

    let service = BillingService::new(db.clone());
    let bill = service
        .generate_bill(bill_request(&[(&product_id, 3)], PaymentMethod::Cash))
        .await
        .unwrap();

    assert_eq!(bill.total_cost, 15.0);
    assert_eq!(bill.items.len(), 1);
    assert_eq!(bill.items[0].quantity, 3);
    assert_eq!(bill.items[0].cost, 15.0);
    assert_eq!(bill.items[0].product.name, "Espresso");
    assert!(bill.bill_number.starts_with("BILL-"));

    assert_eq!(stock_of(&db, &product_id).await, 7);

    let ledger = DailyIncomeRepository::new(db.clone())
        .find_by_date(&local_date_string())
        .await
        .unwrap()
        .expect("ledger record for today");
    assert_eq!(ledger.total_income, 15.0);
    assert_eq!(ledger.bill_count, 1);
    assert_eq!(ledger.payment_methods.cash, 15.0);
    assert_eq!(ledger.payment_methods.card, 0.0);
    assert_eq!(ledger.payment_methods.upi, 0.0);
}

#[tokio::test]
async fn insufficient_stock_leaves_everything_unchanged() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Bagel", 2.5, 2).await;

    let service = BillingService::new(db.clone());
    let err = service
        .generate_bill(bill_request(&[(&product_id, 5)], PaymentMethod::Card))
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientStock {
            requested,
            available,
            ..
        } => {
            assert_eq!(requested, 5);
            assert_eq!(available, 2);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_eq!(stock_of(&db, &product_id).await, 2);

    let bills = BillRepository::new(db.clone())
        .find_all_resolved()
        .await
        .unwrap();
    assert!(bills.is_empty());

    let ledger = DailyIncomeRepository::new(db.clone())
        .find_by_date(&local_date_string())
        .await
        .unwrap();
    assert!(ledger.is_none());
}

#[tokio::test]
async fn unknown_product_aborts_and_restores_earlier_lines() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Croissant", 3.0, 10).await;

    let service = BillingService::new(db.clone());
    let err = service
        .generate_bill(bill_request(
            &[(&product_id, 2), ("product:does_not_exist", 1)],
            PaymentMethod::Cash,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));

    // The first line was deducted, then restored when the second failed
    assert_eq!(stock_of(&db, &product_id).await, 10);

    let bills = BillRepository::new(db.clone())
        .find_all_resolved()
        .await
        .unwrap();
    assert!(bills.is_empty());

    let ledger = DailyIncomeRepository::new(db.clone())
        .find_by_date(&local_date_string())
        .await
        .unwrap();
    assert!(ledger.is_none());
}

#[tokio::test]
async fn line_cost_is_a_snapshot_of_sale_time_price() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Latte", 5.0, 10).await;

    let service = BillingService::new(db.clone());
    let bill = service
        .generate_bill(bill_request(&[(&product_id, 2)], PaymentMethod::Upi))
        .await
        .unwrap();
    let bill_id = bill.id.as_ref().unwrap().to_string();

    // Later price edits must not touch the persisted snapshot
    ProductRepository::new(db.clone())
        .update(
            &product_id,
            ProductUpdate {
                name: None,
                category: None,
                cost_price: Some(9.0),
                current_stock: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

    let reread = BillRepository::new(db.clone())
        .find_by_id_resolved(&bill_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.items[0].cost, 10.0);
    assert_eq!(reread.total_cost, 10.0);
    // The resolved product reflects the edit, the snapshot does not
    assert_eq!(reread.items[0].product.cost_price, 9.0);
}

#[tokio::test]
async fn reading_a_bill_is_idempotent() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Muffin", 4.0, 6).await;

    let service = BillingService::new(db.clone());
    let bill = service
        .generate_bill(bill_request(&[(&product_id, 1)], PaymentMethod::Cash))
        .await
        .unwrap();
    let bill_id = bill.id.as_ref().unwrap().to_string();

    let repo = BillRepository::new(db.clone());
    let first = repo.find_by_id_resolved(&bill_id).await.unwrap().unwrap();
    let second = repo.find_by_id_resolved(&bill_id).await.unwrap().unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn bills_on_the_same_day_accumulate_in_the_ledger() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Sandwich", 5.0, 20).await;

    let service = BillingService::new(db.clone());
    service
        .generate_bill(bill_request(&[(&product_id, 3)], PaymentMethod::Cash))
        .await
        .unwrap();
    service
        .generate_bill(bill_request(&[(&product_id, 2)], PaymentMethod::Card))
        .await
        .unwrap();

    let ledger = DailyIncomeRepository::new(db.clone())
        .find_by_date(&local_date_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ledger.total_income, 25.0);
    assert_eq!(ledger.bill_count, 2);
    assert_eq!(ledger.payment_methods.cash, 15.0);
    assert_eq!(ledger.payment_methods.card, 10.0);

    assert_eq!(stock_of(&db, &product_id).await, 15);
}

#[tokio::test]
async fn stock_never_goes_negative_across_repeated_sales() {
    let (_tmp, db) = test_db().await;
    let product_id = seed_product(&db, "Cookie", 1.5, 5).await;

    let service = BillingService::new(db.clone());
    let mut succeeded = 0;
    let mut refused = 0;

    for _ in 0..7 {
        match service
            .generate_bill(bill_request(&[(&product_id, 1)], PaymentMethod::Cash))
            .await
        {
            Ok(_) => succeeded += 1,
            Err(AppError::InsufficientStock { available, .. }) => {
                assert_eq!(available, 0);
                refused += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(succeeded, 5);
    assert_eq!(refused, 2);
    assert_eq!(stock_of(&db, &product_id).await, 0);
}

#[tokio::test]
async fn bills_list_newest_first_with_resolved_products() {
    let (_tmp, db) = test_db().await;
    let espresso = seed_product(&db, "Espresso", 5.0, 10).await;
    let bagel = seed_product(&db, "Bagel", 2.5, 10).await;

    let service = BillingService::new(db.clone());
    let first = service
        .generate_bill(bill_request(&[(&espresso, 1)], PaymentMethod::Cash))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service
        .generate_bill(bill_request(&[(&bagel, 2)], PaymentMethod::Card))
        .await
        .unwrap();

    let bills = BillRepository::new(db.clone())
        .find_all_resolved()
        .await
        .unwrap();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].bill_number, second.bill_number);
    assert_eq!(bills[1].bill_number, first.bill_number);
    assert_eq!(bills[0].items[0].product.name, "Bagel");
    assert_eq!(bills[1].items[0].product.name, "Espresso");
}

#[tokio::test]
async fn multi_line_bill_sums_costs_in_submitted_order() {
    let (_tmp, db) = test_db().await;
    let espresso = seed_product(&db, "Espresso", 5.0, 10).await;
    let bagel = seed_product(&db, "Bagel", 2.5, 10).await;

    let service = BillingService::new(db.clone());
    let bill = service
        .generate_bill(bill_request(
            &[(&bagel, 2), (&espresso, 1)],
            PaymentMethod::Cash,
        ))
        .await
        .unwrap();

    assert_eq!(bill.items.len(), 2);
    // Line items keep submission order
    assert_eq!(bill.items[0].product.name, "Bagel");
    assert_eq!(bill.items[0].cost, 5.0);
    assert_eq!(bill.items[1].product.name, "Espresso");
    assert_eq!(bill.items[1].cost, 5.0);
    assert_eq!(bill.total_cost, 10.0);

    assert_eq!(stock_of(&db, &bagel).await, 8);
    assert_eq!(stock_of(&db, &espresso).await, 9);
}
