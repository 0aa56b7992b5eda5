//! Database Models
//!
//! Document shapes stored in SurrealDB. Field names keep the store's
//! camelCase convention so stored documents and API payloads agree.

pub mod bill;
pub mod daily_income;
pub mod product;
pub mod serde_helpers;

pub use bill::{
    Bill, BillGenerate, BillLineItem, BillLineRequest, BillLineResolved, BillResolved, BillStatus,
    PaymentMethod,
};
pub use daily_income::{DailyIncome, PaymentTotals};
pub use product::{Product, ProductCreate, ProductUpdate};
