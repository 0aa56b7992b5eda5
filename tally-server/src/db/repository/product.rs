//! Product Repository
//!
//! CRUD plus the stock ledger: an atomic decrement-if-sufficient used by
//! the billing workflow, and the compensating restock for its failure path.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let record_id = parse_record_id(PRODUCT_TABLE, id)?;
        let product: Option<Product> = self.base.db().select(record_id).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("Please provide product name".into()));
        }
        if data.category.trim().is_empty() {
            return Err(RepoError::Validation(
                "Please provide product category".into(),
            ));
        }
        if !data.cost_price.is_finite() || data.cost_price < 0.0 {
            return Err(RepoError::Validation(
                "Cost price must be a non-negative number".into(),
            ));
        }
        if data.current_stock < 0 {
            return Err(RepoError::Validation(
                "Current stock must be non-negative".into(),
            ));
        }

        let now = now_millis();
        let product = Product {
            id: None,
            name: data.name,
            category: data.category,
            cost_price: data.cost_price,
            current_stock: data.current_stock,
            is_active: data.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let thing = parse_record_id(PRODUCT_TABLE, id)?;

        if let Some(price) = data.cost_price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(RepoError::Validation(
                "Cost price must be a non-negative number".into(),
            ));
        }
        if let Some(stock) = data.current_stock
            && stock < 0
        {
            return Err(RepoError::Validation(
                "Current stock must be non-negative".into(),
            ));
        }

        // Build dynamic SET clauses with proper type bindings
        let mut set_parts: Vec<&str> = Vec::new();

        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.cost_price.is_some() {
            set_parts.push("costPrice = $costPrice");
        }
        if data.current_stock.is_some() {
            set_parts.push("currentStock = $currentStock");
        }
        if data.is_active.is_some() {
            set_parts.push("isActive = $isActive");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {}", id)));
        }
        set_parts.push("updatedAt = $updatedAt");

        let query_str = format!("UPDATE $thing SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("thing", thing))
            .bind(("updatedAt", now_millis()));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }
        if let Some(v) = data.cost_price {
            query = query.bind(("costPrice", v));
        }
        if let Some(v) = data.current_stock {
            query = query.bind(("currentStock", v));
        }
        if let Some(v) = data.is_active {
            query = query.bind(("isActive", v));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;

        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {}", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(PRODUCT_TABLE, id)?;
        let result: Option<Product> = self.base.db().delete(record_id).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {}", id)));
        }
        Ok(())
    }

    /// Atomically deduct stock if sufficient, returning the cost snapshot
    ///
    /// The decrement and the `currentStock >= quantity` guard execute as a
    /// single statement, so concurrent deductions against the same product
    /// serialize at the store and the stock invariant holds. On success
    /// returns `quantity * costPrice` captured from the same statement.
    pub async fn try_deduct(&self, id: &str, quantity: i64) -> RepoResult<f64> {
        if quantity < 1 {
            return Err(RepoError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let thing = parse_record_id(PRODUCT_TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET currentStock -= $qty, updatedAt = $now \
                 WHERE currentStock >= $qty RETURN AFTER",
            )
            .bind(("thing", thing.clone()))
            .bind(("qty", quantity))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<Product> = result.take(0)?;

        if let Some(product) = updated.into_iter().next() {
            return Ok(product.cost_price * quantity as f64);
        }

        // The guard refused: distinguish a missing product from short stock
        let existing: Option<Product> = self.base.db().select(thing).await?;
        match existing {
            None => Err(RepoError::NotFound(format!("Product with ID {}", id))),
            Some(product) => Err(RepoError::InsufficientStock {
                product: product.name,
                requested: quantity,
                available: product.current_stock,
            }),
        }
    }

    /// Atomically return stock to a product (workflow compensation)
    pub async fn restock(&self, id: &str, quantity: i64) -> RepoResult<()> {
        let thing = parse_record_id(PRODUCT_TABLE, id)?;
        self.base
            .db()
            .query("UPDATE $thing SET currentStock += $qty, updatedAt = $now")
            .bind(("thing", thing))
            .bind(("qty", quantity))
            .bind(("now", now_millis()))
            .await?;
        Ok(())
    }
}
