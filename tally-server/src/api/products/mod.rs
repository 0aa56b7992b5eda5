//! Product API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    // Specific routes come before the parameterized CRUD routes
    let read_routes = Router::new()
        .route("/inventory/total", get(handler::inventory_total))
        .route("/inventory/category", get(handler::inventory_by_category))
        .route("/inventory/income-stats", get(handler::income_stats))
        .route("/daily-income", get(handler::daily_income))
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            axum::routing::patch(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(admin_routes)
}
