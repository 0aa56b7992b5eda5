//! Tally Server — inventory and point-of-sale backend
//!
//! # Architecture overview
//!
//! The server tracks products, records sales as bills, decrements stock
//! and aggregates income statistics over time windows:
//!
//! - **Database** (`db`): embedded SurrealDB storage, models and
//!   repositories (stock ledger, bills, daily income ledger)
//! - **Billing** (`billing`): the bill-generation workflow
//! - **Statistics** (`stats`): time-bucketed income aggregation with
//!   zero-filled bucket completion
//! - **Printing** (`printing`): receipt rendering
//! - **Auth** (`auth`): bearer-JWT verification and role checks
//! - **HTTP API** (`api`): RESTful routes and middleware stack
//!
//! # Module structure
//!
//! ```text
//! tally-server/src/
//! ├── core/          # configuration, state, server
//! ├── auth/          # JWT verification, role capability
//! ├── api/           # HTTP routes and handlers
//! ├── billing/       # bill-generation workflow
//! ├── stats/         # income aggregation
//! ├── printing/      # receipt rendering
//! ├── db/            # database layer
//! └── utils/         # errors, logging, time, money
//! ```

pub mod api;
pub mod auth;
pub mod billing;
pub mod core;
pub mod db;
pub mod printing;
pub mod stats;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use billing::BillingService;
pub use core::{Config, Server, ServerState};
pub use printing::ReceiptRenderer;
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - keyed tracing events for auth decisions
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Set up the process environment: dotenv and logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

pub fn print_banner() {
    println!(
        r#"
  ______      ____
 /_  __/___ _/ / /_  __
  / / / __ `/ / / / / /
 / / / /_/ / / / /_/ /
/_/  \__,_/_/_/\__, /
              /____/
    "#
    );
}
