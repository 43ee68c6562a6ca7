//! Storefront — order pricing and persistence service
//!
//! A small storefront core: it lists products, accepts an order against one
//! product plus an optional discount code, computes a priced total, and
//! persists the order for later retrieval and display.
//!
//! # Module structure
//!
//! ```text
//! storefront/src/
//! ├── config.rs      # Environment configuration
//! ├── state.rs       # AppState: pool + schema startup barrier
//! ├── error.rs       # StoreError taxonomy
//! ├── money.rs       # Decimal boundary helpers
//! ├── pricing/       # Pure pricing engine
//! ├── checkout.rs    # Order workflow
//! ├── db/            # Schema manager, catalog, promotions, order ledger
//! └── api/           # HTTP presentation boundary
//! ```

pub mod api;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod money;
pub mod pricing;
pub mod state;
pub mod util;

// Re-export public types
pub use checkout::{Confirmation, OrderDraft};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use pricing::Quote;
pub use state::AppState;
