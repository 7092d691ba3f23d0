// Expense Tracker - Core Library
// Exposes the document stores and handlers for the CLI, API server, and tests

pub mod error;
pub mod model;
pub mod ids;
pub mod store;      // Document Store Accessor
pub mod expenses;   // Expense Handler
pub mod groups;     // Group/SubItem Handler
pub mod i18n;
pub mod config;
pub mod logging;

#[cfg(feature = "server")]
pub mod http;

// Re-export commonly used types
pub use error::{Result, StorageFailure, TrackerError};
pub use model::{
    Category, Status,
    Expense, ExpenseFields, ExpenseSummary,
    Group, GroupFields, GroupTotals, SubItem, SubItemFields,
    group_total, group_paid_total, group_unpaid_total,
};
pub use ids::IdScheme;
pub use store::{DocumentStore, Record};
pub use expenses::ExpenseHandler;
pub use groups::GroupHandler;
pub use i18n::{Language, TranslationKey};
pub use config::{LogConfig, StoreConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
