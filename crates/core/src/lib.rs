//! Chorale Core Library
//!
//! Event listing, ticket availability, sales analytics, admin gating and
//! storage for the choir's ticketing site.

pub mod analytics;
pub mod availability;
pub mod config;
pub mod error;
pub mod format;
pub mod invariants;
pub mod models;
pub mod payment;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;

pub use analytics::{partition_by_date, sales_series, SalesPoint, SalesSummary};
pub use availability::{availability, Availability};
pub use config::SiteConfig;
pub use error::{Error, Result};
pub use format::{format_date, format_price};
pub use models::*;
pub use payment::PaymentPrompt;
pub use seed::default_events;
pub use session::{hash_secret, AdminCredential, AdminSession};
pub use storage::{
    load_or_default, save, Database, EntryStore, KeyValueStore, MemoryStore, EVENTS_KEY,
};
pub use store::EventStore;
