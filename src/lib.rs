//! biztime: REST backend for companies and their invoices.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod slug;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, company_routes, invoice_routes};
pub use service::{CompanyService, InvoiceService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, Datastore, MemoryStore, PgStore};
