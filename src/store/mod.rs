//! Datastore seam: one async trait, a PostgreSQL backend and an in-memory backend.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::models::{Company, Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, PgStore};

/// Row-level operations over companies and invoices. `None` / `false` mean the row did not exist.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_companies(&self) -> Result<Vec<Company>, AppError>;
    async fn get_company(&self, code: &str) -> Result<Option<Company>, AppError>;
    /// Fails with `Conflict` when the code or name is taken.
    async fn insert_company(&self, company: &Company) -> Result<Company, AppError>;
    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Company>, AppError>;
    /// Deleting a company also removes its invoices.
    async fn delete_company(&self, code: &str) -> Result<bool, AppError>;
    /// Ids of the company's invoices, ascending.
    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, AppError>;

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError>;
    async fn get_invoice_detail(&self, id: i32) -> Result<Option<InvoiceDetail>, AppError>;
    /// Fails with `NotFound` when `comp_code` names no company.
    async fn insert_invoice(&self, new: &NewInvoice) -> Result<Invoice, AppError>;
    /// Applies the paid transition atomically with respect to other updates of the same id.
    async fn update_invoice(&self, id: i32, update: &InvoiceUpdate) -> Result<Option<Invoice>, AppError>;
    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError>;
}
