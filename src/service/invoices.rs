//! Invoice operations, including the paid transition on update.

use crate::error::AppError;
use crate::models::{Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use crate::service::RequestValidator;
use crate::store::Datastore;

pub struct InvoiceService;

fn missing(id: i32) -> AppError {
    AppError::not_found(format!("Invoice #{} was not found", id))
}

impl InvoiceService {
    pub async fn list(store: &dyn Datastore) -> Result<Vec<InvoiceSummary>, AppError> {
        store.list_invoices().await
    }

    pub async fn read(store: &dyn Datastore, id: i32) -> Result<InvoiceDetail, AppError> {
        store.get_invoice_detail(id).await?.ok_or_else(|| missing(id))
    }

    /// New invoices start unpaid with `add_date` set by the store.
    pub async fn create(store: &dyn Datastore, body: NewInvoice) -> Result<Invoice, AppError> {
        RequestValidator::new_invoice(&body)?;
        let invoice = store.insert_invoice(&body).await?;
        tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
        Ok(invoice)
    }

    /// Set amount and paid flag; `paid_date` follows [`crate::service::payment::next_paid_date`].
    pub async fn update(
        store: &dyn Datastore,
        id: i32,
        body: InvoiceUpdate,
    ) -> Result<Invoice, AppError> {
        RequestValidator::invoice_update(&body)?;
        let invoice = store.update_invoice(id, &body).await?.ok_or_else(|| missing(id))?;
        tracing::info!(id, paid = invoice.paid, "invoice updated");
        Ok(invoice)
    }

    pub async fn delete(store: &dyn Datastore, id: i32) -> Result<(), AppError> {
        if !store.delete_invoice(id).await? {
            return Err(missing(id));
        }
        tracing::info!(id, "invoice deleted");
        Ok(())
    }
}
