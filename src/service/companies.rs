//! Company operations: code derivation, not-found signalling, invoice id lookup.

use crate::error::AppError;
use crate::models::{Company, CompanyInput, CompanyWithInvoices};
use crate::service::RequestValidator;
use crate::slug::slugify;
use crate::store::Datastore;

pub struct CompanyService;

fn missing(code: &str) -> AppError {
    AppError::not_found(format!("Can't find company with code: {}", code))
}

impl CompanyService {
    pub async fn list(store: &dyn Datastore) -> Result<Vec<Company>, AppError> {
        store.list_companies().await
    }

    pub async fn read(store: &dyn Datastore, code: &str) -> Result<Company, AppError> {
        store.get_company(code).await?.ok_or_else(|| missing(code))
    }

    /// Insert a company whose code is the slug of its name.
    pub async fn create(store: &dyn Datastore, body: CompanyInput) -> Result<Company, AppError> {
        RequestValidator::company(&body)?;
        let name = body.name.trim().to_string();
        let company = Company {
            code: slugify(&name),
            name,
            description: body.description,
        };
        let created = store.insert_company(&company).await?;
        tracing::info!(code = %created.code, "company created");
        Ok(created)
    }

    /// Replace name and description. The code never changes.
    pub async fn update(
        store: &dyn Datastore,
        code: &str,
        body: CompanyInput,
    ) -> Result<Company, AppError> {
        RequestValidator::company(&body)?;
        store
            .update_company(code, body.name.trim(), body.description.as_deref())
            .await?
            .ok_or_else(|| missing(code))
    }

    pub async fn delete(store: &dyn Datastore, code: &str) -> Result<(), AppError> {
        if !store.delete_company(code).await? {
            return Err(missing(code));
        }
        tracing::info!(code = %code, "company deleted");
        Ok(())
    }

    pub async fn read_with_invoices(
        store: &dyn Datastore,
        code: &str,
    ) -> Result<CompanyWithInvoices, AppError> {
        let company = Self::read(store, code).await?;
        let invoices = store.invoice_ids_for_company(code).await?;
        Ok(CompanyWithInvoices { company, invoices })
    }
}
