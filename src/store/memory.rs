//! In-process backend with the same constraints as the PostgreSQL schema (unique code and name,
//! foreign key with cascade). Used by the test suite and for running without a database.

use crate::error::AppError;
use crate::models::{Company, Invoice, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use crate::service::payment::next_paid_date;
use crate::store::Datastore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        Ok(self.tables.read().await.companies.values().cloned().collect())
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, AppError> {
        Ok(self.tables.read().await.companies.get(code).cloned())
    }

    async fn insert_company(&self, company: &Company) -> Result<Company, AppError> {
        let mut t = self.tables.write().await;
        if t.companies.contains_key(&company.code) {
            return Err(AppError::Conflict(format!("company '{}' already exists", company.code)));
        }
        if t.companies.values().any(|c| c.name == company.name) {
            return Err(AppError::Conflict(format!("company name '{}' is taken", company.name)));
        }
        t.companies.insert(company.code.clone(), company.clone());
        Ok(company.clone())
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Company>, AppError> {
        let mut t = self.tables.write().await;
        if !t.companies.contains_key(code) {
            return Ok(None);
        }
        if t.companies.values().any(|c| c.code != code && c.name == name) {
            return Err(AppError::Conflict(format!("company name '{}' is taken", name)));
        }
        Ok(t.companies.get_mut(code).map(|c| {
            c.name = name.to_string();
            c.description = description.map(String::from);
            c.clone()
        }))
    }

    async fn delete_company(&self, code: &str) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        if t.companies.remove(code).is_none() {
            return Ok(false);
        }
        t.invoices.retain(|_, inv| inv.comp_code != code);
        Ok(true)
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, AppError> {
        let t = self.tables.read().await;
        Ok(t.invoices
            .values()
            .filter(|inv| inv.comp_code == code)
            .map(|inv| inv.id)
            .collect())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .invoices
            .values()
            .map(InvoiceSummary::from)
            .collect())
    }

    async fn get_invoice_detail(&self, id: i32) -> Result<Option<InvoiceDetail>, AppError> {
        let t = self.tables.read().await;
        let Some(inv) = t.invoices.get(&id) else {
            return Ok(None);
        };
        Ok(t.companies
            .get(&inv.comp_code)
            .map(|c| InvoiceDetail::new(inv.clone(), c.clone())))
    }

    async fn insert_invoice(&self, new: &NewInvoice) -> Result<Invoice, AppError> {
        let mut t = self.tables.write().await;
        if !t.companies.contains_key(&new.comp_code) {
            return Err(AppError::not_found(format!(
                "Can't find company with code: {}",
                new.comp_code
            )));
        }
        t.last_invoice_id += 1;
        let invoice = Invoice {
            id: t.last_invoice_id,
            comp_code: new.comp_code.clone(),
            amt: new.amt,
            paid: false,
            add_date: Utc::now(),
            paid_date: None,
        };
        t.invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update_invoice(&self, id: i32, update: &InvoiceUpdate) -> Result<Option<Invoice>, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.invoices.get_mut(&id).map(|inv| {
            inv.paid_date = next_paid_date(inv.paid_date, update.paid, Utc::now());
            inv.amt = update.amt;
            inv.paid = update.paid;
            inv.clone()
        }))
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.tables.write().await.invoices.remove(&id).is_some())
    }
}
