use crate::models::Company;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row shape for GET /invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Invoice with its owning company nested in place of `comp_code`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub company: Company,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl InvoiceDetail {
    pub fn new(invoice: Invoice, company: Company) -> Self {
        Self {
            id: invoice.id,
            company,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
        }
    }
}

impl From<&Invoice> for InvoiceSummary {
    fn from(inv: &Invoice) -> Self {
        Self {
            id: inv.id,
            comp_code: inv.comp_code.clone(),
            amt: inv.amt,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

/// Body for PUT /invoices/:id. An absent `paid` means unpaid.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceUpdate {
    pub amt: f64,
    #[serde(default)]
    pub paid: bool,
}
