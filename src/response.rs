//! Response envelopes: every body is a single-key object naming the resource.

use crate::models::{Company, InvoiceSummary};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct CompanyList {
    pub companies: Vec<Company>,
}

#[derive(Serialize)]
pub struct CompanyOne<T> {
    pub company: T,
}

#[derive(Serialize)]
pub struct InvoiceList {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Serialize)]
pub struct InvoiceOne<T> {
    pub invoice: T,
}

#[derive(Serialize)]
pub struct Deleted {
    pub status: &'static str,
}

pub fn deleted() -> Json<Deleted> {
    Json(Deleted { status: "deleted" })
}
