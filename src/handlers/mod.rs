//! HTTP handlers for companies and invoices.

pub mod companies;
pub mod invoices;
