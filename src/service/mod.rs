//! Business rules between handlers and the datastore.

mod companies;
mod invoices;
pub mod payment;
mod validation;
pub use companies::CompanyService;
pub use invoices::InvoiceService;
pub use validation::RequestValidator;
