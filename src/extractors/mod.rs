pub mod invoice_id;

pub use invoice_id::InvoiceId;
