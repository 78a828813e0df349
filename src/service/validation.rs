//! Request body validation.

use crate::error::AppError;
use crate::models::{CompanyInput, InvoiceUpdate, NewInvoice};

pub const NAME_MAX_LENGTH: usize = 255;

pub struct RequestValidator;

impl RequestValidator {
    /// Name must be present, at most 255 characters, and must yield a non-empty code.
    pub fn company(body: &CompanyInput) -> Result<(), AppError> {
        let name = body.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }
        if crate::slug::slugify(name).is_empty() {
            return Err(AppError::Validation(
                "name must contain at least one letter or digit".into(),
            ));
        }
        Ok(())
    }

    pub fn new_invoice(body: &NewInvoice) -> Result<(), AppError> {
        if body.comp_code.trim().is_empty() {
            return Err(AppError::Validation("comp_code is required".into()));
        }
        validate_amount(body.amt)
    }

    pub fn invoice_update(body: &InvoiceUpdate) -> Result<(), AppError> {
        validate_amount(body.amt)
    }
}

fn validate_amount(amt: f64) -> Result<(), AppError> {
    if !amt.is_finite() || amt <= 0.0 {
        return Err(AppError::Validation("amt must be a positive number".into()));
    }
    Ok(())
}
