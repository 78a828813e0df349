//! Extract a numeric invoice id from the last path parameter.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Invoice id from `/invoices/:id`. Non-integer ids are rejected as 400; integers outside the
/// `SERIAL` range cannot name an invoice and are rejected as 404.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvoiceId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for InvoiceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let wide: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid invoice id: {}", raw)))?;
        i32::try_from(wide)
            .map(InvoiceId)
            .map_err(|_| AppError::not_found(format!("Invoice #{} was not found", wide)))
    }
}
