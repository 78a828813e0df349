//! Invoice handlers: list, read (with nested company), create, update, delete.

use crate::error::AppError;
use crate::extractors::InvoiceId;
use crate::models::{Invoice, InvoiceDetail, InvoiceUpdate, NewInvoice};
use crate::response::{deleted, Deleted, InvoiceList, InvoiceOne};
use crate::service::InvoiceService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<InvoiceList>, AppError> {
    let invoices = InvoiceService::list(state.store.as_ref()).await?;
    Ok(Json(InvoiceList { invoices }))
}

pub async fn read(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<InvoiceOne<InvoiceDetail>>, AppError> {
    let invoice = InvoiceService::read(state.store.as_ref(), id).await?;
    Ok(Json(InvoiceOne { invoice }))
}

/// Responds 200 with the stored invoice.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewInvoice>, JsonRejection>,
) -> Result<Json<InvoiceOne<Invoice>>, AppError> {
    let Json(body) = body?;
    let invoice = InvoiceService::create(state.store.as_ref(), body).await?;
    Ok(Json(InvoiceOne { invoice }))
}

pub async fn update(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
    body: Result<Json<InvoiceUpdate>, JsonRejection>,
) -> Result<Json<InvoiceOne<Invoice>>, AppError> {
    let Json(body) = body?;
    let invoice = InvoiceService::update(state.store.as_ref(), id, body).await?;
    Ok(Json(InvoiceOne { invoice }))
}

pub async fn delete(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<Deleted>, AppError> {
    InvoiceService::delete(state.store.as_ref(), id).await?;
    Ok(deleted())
}
