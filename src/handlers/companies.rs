//! Company handlers: list, read, create, update, delete, read with invoice ids.

use crate::error::AppError;
use crate::models::{Company, CompanyInput, CompanyWithInvoices};
use crate::response::{deleted, CompanyList, CompanyOne, Deleted};
use crate::service::CompanyService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<CompanyList>, AppError> {
    let companies = CompanyService::list(state.store.as_ref()).await?;
    Ok(Json(CompanyList { companies }))
}

pub async fn read(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CompanyOne<Company>>, AppError> {
    let company = CompanyService::read(state.store.as_ref(), &code).await?;
    Ok(Json(CompanyOne { company }))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyOne<Company>>), AppError> {
    let Json(body) = body?;
    let company = CompanyService::create(state.store.as_ref(), body).await?;
    Ok((StatusCode::CREATED, Json(CompanyOne { company })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: Result<Json<CompanyInput>, JsonRejection>,
) -> Result<Json<CompanyOne<Company>>, AppError> {
    let Json(body) = body?;
    let company = CompanyService::update(state.store.as_ref(), &code, body).await?;
    Ok(Json(CompanyOne { company }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    CompanyService::delete(state.store.as_ref(), &code).await?;
    Ok(deleted())
}

pub async fn read_with_invoices(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CompanyOne<CompanyWithInvoices>>, AppError> {
    let company = CompanyService::read_with_invoices(state.store.as_ref(), &code).await?;
    Ok(Json(CompanyOne { company }))
}
