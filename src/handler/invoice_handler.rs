use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::invoice_dto::{CreateInvoiceRequest, PageQuery, UpdateInvoiceRequest};
use crate::service::invoice_service::{InvoiceService, InvoiceServiceImpl};
use crate::util::error::HandlerError;

pub(crate) fn parse_object_id(id: &str, what: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::bad_request(format!("Invalid {} id", what)))
}

pub async fn create_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_invoice_handler] Handler called");
    payload.validate().map_err(HandlerError::validation)?;
    let created = service.create_invoice(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_invoices_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    params.validate().map_err(HandlerError::validation)?;
    let page = service.list_invoices(params.page(), params.limit()).await?;
    Ok(Json(page))
}

pub async fn get_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    let invoice = service.get_invoice(id).await?;
    Ok(Json(invoice))
}

pub async fn update_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    payload.validate().map_err(HandlerError::validation)?;
    let updated = service.update_invoice(id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_invoice_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    service.delete_invoice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn invoice_qr_handler(
    State(service): State<Arc<InvoiceServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "invoice")?;
    let qr = service.invoice_qr(id).await?;
    Ok(Json(qr))
}
