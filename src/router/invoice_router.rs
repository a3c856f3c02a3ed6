use axum::{Router, routing::{post, get}};
use crate::handler::invoice_handler::{
    create_invoice_handler,
    list_invoices_handler,
    get_invoice_handler,
    update_invoice_handler,
    delete_invoice_handler,
    invoice_qr_handler,
};
use std::sync::Arc;
use crate::service::invoice_service::InvoiceServiceImpl;

pub fn invoice_router(service: Arc<InvoiceServiceImpl>) -> Router {
    Router::new()
        .route("/invoices", post(create_invoice_handler).get(list_invoices_handler))
        .route(
            "/invoices/{id}",
            get(get_invoice_handler)
                .put(update_invoice_handler)
                .delete(delete_invoice_handler),
        )
        .route("/invoices/{id}/qr", get(invoice_qr_handler))
        .with_state(service)
}
