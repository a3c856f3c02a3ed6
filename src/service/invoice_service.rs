use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::dto::invoice_dto::{
    CreateInvoiceRequest, InvoicePage, InvoiceQrResponse, UpdateInvoiceRequest,
};
use crate::model::invoice::Invoice;
use crate::repository::invoice_repo::InvoiceRepository;
use crate::util::error::ServiceError;
use crate::util::qr::QrCodeGenerator;

#[async_trait]
pub trait InvoiceService: Send + Sync {
    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, ServiceError>;
    async fn get_invoice(&self, id: ObjectId) -> Result<Invoice, ServiceError>;
    async fn update_invoice(&self, id: ObjectId, request: UpdateInvoiceRequest) -> Result<Invoice, ServiceError>;
    async fn delete_invoice(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn list_invoices(&self, page: u32, limit: u32) -> Result<InvoicePage, ServiceError>;
    async fn invoice_qr(&self, id: ObjectId) -> Result<InvoiceQrResponse, ServiceError>;
}

pub struct InvoiceServiceImpl {
    pub invoice_repo: Arc<dyn InvoiceRepository>,
    pub qr_generator: QrCodeGenerator,
}

impl InvoiceServiceImpl {
    pub fn new(invoice_repo: Arc<dyn InvoiceRepository>, qr_generator: QrCodeGenerator) -> Self {
        Self { invoice_repo, qr_generator }
    }
}

fn required_text(field: &str, value: String) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl InvoiceService for InvoiceServiceImpl {
    #[instrument(skip(self, request), fields(invoice_number = %request.invoice_number))]
    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, ServiceError> {
        info!("Creating invoice");
        let id = ObjectId::new();
        let qr_code = self.qr_generator.generate(&id.to_hex())?;

        let invoice = Invoice {
            id: Some(id),
            invoice_number: required_text("invoice_number", request.invoice_number)?,
            invoice_date: request.invoice_date,
            challan_no: request.challan_no,
            challan_date: request.challan_date,
            po_no: request.po_no,
            eway_no: request.eway_no,
            qr_code: Some(qr_code),
            created_at: None,
            updated_at: None,
        };

        let created = self.invoice_repo.create(invoice).await;
        match &created {
            Ok(_) => info!(invoice_id = %id, "Invoice created"),
            Err(e) => error!("Failed to create invoice: {e}"),
        }
        Ok(created?)
    }

    async fn get_invoice(&self, id: ObjectId) -> Result<Invoice, ServiceError> {
        Ok(self.invoice_repo.get_by_id(id).await?)
    }

    #[instrument(skip(self, request), fields(invoice_id = %id))]
    async fn update_invoice(&self, id: ObjectId, request: UpdateInvoiceRequest) -> Result<Invoice, ServiceError> {
        let mut invoice = self.invoice_repo.get_by_id(id).await?;

        if let Some(number) = request.invoice_number {
            invoice.invoice_number = required_text("invoice_number", number)?;
        }
        if let Some(date) = request.invoice_date {
            invoice.invoice_date = date;
        }
        if let Some(challan_no) = request.challan_no {
            invoice.challan_no = challan_no;
        }
        if let Some(challan_date) = request.challan_date {
            invoice.challan_date = challan_date;
        }
        if let Some(po_no) = request.po_no {
            invoice.po_no = po_no;
        }
        if let Some(eway_no) = request.eway_no {
            invoice.eway_no = eway_no;
        }

        let updated = self.invoice_repo.update(id, invoice).await?;
        info!("Invoice updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn delete_invoice(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.invoice_repo.delete(id).await?;
        info!("Invoice deleted");
        Ok(())
    }

    async fn list_invoices(&self, page: u32, limit: u32) -> Result<InvoicePage, ServiceError> {
        let items = self.invoice_repo.list(page, limit).await?;
        let total = self.invoice_repo.count().await?;
        Ok(InvoicePage { items, page, limit, total })
    }

    /// Regenerates the QR code from the current base URL and stores it if it changed.
    #[instrument(skip(self), fields(invoice_id = %id))]
    async fn invoice_qr(&self, id: ObjectId) -> Result<InvoiceQrResponse, ServiceError> {
        let invoice = self.invoice_repo.get_by_id(id).await?;
        let invoice_id = id.to_hex();
        let qr_code = self.qr_generator.generate(&invoice_id)?;

        if invoice.qr_code.as_deref() != Some(qr_code.as_str()) {
            info!("Stored QR code is stale, replacing it");
            self.invoice_repo.set_qr_code(id, &qr_code).await?;
        }

        Ok(InvoiceQrResponse {
            url: self.qr_generator.invoice_url(&invoice_id),
            invoice_id,
            qr_code,
        })
    }
}
