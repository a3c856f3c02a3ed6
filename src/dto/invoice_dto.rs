use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::invoice::Invoice;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, max = 64))]
    pub invoice_number: String,

    pub invoice_date: NaiveDate,

    #[validate(length(max = 64))]
    pub challan_no: Option<String>,

    pub challan_date: Option<NaiveDate>,

    #[validate(length(max = 64))]
    pub po_no: Option<String>,

    #[validate(length(max = 64))]
    pub eway_no: Option<String>,
}

/// Fields left out of the request body keep their stored value. The optional
/// fields take an explicit `null` to clear them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    #[validate(length(min = 1, max = 64))]
    pub invoice_number: Option<String>,

    pub invoice_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_with::rust::double_option")]
    #[validate(length(max = 64))]
    pub challan_no: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_with::rust::double_option")]
    pub challan_date: Option<Option<NaiveDate>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_with::rust::double_option")]
    #[validate(length(max = 64))]
    pub po_no: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "serde_with::rust::double_option")]
    #[validate(length(max = 64))]
    pub eway_no: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePage {
    pub items: Vec<Invoice>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceQrResponse {
    pub invoice_id: String,
    pub url: String,
    pub qr_code: String,
}
