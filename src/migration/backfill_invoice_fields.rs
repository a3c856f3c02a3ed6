use bson::{doc, Bson, Document};
use chrono::NaiveDate;

use crate::migration::Migration;

/// Literal values written into every invoice by [`BackfillInvoiceFields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFieldDefaults {
    pub challan_no: String,
    pub challan_date: Option<NaiveDate>,
    pub po_no: String,
    pub eway_no: String,
}

impl Default for InvoiceFieldDefaults {
    fn default() -> Self {
        InvoiceFieldDefaults {
            challan_no: "NA".to_string(),
            challan_date: None,
            po_no: "NA".to_string(),
            eway_no: "NA".to_string(),
        }
    }
}

/// Sets the challan, purchase-order and e-way fields on every invoice.
///
/// Overwrites unconditionally, so re-running it leaves the same values behind.
#[derive(Debug, Clone)]
pub struct BackfillInvoiceFields {
    collection: String,
    values: InvoiceFieldDefaults,
}

impl BackfillInvoiceFields {
    pub fn new(collection: impl Into<String>) -> Self {
        Self::with_values(collection, InvoiceFieldDefaults::default())
    }

    pub fn with_values(collection: impl Into<String>, values: InvoiceFieldDefaults) -> Self {
        BackfillInvoiceFields { collection: collection.into(), values }
    }

    pub fn values(&self) -> &InvoiceFieldDefaults {
        &self.values
    }
}

impl Migration for BackfillInvoiceFields {
    fn name(&self) -> &str {
        "backfill_invoice_fields"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    fn update(&self) -> Document {
        // Same YYYY-MM-DD string form the Invoice model serializes dates as.
        let challan_date = self
            .values
            .challan_date
            .map(|d| Bson::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Bson::Null);

        doc! {
            "$set": {
                "challan_no": self.values.challan_no.as_str(),
                "challan_date": challan_date,
                "po_no": self.values.po_no.as_str(),
                "eway_no": self.values.eway_no.as_str(),
            }
        }
    }
}
