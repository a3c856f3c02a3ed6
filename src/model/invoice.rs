use bson::oid::ObjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Invoice document as persisted in the invoice collection.
///
/// `invoice_number` and `invoice_date` are set at creation. The challan,
/// purchase-order and e-way fields arrived later and may be missing on older
/// documents until the backfill migration has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub challan_no: Option<String>,
    #[serde(default)]
    pub challan_date: Option<NaiveDate>,
    #[serde(default)]
    pub po_no: Option<String>,
    #[serde(default)]
    pub eway_no: Option<String>,
    /// data:image/png;base64 payload linking to the invoice viewer
    #[serde(default)]
    pub qr_code: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Invoice {
    pub fn new(invoice_number: impl Into<String>, invoice_date: NaiveDate) -> Self {
        Invoice {
            id: None,
            invoice_number: invoice_number.into(),
            invoice_date,
            challan_no: None,
            challan_date: None,
            po_no: None,
            eway_no: None,
            qr_code: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Hex form of the id, used in viewer links
    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_backfill_fields_deserialize_as_none() {
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "invoice_number": "INV-001",
            "invoice_date": "2024-04-01",
            "created_at": "2024-04-01T10:00:00+05:30",
            "updated_at": "2024-04-01T10:00:00+05:30",
        };
        let invoice: Invoice = bson::from_document(doc).unwrap();
        assert_eq!(invoice.invoice_number, "INV-001");
        assert_eq!(invoice.invoice_date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert!(invoice.challan_no.is_none());
        assert!(invoice.challan_date.is_none());
        assert!(invoice.qr_code.is_none());
    }

    #[test]
    fn test_new_invoice_has_no_id() {
        let invoice = Invoice::new("INV-002", NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert!(invoice.id_hex().is_none());
        let doc = bson::to_document(&invoice).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("invoice_date").unwrap(), "2024-05-02");
    }
}
