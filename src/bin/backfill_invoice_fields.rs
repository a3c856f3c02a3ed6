//! Sets `challan_no`, `challan_date`, `po_no` and `eway_no` on every invoice.
//!
//! Exit status: 0 on success, 1 if the store could not be reached or is not
//! configured, 2 if the update itself failed.

use std::process::ExitCode;

use invoice_backend::migration::{runner::run_cli, BackfillInvoiceFields};

#[tokio::main]
async fn main() -> ExitCode {
    run_cli("backfill-invoice-fields", |config| {
        BackfillInvoiceFields::new(config.invoice_collection.clone())
    })
    .await
}
