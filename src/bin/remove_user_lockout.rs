//! Removes `loginAttempts` and `lockUntil` from every user document.
//!
//! Exit status: 0 on success, 1 if the store could not be reached or is not
//! configured, 2 if the update itself failed.

use std::process::ExitCode;

use invoice_backend::migration::{runner::run_cli, RemoveUserLockoutFields};

#[tokio::main]
async fn main() -> ExitCode {
    run_cli("remove-user-lockout", |_| RemoveUserLockoutFields).await
}
