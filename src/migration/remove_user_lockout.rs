use bson::{doc, Document};

use crate::config::mongo_conf::USER_COLLECTION;
use crate::migration::Migration;

/// Drops the retired account-lockout counters from every user.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveUserLockoutFields;

impl Migration for RemoveUserLockoutFields {
    fn name(&self) -> &str {
        "remove_user_lockout"
    }

    fn collection(&self) -> &str {
        USER_COLLECTION
    }

    fn update(&self) -> Document {
        doc! { "$unset": { "loginAttempts": "", "lockUntil": "" } }
    }
}
