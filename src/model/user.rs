use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document. The account-lockout counters that used to live here
/// (`loginAttempts`, `lockUntil`) are gone; `remove_user_lockout` strips them
/// from existing documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String, // e.g., "admin", "user"
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// User as returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithoutPassword {
    pub id: Option<ObjectId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserWithoutPassword {
    fn from(user: User) -> Self {
        UserWithoutPassword {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
