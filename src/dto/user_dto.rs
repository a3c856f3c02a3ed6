use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const ROLES: [&str; 2] = ["admin", "user"];

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if ROLES.contains(&role) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_role"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 32))]
    pub first_name: String,
    #[validate(length(min = 1, max = 32))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 128))]
    pub password: String,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 128))]
    pub password: Option<String>,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}
