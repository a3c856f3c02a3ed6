use tracing::{info, error, instrument};
use crate::repository::user_repo::UserRepository;
use std::sync::Arc;
use crate::util::password::{PasswordUtilsImpl, PasswordUtils};
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::model::user::{User, UserWithoutPassword};
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserWithoutPassword, ServiceError>;
    async fn get_user(&self, id: ObjectId) -> Result<UserWithoutPassword, ServiceError>;
    async fn list_users(&self, page: u32, limit: u32) -> Result<Vec<UserWithoutPassword>, ServiceError>;
    async fn update_user(&self, id: ObjectId, request: UpdateUserRequest) -> Result<UserWithoutPassword, ServiceError>;
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    fn hash_strong_password(password: &str) -> Result<String, ServiceError> {
        PasswordUtilsImpl::validate_password_strength(password)
            .map_err(|errors| ServiceError::InvalidInput(errors.join("; ")))?;
        PasswordUtilsImpl::hash_password(password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<ObjectId>) -> Result<(), ServiceError> {
        match self.user_repo.find_by_email(email).await? {
            Some(existing) if existing.id != owner => {
                error!("Email already registered: {}", email);
                Err(ServiceError::Conflict(format!("Email already registered: {}", email)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserWithoutPassword, ServiceError> {
        info!("Creating user");
        let password_hash = Self::hash_strong_password(&request.password)?;
        self.ensure_email_free(&request.email, None).await?;

        let user = User {
            id: None,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            role: request.role.unwrap_or_else(|| "user".to_string()),
            created_at: None,
            updated_at: None,
        };
        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("User inserted successfully"),
            Err(e) => error!("Failed to insert user: {e}"),
        }
        Ok(inserted?.into())
    }

    async fn get_user(&self, id: ObjectId) -> Result<UserWithoutPassword, ServiceError> {
        let user = self.user_repo.find_by_id(&id).await?
            .ok_or_else(|| ServiceError::NotFound(format!("User not found for ID: {}", id)))?;
        Ok(user.into())
    }

    async fn list_users(&self, page: u32, limit: u32) -> Result<Vec<UserWithoutPassword>, ServiceError> {
        let users = self.user_repo.list(page, limit).await?;
        Ok(users.into_iter().map(UserWithoutPassword::from).collect())
    }

    #[instrument(skip(self, request), fields(user_id = %id))]
    async fn update_user(&self, id: ObjectId, request: UpdateUserRequest) -> Result<UserWithoutPassword, ServiceError> {
        let mut user = self.user_repo.find_by_id(&id).await?
            .ok_or_else(|| ServiceError::NotFound(format!("User not found for ID: {}", id)))?;

        if let Some(password) = request.password {
            user.password_hash = Self::hash_strong_password(&password)?;
        }
        if let Some(email) = request.email {
            if email != user.email {
                self.ensure_email_free(&email, Some(id)).await?;
                user.email = email;
            }
        }
        if let Some(username) = request.username {
            user.username = username;
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(role) = request.role {
            user.role = role;
        }

        let updated = self.user_repo.update(id, user).await?;
        info!("User updated");
        Ok(updated.into())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_user(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.user_repo.delete(id).await?;
        info!("User deleted");
        Ok(())
    }
}
