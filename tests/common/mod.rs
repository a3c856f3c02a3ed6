#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::{Request, StatusCode}, Router};
use bson::oid::ObjectId;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use invoice_backend::app::app::build_router;
use invoice_backend::config::QrConfig;
use invoice_backend::model::invoice::Invoice;
use invoice_backend::model::user::User;
use invoice_backend::repository::invoice_repo::InvoiceRepository;
use invoice_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use invoice_backend::repository::user_repo::UserRepository;
use invoice_backend::service::invoice_service::InvoiceServiceImpl;
use invoice_backend::service::user_service::UserServiceImpl;
use invoice_backend::util::qr::QrCodeGenerator;

pub const TEST_BASE_URL: &str = "http://localhost:3000";

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    pub invoices: Mutex<Vec<Invoice>>,
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn create(&self, mut invoice: Invoice) -> RepositoryResult<Invoice> {
        invoice.id.get_or_insert_with(ObjectId::new);
        invoice.created_at = Some(now());
        invoice.updated_at = invoice.created_at.clone();
        self.invoices.lock().unwrap().push(invoice.clone());
        Ok(invoice)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Invoice> {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Invoice not found for ID: {}", id)))
    }

    async fn update(&self, id: ObjectId, mut invoice: Invoice) -> RepositoryResult<Invoice> {
        let mut invoices = self.invoices.lock().unwrap();
        let slot = invoices
            .iter_mut()
            .find(|i| i.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No invoice found to update for ID: {}", id)))?;
        invoice.id = Some(id);
        invoice.created_at = slot.created_at.clone();
        invoice.updated_at = Some(now());
        *slot = invoice.clone();
        Ok(invoice)
    }

    async fn set_qr_code(&self, id: ObjectId, qr_code: &str) -> RepositoryResult<()> {
        let mut invoices = self.invoices.lock().unwrap();
        let slot = invoices
            .iter_mut()
            .find(|i| i.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No invoice found for ID: {}", id)))?;
        slot.qr_code = Some(qr_code.to_string());
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut invoices = self.invoices.lock().unwrap();
        let before = invoices.len();
        invoices.retain(|i| i.id != Some(id));
        if invoices.len() == before {
            return Err(RepositoryError::not_found(format!("No invoice found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn list(&self, page: u32, limit: u32) -> RepositoryResult<Vec<Invoice>> {
        let skip = (page.saturating_sub(1) * limit) as usize;
        Ok(self.invoices.lock().unwrap().iter().skip(skip).take(limit as usize).cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.invoices.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        user.created_at = Some(now());
        user.updated_at = user.created_at.clone();
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No user found to update for ID: {}", id)))?;
        user.id = Some(id);
        user.updated_at = Some(now());
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != Some(id));
        if users.len() == before {
            return Err(RepositoryError::not_found(format!("No user found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn list(&self, page: u32, limit: u32) -> RepositoryResult<Vec<User>> {
        let skip = (page.saturating_sub(1) * limit) as usize;
        Ok(self.users.lock().unwrap().iter().skip(skip).take(limit as usize).cloned().collect())
    }
}

pub struct TestApp {
    pub router: Router,
    pub invoices: Arc<InMemoryInvoiceRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn setup_app() -> TestApp {
    let invoices = Arc::new(InMemoryInvoiceRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());
    let invoice_service = Arc::new(InvoiceServiceImpl::new(
        invoices.clone(),
        QrCodeGenerator::new(QrConfig::new(TEST_BASE_URL)),
    ));
    let user_service = Arc::new(UserServiceImpl::new(users.clone()));
    TestApp {
        router: build_router(invoice_service, user_service),
        invoices,
        users,
    }
}

/// Sends one request and returns the status plus the JSON body (Null when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
