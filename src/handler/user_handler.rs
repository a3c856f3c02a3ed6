use axum::{extract::{State, Path, Query, Json}, response::IntoResponse, http::StatusCode};
use crate::dto::invoice_dto::PageQuery;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::handler::invoice_handler::parse_object_id;
use crate::service::user_service::{UserServiceImpl, UserService};
use crate::util::error::HandlerError;
use std::sync::Arc;
use validator::Validate;

pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload.validate().map_err(HandlerError::validation)?;
    let user = service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    params.validate().map_err(HandlerError::validation)?;
    let users = service.list_users(params.page(), params.limit()).await?;
    Ok(Json(users))
}

pub async fn get_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    payload.validate().map_err(HandlerError::validation)?;
    let user = service.update_user(id, payload).await?;
    Ok(Json(user))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "user")?;
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
