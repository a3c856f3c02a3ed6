use axum::{Router, routing::{post, get}};
use crate::handler::user_handler::{
    create_user_handler,
    list_users_handler,
    get_user_handler,
    update_user_handler,
    delete_user_handler,
};
use std::sync::Arc;
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/users", post(create_user_handler).get(list_users_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(service)
}
