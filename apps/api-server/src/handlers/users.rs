//! User registration and listing.

use actix_web::{HttpResponse, web};

use bloglist_core::domain::User;
use bloglist_shared::dto::{RegisterUserRequest, UserResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        blogs: user.blogs,
    }
}

/// POST /api/users
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .users
        .register(req.username, req.name, &req.password)
        .await?;

    Ok(HttpResponse::Created().json(user_response(user)))
}

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(user_response)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}
