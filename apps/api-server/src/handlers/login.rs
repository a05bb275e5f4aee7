//! Login handler.

use actix_web::{HttpResponse, web};

use bloglist_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.users.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(session.expires_in).unwrap_or_default(),
        username: session.user.username,
        name: session.user.name,
    }))
}
