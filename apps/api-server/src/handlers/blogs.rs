//! Blog collection handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use bloglist_core::domain::{BlogChanges, BlogView, NewBlog};
use bloglist_shared::dto::{BlogResponse, CreateBlogRequest, OwnerResponse, UpdateBlogRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn blog_response(view: BlogView) -> BlogResponse {
    let BlogView { blog, owner } = view;
    BlogResponse {
        id: blog.id,
        title: blog.title,
        author: blog.author,
        url: blog.url,
        likes: blog.likes,
        user: owner.map(|o| OwnerResponse {
            id: o.id,
            username: o.username,
            name: o.name,
        }),
    }
}

/// GET /api/blogs
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs: Vec<BlogResponse> = state
        .blogs
        .list()
        .await?
        .into_iter()
        .map(blog_response)
        .collect();

    Ok(HttpResponse::Ok().json(blogs))
}

/// POST /api/blogs - requires a bearer token
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = NewBlog::parse(req.title, req.author, req.url, req.likes)?;

    tracing::debug!(username = %identity.username, "Creating blog");
    let view = state.blogs.create(identity.user_id, input).await?;

    Ok(HttpResponse::Created().json(blog_response(view)))
}

/// PUT /api/blogs/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = BlogChanges::parse(req.title, req.author, req.url, req.likes)?;

    let view = state
        .blogs
        .update(identity.user_id(), path.into_inner(), changes)
        .await?;

    Ok(HttpResponse::Ok().json(blog_response(view)))
}

/// DELETE /api/blogs/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .blogs
        .delete(identity.user_id(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
