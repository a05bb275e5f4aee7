//! Test harness: the full route table over an in-memory store.

use std::sync::Arc;

use actix_web::test::TestRequest;
use serde_json::Value;
use uuid::Uuid;

use bloglist_core::domain::{Blog, NewBlog, User};
use bloglist_core::ports::{BlogRepository, TokenService, UserRepository};
use bloglist_core::services::OwnershipPolicy;
use bloglist_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::state::AppState;

const INITIAL_BLOGS: [(&str, &str, &str, u32); 2] = [
    ("Ensimmäinen testiblogi", "Ekan kirjoittaja", "www.eka.fi", 40),
    ("Toinen testiblogi", "Toisen kirjoittaja", "www.toinen.com", 16),
];

/// Build a test service from a [`Harness`].
macro_rules! init_app {
    ($h:expr) => {{
        let state = $h.state.clone();
        let tokens = $h.tokens.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::from_fn(
                    crate::observability::request_id,
                ))
                .configure(move |cfg| crate::handlers::configure_app(cfg, state, tokens)),
        )
        .await
    }};
}
pub(crate) use init_app;

pub struct Harness {
    pub state: AppState,
    pub tokens: Arc<dyn TokenService>,
    pub store: Arc<InMemoryStore>,
    pub root: User,
    /// Bearer token for `root`.
    pub token: String,
}

impl Harness {
    /// A store holding user `root` (password `sekret`) and two blogs owned by it.
    pub async fn seeded(policy: OwnershipPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "bloglist-test".to_string(),
        }));
        let state = AppState::with_stores(
            store.clone(),
            store.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
            policy,
            "memory",
        );

        let root = state
            .users
            .register("root".to_string(), Some("Superuser".to_string()), "sekret")
            .await
            .unwrap();
        for (title, author, url, likes) in INITIAL_BLOGS {
            let input = NewBlog {
                title: title.to_string(),
                author: Some(author.to_string()),
                url: url.to_string(),
                likes,
            };
            state.blogs.create(root.id, input).await.unwrap();
        }
        let token = tokens.generate_token(root.id, &root.username).unwrap();

        Self {
            state,
            tokens,
            store,
            root,
            token,
        }
    }

    pub fn initial_titles(&self) -> Vec<&'static str> {
        INITIAL_BLOGS.iter().map(|(title, ..)| *title).collect()
    }

    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::get().uri(uri)
    }

    /// POST `body` as `root`.
    pub fn post_authed(&self, uri: &str, body: &Value) -> TestRequest {
        TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", self.token)))
            .set_json(body)
    }

    pub async fn titles_in_store(&self) -> Vec<String> {
        BlogRepository::find_all(&*self.store)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect()
    }

    pub async fn first_blog(&self) -> Blog {
        BlogRepository::find_all(&*self.store)
            .await
            .unwrap()
            .remove(0)
    }

    pub async fn root_blog_ids(&self) -> Vec<Uuid> {
        UserRepository::find_by_id(&*self.store, self.root.id)
            .await
            .unwrap()
            .unwrap()
            .blogs
    }

    pub async fn users_in_store(&self) -> Vec<User> {
        UserRepository::find_all(&*self.store).await.unwrap()
    }

    /// Register another user and return a bearer token for it.
    pub async fn token_for_new_user(&self, username: &str) -> String {
        let user = self
            .state
            .users
            .register(username.to_string(), None, "salainen")
            .await
            .unwrap();
        self.tokens.generate_token(user.id, &user.username).unwrap()
    }
}
