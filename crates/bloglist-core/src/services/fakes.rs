//! In-test store and auth doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogChanges, User};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BlogRepository, PasswordService, TokenClaims, TokenService, UserRepository,
};

#[derive(Default)]
struct State {
    blogs: Vec<Blog>,
    users: Vec<User>,
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

impl FakeStore {
    pub fn add_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.state.lock().unwrap().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn users(&self) -> Vec<User> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn blogs(&self) -> Vec<Blog> {
        self.state.lock().unwrap().blogs.clone()
    }
}

#[async_trait]
impl BlogRepository for FakeStore {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        Ok(self.blogs())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.blogs().into_iter().find(|b| b.id == id))
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut state = self.state.lock().unwrap();
        let owner = state
            .users
            .iter_mut()
            .find(|u| u.id == blog.user_id)
            .ok_or_else(|| RepoError::Constraint("owner does not exist".to_string()))?;
        owner.blogs.push(blog.id);
        state.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError> {
        let mut state = self.state.lock().unwrap();
        let updated = state.blogs.iter_mut().find(|b| b.id == id).map(|blog| {
            blog.apply(changes);
            blog.clone()
        });
        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        self.state.lock().unwrap().blogs.retain(|b| b.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.user(id))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        Ok(self.users().into_iter().filter(|u| ids.contains(&u.id)).collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.users().into_iter().find(|u| u.username == username))
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        self.add_user(user.clone());
        Ok(user)
    }
}

/// Reversible "hash" so tests can tell a hash from the password.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.chars().rev().collect())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(self.hash(password)? == hash)
    }
}

pub struct StaticTokens;

impl TokenService for StaticTokens {
    fn generate_token(&self, user_id: Uuid, _username: &str) -> Result<String, AuthError> {
        Ok(format!("token-for-{user_id}"))
    }

    fn validate_token(&self, _token: &str) -> Result<TokenClaims, AuthError> {
        Err(AuthError::InvalidToken("static tokens are not verifiable".to_string()))
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}
