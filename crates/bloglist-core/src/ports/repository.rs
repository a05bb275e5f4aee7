use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogChanges, User};
use crate::error::RepoError;

/// Blog store handle.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs in insertion order.
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError>;

    /// Find a blog by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;

    /// Persist a new blog and append its id to the owner's blog list.
    ///
    /// Both writes succeed or neither does. Fails with
    /// [`RepoError::Constraint`] when the owner does not exist.
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError>;

    /// Apply `changes` to the blog with `id`. Returns `None` if there is no such blog.
    async fn update_by_id(&self, id: Uuid, changes: BlogChanges)
    -> Result<Option<Blog>, RepoError>;

    /// Remove the blog with `id`. Removing an absent blog is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError>;
}

/// User store handle.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user. A taken username fails with [`RepoError::Constraint`].
    async fn insert(&self, user: User) -> Result<User, RepoError>;
}
