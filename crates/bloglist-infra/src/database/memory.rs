//! In-memory store - used when no database is configured, and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bloglist_core::domain::{Blog, BlogChanges, User};
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BlogRepository, UserRepository};

#[derive(Default)]
struct Collections {
    blogs: Vec<Blog>,
    users: Vec<User>,
}

/// Blogs and users held in insertion order behind one async RwLock.
///
/// Implements both repositories so that creating a blog and recording it on
/// its owner happen under the same write lock.
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    data: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Collections::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        Ok(self.data.read().await.blogs.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let data = self.data.read().await;
        Ok(data.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut data = self.data.write().await;

        if data.blogs.iter().any(|b| b.id == blog.id) {
            return Err(RepoError::Constraint(format!("blog {} already exists", blog.id)));
        }

        let owner = data
            .users
            .iter_mut()
            .find(|u| u.id == blog.user_id)
            .ok_or_else(|| RepoError::Constraint(format!("owner {} does not exist", blog.user_id)))?;
        owner.blogs.push(blog.id);
        owner.updated_at = blog.created_at;

        data.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError> {
        let mut data = self.data.write().await;
        let updated = data.blogs.iter_mut().find(|b| b.id == id).map(|blog| {
            blog.apply(changes);
            blog.clone()
        });
        Ok(updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        self.data.write().await.blogs.retain(|b| b.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.data.read().await.users.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let data = self.data.read().await;
        Ok(data
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut data = self.data.write().await;

        if data.users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username {} already exists",
                user.username
            )));
        }

        data.users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloglist_core::domain::NewBlog;

    fn blog_for(owner: &User, title: &str) -> Blog {
        Blog::new(
            owner.id,
            NewBlog {
                title: title.to_string(),
                author: Some("Toisen kirjoittaja".to_string()),
                url: "www.toinen.com".to_string(),
                likes: 16,
            },
        )
    }

    async fn store_with_root() -> (InMemoryStore, User) {
        let store = InMemoryStore::new();
        let root = User::new("root".to_string(), None, "hash".to_string());
        UserRepository::insert(&store, root.clone()).await.unwrap();
        (store, root)
    }

    #[tokio::test]
    async fn test_insert_records_blog_on_owner() {
        let (store, root) = store_with_root().await;

        let first = BlogRepository::insert(&store, blog_for(&root, "First")).await.unwrap();
        let second = BlogRepository::insert(&store, blog_for(&root, "Second")).await.unwrap();

        let owner = UserRepository::find_by_id(&store, root.id).await.unwrap().unwrap();
        assert_eq!(owner.blogs, vec![first.id, second.id]);
        assert_eq!(BlogRepository::find_all(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_without_owner_persists_nothing() {
        let store = InMemoryStore::new();
        let stranger = User::new("ghost".to_string(), None, "hash".to_string());

        let result = BlogRepository::insert(&store, blog_for(&stranger, "Orphan")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(BlogRepository::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_violation() {
        let (store, _) = store_with_root().await;
        let again = User::new("root".to_string(), None, "other".to_string());

        let result = UserRepository::insert(&store, again).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(UserRepository::find_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_blog_returns_none() {
        let store = InMemoryStore::new();

        let result = store
            .update_by_id(Uuid::new_v4(), BlogChanges::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_keeps_owner_reference() {
        let (store, root) = store_with_root().await;
        let blog = BlogRepository::insert(&store, blog_for(&root, "Doomed")).await.unwrap();

        store.delete_by_id(blog.id).await.unwrap();
        store.delete_by_id(blog.id).await.unwrap();

        assert!(BlogRepository::find_by_id(&store, blog.id).await.unwrap().is_none());
        let owner = UserRepository::find_by_id(&store, root.id).await.unwrap().unwrap();
        assert_eq!(owner.blogs, vec![blog.id]);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown_ids() {
        let (store, root) = store_with_root().await;

        let users = store.find_by_ids(&[root.id, Uuid::new_v4()]).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "root");
    }
}
