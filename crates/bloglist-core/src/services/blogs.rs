//! Blog collection use cases.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Blog, BlogChanges, BlogView, NewBlog, Owner};
use crate::error::DomainError;
use crate::ports::{BlogRepository, UserRepository};

use super::INVALID_TOKEN;

/// Who may update or delete a blog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// Any caller may update or delete any blog.
    #[default]
    Open,
    /// Only the authenticated owner may update or delete a blog.
    OwnerOnly,
}

impl FromStr for OwnershipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "owner" | "owner-only" | "owner_only" => Ok(Self::OwnerOnly),
            other => Err(format!("unknown ownership policy: {other}")),
        }
    }
}

/// Create, list, update and delete blogs against the injected stores.
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    users: Arc<dyn UserRepository>,
    ownership: OwnershipPolicy,
}

impl BlogService {
    pub fn new(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        ownership: OwnershipPolicy,
    ) -> Self {
        Self {
            blogs,
            users,
            ownership,
        }
    }

    pub fn ownership(&self) -> OwnershipPolicy {
        self.ownership
    }

    /// Every stored blog with its owner expanded.
    pub async fn list(&self) -> Result<Vec<BlogView>, DomainError> {
        let blogs = self.blogs.find_all().await?;
        self.expand(blogs).await
    }

    /// Create a blog owned by the authenticated `caller`.
    pub async fn create(&self, caller: Uuid, input: NewBlog) -> Result<BlogView, DomainError> {
        let user = self.users.find_by_id(caller).await?.ok_or_else(|| {
            tracing::warn!(user_id = %caller, "Token refers to an unknown user");
            DomainError::Unauthorized(INVALID_TOKEN.to_string())
        })?;

        let blog = self.blogs.insert(Blog::new(user.id, input)).await?;
        tracing::info!(blog_id = %blog.id, user_id = %user.id, "Blog created");

        Ok(BlogView {
            blog,
            owner: Some(user.owner()),
        })
    }

    /// Replace the supplied fields of blog `id`.
    pub async fn update(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<BlogView, DomainError> {
        if self.ownership == OwnershipPolicy::OwnerOnly {
            let blog = self.blogs.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
            authorize(caller, &blog)?;
        }

        let blog = self
            .blogs
            .update_by_id(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(blog_id = %id, "Blog updated");

        let owner = self.users.find_by_id(blog.user_id).await?.map(|u| u.owner());
        Ok(BlogView { blog, owner })
    }

    /// Remove blog `id`. Removing an absent blog succeeds.
    pub async fn delete(&self, caller: Option<Uuid>, id: Uuid) -> Result<(), DomainError> {
        if self.ownership == OwnershipPolicy::OwnerOnly {
            match self.blogs.find_by_id(id).await? {
                Some(blog) => authorize(caller, &blog)?,
                None => return Ok(()),
            }
        }

        self.blogs.delete_by_id(id).await?;
        tracing::info!(blog_id = %id, "Blog deleted");
        Ok(())
    }

    async fn expand(&self, blogs: Vec<Blog>) -> Result<Vec<BlogView>, DomainError> {
        let mut owner_ids: Vec<Uuid> = blogs.iter().map(|b| b.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<Uuid, Owner> = self
            .users
            .find_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.owner()))
            .collect();

        Ok(blogs
            .into_iter()
            .map(|blog| {
                let owner = owners.get(&blog.user_id).cloned();
                BlogView { blog, owner }
            })
            .collect())
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Blog",
        id,
    }
}

fn authorize(caller: Option<Uuid>, blog: &Blog) -> Result<(), DomainError> {
    match caller {
        None => Err(DomainError::Unauthorized(INVALID_TOKEN.to_string())),
        Some(user_id) if user_id == blog.user_id => Ok(()),
        Some(user_id) => {
            tracing::warn!(blog_id = %blog.id, user_id = %user_id, "Rejected change by non-owner");
            Err(DomainError::Forbidden(
                "only the owner may modify this blog".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::services::fakes::FakeStore;

    fn input(title: &str, likes: Option<u32>) -> NewBlog {
        NewBlog::parse(
            Some(title.to_string()),
            Some("Ekan kirjoittaja".to_string()),
            Some("www.eka.fi".to_string()),
            likes,
        )
        .unwrap()
    }

    fn setup(policy: OwnershipPolicy) -> (Arc<FakeStore>, BlogService, User) {
        let store = Arc::new(FakeStore::default());
        let user = User::new("root".to_string(), Some("Superuser".to_string()), "hash".into());
        store.add_user(user.clone());
        let service = BlogService::new(store.clone(), store.clone(), policy);
        (store, service, user)
    }

    #[test]
    fn test_parse_ownership_policy() {
        assert_eq!("open".parse::<OwnershipPolicy>(), Ok(OwnershipPolicy::Open));
        assert_eq!("Owner".parse::<OwnershipPolicy>(), Ok(OwnershipPolicy::OwnerOnly));
        assert!("nobody".parse::<OwnershipPolicy>().is_err());
    }

    #[tokio::test]
    async fn test_create_defaults_likes_and_expands_owner() {
        let (store, service, user) = setup(OwnershipPolicy::Open);

        let view = service.create(user.id, input("No Likes", None)).await.unwrap();

        assert_eq!(view.blog.likes, 0);
        assert_eq!(view.blog.user_id, user.id);
        assert_eq!(view.owner.unwrap().username, "root");
        assert_eq!(store.blogs().len(), 1);
    }

    #[tokio::test]
    async fn test_create_appends_to_owner_blog_list() {
        let (store, service, user) = setup(OwnershipPolicy::Open);

        let mut created = Vec::new();
        for i in 0..3 {
            let view = service.create(user.id, input(&format!("Blog {i}"), Some(i))).await.unwrap();
            created.push(view.blog.id);
        }

        let owner = store.user(user.id).unwrap();
        assert_eq!(owner.blogs, created);
    }

    #[tokio::test]
    async fn test_create_for_unknown_user_is_unauthorized() {
        let (store, service, _) = setup(OwnershipPolicy::Open);

        let result = service.create(Uuid::new_v4(), input("Ghost", None)).await;

        assert!(matches!(result, Err(DomainError::Unauthorized(_))));
        assert!(store.blogs().is_empty());
    }

    #[tokio::test]
    async fn test_list_expands_owner() {
        let (_, service, user) = setup(OwnershipPolicy::Open);
        service.create(user.id, input("First", Some(40))).await.unwrap();
        service.create(user.id, input("Second", Some(16))).await.unwrap();

        let views = service.list().await.unwrap();

        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.owner.as_ref().map(|o| o.id) == Some(user.id)));
        assert_eq!(views[0].blog.title, "First");
    }

    #[tokio::test]
    async fn test_update_replaces_only_supplied_fields() {
        let (_, service, user) = setup(OwnershipPolicy::Open);
        let created = service.create(user.id, input("Old", Some(12))).await.unwrap();

        let changes = BlogChanges {
            title: Some("New Title".to_string()),
            ..Default::default()
        };
        let updated = service.update(None, created.blog.id, changes).await.unwrap();

        assert_eq!(updated.blog.id, created.blog.id);
        assert_eq!(updated.blog.title, "New Title");
        assert_eq!(updated.blog.likes, 12);
        assert_eq!(updated.blog.url, created.blog.url);
        assert_eq!(updated.blog.author, created.blog.author);
        assert_eq!(updated.owner.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_update_unknown_blog_is_not_found() {
        let (_, service, _) = setup(OwnershipPolicy::Open);

        let result = service
            .update(None, Uuid::new_v4(), BlogChanges::default())
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_removes_blog_and_tolerates_absent_id() {
        let (store, service, user) = setup(OwnershipPolicy::Open);
        let created = service.create(user.id, input("Doomed", None)).await.unwrap();

        service.delete(None, created.blog.id).await.unwrap();
        service.delete(None, created.blog.id).await.unwrap();

        assert!(store.blogs().is_empty());
    }

    #[tokio::test]
    async fn test_owner_only_policy_rejects_other_callers() {
        let (store, service, user) = setup(OwnershipPolicy::OwnerOnly);
        let created = service.create(user.id, input("Mine", None)).await.unwrap();
        let id = created.blog.id;

        let anonymous = service.delete(None, id).await;
        assert!(matches!(anonymous, Err(DomainError::Unauthorized(_))));

        let stranger = service.delete(Some(Uuid::new_v4()), id).await;
        assert!(matches!(stranger, Err(DomainError::Forbidden(_))));

        let edit = service.update(Some(Uuid::new_v4()), id, BlogChanges::default()).await;
        assert!(matches!(edit, Err(DomainError::Forbidden(_))));
        assert_eq!(store.blogs().len(), 1);

        service.delete(Some(user.id), id).await.unwrap();
        assert!(store.blogs().is_empty());
    }
}
