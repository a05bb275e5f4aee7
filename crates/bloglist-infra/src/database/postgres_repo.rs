//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use bloglist_core::domain::{Blog, BlogChanges, User};
use bloglist_core::error::RepoError;
use bloglist_core::ports::{BlogRepository, UserRepository};

use super::entity::blog::{self, Entity as BlogEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint(err_str)
    } else if matches!(e, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
        RepoError::Connection(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL blog repository.
pub struct PostgresBlogRepository {
    db: DbConn,
}

impl PostgresBlogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        BlogEntity::find()
            .order_by_asc(blog::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(Blog::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(Blog::try_from)
            .transpose()
    }

    async fn insert(&self, new_blog: Blog) -> Result<Blog, RepoError> {
        // Dropping the transaction on an early return rolls it back.
        let txn = self.db.begin().await.map_err(query_err)?;
        let owner_id = new_blog.user_id;

        let owner = UserEntity::find_by_id(owner_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_err)?
            .ok_or_else(|| RepoError::Constraint(format!("owner {owner_id} does not exist")))?;
        let mut blog_ids = user::blog_ids(&owner.blogs)?;

        let saved = blog::ActiveModel::from(new_blog)
            .insert(&txn)
            .await
            .map_err(query_err)?;
        blog_ids.push(saved.id);

        let mut owner = owner.into_active_model();
        owner.blogs = Set(user::blog_ids_json(&blog_ids));
        owner.updated_at = Set(saved.created_at);
        owner.update(&txn).await.map_err(query_err)?;

        txn.commit().await.map_err(query_err)?;
        tracing::debug!(blog_id = %saved.id, "Blog and owner reference committed");

        Blog::try_from(saved)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: BlogChanges,
    ) -> Result<Option<Blog>, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let Some(model) = BlogEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let mut current = Blog::try_from(model)?;
        current.apply(changes);

        let updated = blog::ActiveModel::from(current)
            .update(&txn)
            .await
            .map_err(query_err)?;
        txn.commit().await.map_err(query_err)?;

        Blog::try_from(updated).map(Some)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepoError> {
        let result = BlogEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            tracing::debug!(blog_id = %id, "Delete matched no blog");
        }

        Ok(())
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err)?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, new_user: User) -> Result<User, RepoError> {
        let saved = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(query_err)?;

        User::try_from(saved)
    }
}
