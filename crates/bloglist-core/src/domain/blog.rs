use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Blog entity - a single entry with a link, a like count and one owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog owned by `user_id` from validated input.
    pub fn new(user_id: Uuid, input: NewBlog) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            author: input.author,
            url: input.url,
            likes: input.likes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `changes`. Id and owner never change.
    pub fn apply(&mut self, changes: BlogChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(url) = changes.url {
            self.url = url;
        }
        if let Some(likes) = changes.likes {
            self.likes = likes;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated input for creating a blog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlog {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u32,
}

impl NewBlog {
    /// Validate raw create input. Title and url are required; likes default to 0.
    pub fn parse(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<u32>,
    ) -> Result<Self, DomainError> {
        let title = required("title", title)?;
        let url = required("url", url)?;

        Ok(Self {
            title,
            author,
            url,
            likes: likes.unwrap_or(0),
        })
    }
}

/// Validated partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the author.
    pub author: Option<Option<String>>,
    pub url: Option<String>,
    pub likes: Option<u32>,
}

impl BlogChanges {
    /// Validate raw update input. Supplied title and url must not be blank.
    pub fn parse(
        title: Option<String>,
        author: Option<Option<String>>,
        url: Option<String>,
        likes: Option<u32>,
    ) -> Result<Self, DomainError> {
        let title = title.map(|t| required("title", Some(t))).transpose()?;
        let url = url.map(|u| required("url", Some(u))).transpose()?;

        Ok(Self {
            title,
            author,
            url,
            likes,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::Validation(format!("{field} missing"))),
    }
}
