use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity - an account that owns blogs.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    /// Ids of the blogs this user created, oldest first.
    pub blogs: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, timestamps and no blogs.
    pub fn new(username: String, name: Option<String>, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            name,
            password_hash,
            blogs: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The minimal projection embedded in blog responses.
    pub fn owner(&self) -> Owner {
        Owner {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// Owner projection of a user: identity and display fields only.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}
