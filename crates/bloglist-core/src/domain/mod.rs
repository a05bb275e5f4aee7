//! Domain entities - the core business objects.

mod blog;
mod user;

pub use blog::{Blog, BlogChanges, NewBlog};
pub use user::{Owner, User};

/// A blog together with its expanded owner.
///
/// `owner` is `None` only when the owning user no longer exists in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogView {
    pub blog: Blog,
    pub owner: Option<Owner>,
}
