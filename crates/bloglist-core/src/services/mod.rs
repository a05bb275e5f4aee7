//! Services - use cases composed from injected ports.

mod blogs;
mod users;

#[cfg(test)]
mod fakes;

pub use blogs::{BlogService, OwnershipPolicy};
pub use users::{MIN_CREDENTIAL_LEN, Session, UserService};

/// Message returned whenever a bearer token cannot identify a user.
pub const INVALID_TOKEN: &str = "token missing or invalid";
