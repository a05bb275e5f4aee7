//! # Bloglist Core
//!
//! The domain layer of the bloglist service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod list_helper;
pub mod ports;
pub mod services;

pub use error::DomainError;
