//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repository implementations over the data store

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{PostRepo, PostStore, UserRepo, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockPostRepo, MockUserRepo};
