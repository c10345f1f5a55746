//! Repositories for database operations

pub mod contact;
pub mod event;
pub mod user;

// Re-export for convenience
pub use contact::ContactRepository;
pub use event::EventRepository;
pub use user::{UserRepository, hash_password, verify_password};
