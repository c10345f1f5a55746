//! Domain models for the back-office service

pub mod contact;
pub mod event;
pub mod user;

// Re-export for convenience
pub use contact::{Bucket, Contact, ContactData, ContactPatch, ContactQuery, NewContact, Subject};
pub use event::{
    Event, EventData, EventPayload, EventQuery, EventStatus, Price, ScheduleItem, generate_slug,
    normalize_status,
};
pub use user::{NewUser, Role, User, UserResponse};
