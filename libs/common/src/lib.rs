//! Common library for the Núcleo Eventos back-office
//!
//! This crate provides shared infrastructure used by the services in this
//! workspace: PostgreSQL connection pooling, configuration, and the
//! database error taxonomy.

pub mod database;
pub mod error;
