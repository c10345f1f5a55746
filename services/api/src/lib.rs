//! Back-office service for the Núcleo Eventos site
//!
//! Hosts the public site API (event listing/detail, contact submission),
//! the admin API (event CRUD, contact triage) and the auth gate.

pub mod database;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
