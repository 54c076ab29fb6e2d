//! Complaintdesk - complaint management with role-gated dashboards
//!
//! Serves the page routes of the client application behind a role gate,
//! the layout shell every page is mounted in, and the JSON API the pages
//! use for sign-in, registration, departments, complaints and notifications.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod layout;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
