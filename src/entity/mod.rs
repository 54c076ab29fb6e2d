//! Entity module - SeaORM entity definitions
//!
//! Flat records keyed by string ids. Foreign keys (`company_id`,
//! `department_id`, ...) are plain strings; nothing checks that they exist.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

pub mod complaint;
pub mod department;
pub mod notification;
pub mod organization;
pub mod user;

pub use user::{LoggedInUser, Role};

/// List of ids stored as a JSON column
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|s| s == id)
    }
}

/// New random record id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
