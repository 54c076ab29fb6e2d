//! User entity
//!
//! Table: cd_user. Holds individual accounts (`User`, `HRM`, `ImpactPlayer`).
//! Organization admins and departments sign in through their own records and
//! are never stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access class deciding which routes a session may see
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum Role {
    #[sea_orm(string_value = "Admin")]
    Admin,
    #[sea_orm(string_value = "HRM")]
    #[serde(rename = "HRM")]
    Hrm,
    #[sea_orm(string_value = "Department")]
    Department,
    #[sea_orm(string_value = "User")]
    User,
    #[sea_orm(string_value = "Guest")]
    Guest,
    #[sea_orm(string_value = "ImpactPlayer")]
    ImpactPlayer,
}

impl Role {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Hrm => "HRM",
            Role::Department => "Department",
            Role::User => "User",
            Role::Guest => "Guest",
            Role::ImpactPlayer => "ImpactPlayer",
        }
    }

    /// Roles that live in the user table
    pub fn is_account_role(self) -> bool {
        matches!(self, Role::User | Role::Hrm | Role::ImpactPlayer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cd_user")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// user_id
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(Some(36))")]
    pub id: String,

    /// Only set for identified users
    #[sea_orm(column_type = "String(Some(32))", unique, nullable)]
    pub username: Option<String>,

    /// bcrypt hash
    #[sea_orm(column_type = "String(Some(128))")]
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    /// Set for HRM and department staff
    #[sea_orm(column_type = "String(Some(36))", nullable)]
    pub company_id: Option<String>,

    #[sea_orm(column_type = "String(Some(36))", nullable)]
    pub department_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The signed-in identity handed to pages and handlers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInUser {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl From<Model> for LoggedInUser {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role,
            company_id: model.company_id,
            department_id: model.department_id,
        }
    }
}

impl From<super::organization::Model> for LoggedInUser {
    fn from(org: super::organization::Model) -> Self {
        Self {
            id: org.id.clone(),
            username: Some(org.email),
            role: Role::Admin,
            company_id: Some(org.id),
            department_id: None,
        }
    }
}

impl From<super::department::Model> for LoggedInUser {
    fn from(dept: super::department::Model) -> Self {
        Self {
            id: dept.id.clone(),
            username: Some(dept.name),
            role: Role::Department,
            company_id: Some(dept.company_id),
            department_id: Some(dept.id),
        }
    }
}
