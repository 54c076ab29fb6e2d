//! Notification entity
//!
//! Table: cd_notification. `recipient_id` is a user id, a department id or
//! an organization id (the organization's admin).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cd_notification")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(Some(36))")]
    pub id: String,

    #[sea_orm(column_type = "String(Some(36))", indexed)]
    pub recipient_id: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    #[sea_orm(column_type = "String(Some(16))", nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,

    pub is_read: bool,

    pub timestamp: DateTimeUtc,

    #[sea_orm(nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous_complaint: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
