//! Department entity
//!
//! Table: cd_department. A department signs in as a whole with its own
//! password; `members` lists the user ids working in it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::StringList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cd_department")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// department_id
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(Some(36))")]
    pub id: String,

    #[sea_orm(column_type = "String(Some(36))")]
    pub company_id: String,

    #[sea_orm(column_type = "String(Some(64))")]
    pub name: String,

    /// bcrypt hash
    #[sea_orm(column_type = "String(Some(128))")]
    #[serde(skip_serializing)]
    pub password_hash: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub members: StringList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
