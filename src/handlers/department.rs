//! Department handlers
//!
//! Admins create their organization's departments; any signed-in session
//! can list a company's departments to route a complaint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use super::auth::hash_password;
use super::require_role;
use crate::entity::{department, new_id, Role, StringList};
use crate::error::{AppError, AppResult};
use crate::middleware::{DbConn, SessionState};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Add department request
#[derive(Debug, Deserialize)]
pub struct AddDepartmentRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentQuery {
    pub company_id: Option<String>,
}

/// POST /api/departments
pub async fn add_department(
    State(state): State<AppState>,
    db: DbConn,
    session: SessionState,
    Json(req): Json<AddDepartmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<department::Model>>)> {
    let admin = require_role(&session, &[Role::Admin])?;
    let company_id = admin
        .company_id
        .clone()
        .ok_or_else(|| AppError::Internal(format!("admin {} has no company", admin.id)))?;

    let name = req.name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::Validation("department name must be 1-64 characters".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("department password is required".to_string()));
    }

    let existing = department::Entity::find()
        .filter(department::Column::CompanyId.eq(company_id.as_str()))
        .filter(department::Column::Name.eq(name))
        .count(&*db)
        .await?;
    if existing > 0 {
        return Err(AppError::Conflict(format!("department {} already exists", name)));
    }

    let dept = department::ActiveModel {
        id: Set(new_id()),
        company_id: Set(company_id),
        name: Set(name.to_string()),
        password_hash: Set(hash_password(&req.password, state.config.bcrypt_cost)?),
        members: Set(StringList::default()),
    }
    .insert(&*db)
    .await?;

    tracing::info!("Department created: {} ({}) in {}", dept.name, dept.id, dept.company_id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dept))))
}

/// GET /api/departments
pub async fn list_departments(
    db: DbConn,
    session: SessionState,
    Query(query): Query<DepartmentQuery>,
) -> AppResult<Json<ApiResponse<Vec<department::Model>>>> {
    let user = session.require_user()?;
    let company_id = query
        .company_id
        .or_else(|| user.company_id.clone())
        .ok_or_else(|| AppError::BadRequest("companyId is required".to_string()))?;

    let depts = department::Entity::find()
        .filter(department::Column::CompanyId.eq(company_id))
        .order_by_asc(department::Column::Name)
        .all(&*db)
        .await?;

    Ok(Json(ApiResponse::success(depts)))
}
