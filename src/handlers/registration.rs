//! Registration handlers
//!
//! Organizations and complainants sign themselves up. HR staff and impact
//! players are created by their organization's admin.

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::Deserialize;

use super::auth::hash_password;
use super::require_role;
use crate::entity::{new_id, organization, user, Role};
use crate::error::{AppError, AppResult};
use crate::middleware::{DbConn, SessionState};
use crate::routes::ApiResponse;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterOrganizationRequest {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// POST /api/organizations
pub async fn register_organization(
    State(state): State<AppState>,
    db: DbConn,
    Json(req): Json<RegisterOrganizationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<organization::Model>>)> {
    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() || name.chars().count() > 128 {
        return Err(AppError::Validation("organization name must be 1-128 characters".to_string()));
    }
    if !email.contains('@') || email.len() > 128 {
        return Err(AppError::Validation("invalid email".to_string()));
    }
    check_password(&req.password)?;

    let taken = organization::Entity::find()
        .filter(organization::Column::Email.eq(email.as_str()))
        .count(&*db)
        .await?;
    // The general login portal matches organization emails before usernames
    let shadowed = user::Entity::find()
        .filter(user::Column::Username.eq(email.as_str()))
        .count(&*db)
        .await?;
    if taken > 0 || shadowed > 0 {
        return Err(AppError::Conflict(format!("{} is already registered", email)));
    }

    let org = organization::ActiveModel {
        id: Set(new_id()),
        name: Set(name.to_string()),
        email: Set(email),
        contact: Set(req.contact.trim().to_string()),
        admin_password_hash: Set(hash_password(&req.password, state.config.bcrypt_cost)?),
    }
    .insert(&*db)
    .await?;

    tracing::info!("Organization registered: {} ({})", org.name, org.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(org))))
}

/// POST /api/users
pub async fn register_user(
    State(state): State<AppState>,
    db: DbConn,
    session: SessionState,
    Json(req): Json<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<user::Model>>)> {
    let role = req.role.unwrap_or(Role::User);
    if !role.is_account_role() {
        return Err(AppError::BadRequest(format!("{} accounts cannot be registered", role)));
    }

    // Staff accounts belong to the admin's organization
    let company_id = if role == Role::User {
        req.company_id
    } else {
        let admin = require_role(&session, &[Role::Admin])?;
        admin.company_id.clone()
    };

    let username = req.username.trim();
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(AppError::Validation("username must be 3-32 characters".to_string()));
    }
    if username.contains('@') {
        return Err(AppError::Validation("username must not contain '@'".to_string()));
    }
    check_password(&req.password)?;

    let taken = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .count(&*db)
        .await?;
    if taken > 0 {
        return Err(AppError::Conflict(format!("username {} is taken", username)));
    }

    let created = user::ActiveModel {
        id: Set(new_id()),
        username: Set(Some(username.to_string())),
        password_hash: Set(hash_password(&req.password, state.config.bcrypt_cost)?),
        role: Set(role),
        company_id: Set(company_id),
        department_id: Set(req.department_id),
    }
    .insert(&*db)
    .await?;

    tracing::info!("User registered: {} as {}", username, role);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}
