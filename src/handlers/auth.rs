//! Authentication handlers
//!
//! Implements login, logout and the session contract endpoint. Three portals
//! share one login endpoint: the general portal (organization admins and
//! complainants), the HR portal and the department portal.

use axum::Json;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::entity::{department, organization, user, LoggedInUser, Role};
use crate::error::{AppError, AppResult};
use crate::middleware::session::SESSION_PRINCIPAL_KEY;
use crate::middleware::{DbConn, Principal, SessionState};
use crate::routes::ApiResponse;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Which login page the request came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginPortal {
    #[default]
    General,
    Hrm,
    Department,
}

impl LoginPortal {
    pub fn as_str(self) -> &'static str {
        match self {
            LoginPortal::General => "general",
            LoginPortal::Hrm => "hrm",
            LoginPortal::Department => "department",
        }
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub portal: LoginPortal,
    /// Organization email, username or department id depending on the portal
    pub identifier: String,
    pub password: String,
}

/// An account matching the identifier, not yet password-checked
struct Candidate {
    principal: Principal,
    password_hash: String,
    user: LoggedInUser,
}

/// Hash a new password
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored hash; malformed hashes never match
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

async fn find_candidate(db: &DatabaseConnection, req: &LoginRequest) -> AppResult<Option<Candidate>> {
    let identifier = req.identifier.trim();

    match req.portal {
        LoginPortal::General => {
            let org = organization::Entity::find()
                .filter(organization::Column::Email.eq(identifier.to_lowercase()))
                .one(db)
                .await?;
            if let Some(org) = org {
                return Ok(Some(Candidate {
                    principal: Principal::Organization(org.id.clone()),
                    password_hash: org.admin_password_hash.clone(),
                    user: org.into(),
                }));
            }
            find_user_candidate(db, identifier, &[Role::User, Role::ImpactPlayer]).await
        }
        LoginPortal::Hrm => find_user_candidate(db, identifier, &[Role::Hrm]).await,
        LoginPortal::Department => {
            let dept = department::Entity::find_by_id(identifier).one(db).await?;
            Ok(dept.map(|dept| Candidate {
                principal: Principal::Department(dept.id.clone()),
                password_hash: dept.password_hash.clone(),
                user: dept.into(),
            }))
        }
    }
}

async fn find_user_candidate(
    db: &DatabaseConnection,
    username: &str,
    roles: &[Role],
) -> AppResult<Option<Candidate>> {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(found
        .filter(|u| roles.contains(&u.role))
        .map(|u| Candidate {
            principal: Principal::User(u.id.clone()),
            password_hash: u.password_hash.clone(),
            user: u.into(),
        }))
}

/// POST /api/login
pub async fn login(
    db: DbConn,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoggedInUser>>> {
    if req.identifier.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("identifier and password are required".to_string()));
    }

    let Some(candidate) = find_candidate(&db, &req).await? else {
        tracing::warn!("Login failed on {} portal: unknown identifier {}", req.portal.as_str(), req.identifier);
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(&req.password, &candidate.password_hash) {
        tracing::warn!("Login failed on {} portal: wrong password for {}", req.portal.as_str(), req.identifier);
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.to_string()));
    }

    session.cycle_id().await?;
    session.insert(SESSION_PRINCIPAL_KEY, &candidate.principal).await?;

    tracing::info!("Signed in {} as {}", candidate.user.id, candidate.user.role);

    Ok(Json(ApiResponse::success(candidate.user)))
}

/// POST /api/logout
pub async fn logout(session: Session, state: SessionState) -> AppResult<Json<ApiResponse<()>>> {
    session.flush().await?;

    if let Some(user) = state.current_user {
        tracing::info!("Signed out {}", user.id);
    }

    Ok(Json(ApiResponse::success_msg("logout success")))
}

/// GET /api/session
/// Returns the session contract directly, without the response wrapper
pub async fn current_session(state: SessionState) -> Json<SessionState> {
    Json(state)
}
