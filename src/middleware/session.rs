//! Session middleware
//!
//! Resolves the cookie session into the session contract every page and
//! handler sees: `{ currentUser, loading }`.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tower_sessions::Session;

use crate::entity::{department, organization, user, LoggedInUser};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Session key for the signed-in principal
pub const SESSION_PRINCIPAL_KEY: &str = "principal";

/// Database connection wrapper, present in request extensions once connected
#[derive(Clone)]
pub struct DbConn(pub DatabaseConnection);

impl Deref for DbConn {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DbConn>()
            .cloned()
            .ok_or(AppError::Unavailable)
    }
}

/// Identity stored in the cookie session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Principal {
    /// Organization admin
    Organization(String),
    Department(String),
    User(String),
}

impl Principal {
    pub fn id(&self) -> &str {
        match self {
            Principal::Organization(id) | Principal::Department(id) | Principal::User(id) => id,
        }
    }

    /// Look the principal up again; `None` once the record is gone
    pub async fn resolve(&self, db: &DatabaseConnection) -> Result<Option<LoggedInUser>, DbErr> {
        let user = match self {
            Principal::Organization(id) => organization::Entity::find_by_id(id.as_str())
                .one(db)
                .await?
                .map(LoggedInUser::from),
            Principal::Department(id) => department::Entity::find_by_id(id.as_str())
                .one(db)
                .await?
                .map(LoggedInUser::from),
            Principal::User(id) => user::Entity::find_by_id(id.as_str())
                .one(db)
                .await?
                .map(LoggedInUser::from),
        };
        Ok(user)
    }
}

/// The session contract
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_user: Option<LoggedInUser>,
    pub loading: bool,
}

impl SessionState {
    pub fn loading() -> Self {
        Self {
            current_user: None,
            loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: LoggedInUser) -> Self {
        Self {
            current_user: Some(user),
            loading: false,
        }
    }

    /// The signed-in user, or the error an API handler should answer with
    pub fn require_user(&self) -> AppResult<&LoggedInUser> {
        if self.loading {
            return Err(AppError::Unavailable);
        }
        self.current_user.as_ref().ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionState {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionState>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
    }
}

/// Session middleware
///
/// Runs on every request, pages and API alike.
pub async fn session_layer(
    State(state): State<AppState>,
    session: Session,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(db) = state.get_db().await else {
        request.extensions_mut().insert(SessionState::loading());
        return next.run(request).await;
    };
    request.extensions_mut().insert(DbConn(db.clone()));

    let principal: Option<Principal> = session
        .get(SESSION_PRINCIPAL_KEY)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Unreadable session, treating as anonymous: {}", e);
            None
        });

    let current_user = match principal {
        None => None,
        Some(principal) => match principal.resolve(&db).await {
            Ok(Some(user)) => Some(user),
            Ok(None) => {
                tracing::warn!("Session principal {} no longer exists, dropping it", principal.id());
                if let Err(e) = session.remove::<Principal>(SESSION_PRINCIPAL_KEY).await {
                    tracing::error!("Failed to drop stale principal: {}", e);
                }
                None
            }
            Err(e) => return AppError::Database(e).into_response(),
        },
    };

    request.extensions_mut().insert(SessionState {
        current_user,
        loading: false,
    });

    next.run(request).await
}
