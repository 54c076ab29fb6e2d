//! Notification handlers

use axum::Json;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::notification;
use crate::error::AppResult;
use crate::middleware::{DbConn, SessionState};
use crate::routes::ApiResponse;

/// GET /api/notifications
/// Newest first, addressed to the signed-in principal
pub async fn list_notifications(
    db: DbConn,
    session: SessionState,
) -> AppResult<Json<ApiResponse<Vec<notification::Model>>>> {
    let user = session.require_user()?;

    let items = notification::Entity::find()
        .filter(notification::Column::RecipientId.eq(user.id.as_str()))
        .order_by_desc(notification::Column::Timestamp)
        .all(&*db)
        .await?;

    Ok(Json(ApiResponse::success(items)))
}
