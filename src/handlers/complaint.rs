//! Complaint handlers
//!
//! Submission by complainants, the full case view (visibility checked per
//! viewer) and the public status lookup used by guests.

use axum::{extract::Path, http::StatusCode, Json};
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::require_role;
use crate::entity::complaint::{self, ComplaintStatus, Evidence, EvidenceList, FeedbackList};
use crate::entity::{department, new_id, notification, Role};
use crate::error::{AppError, AppResult, OptionExt};
use crate::middleware::{DbConn, SessionState};
use crate::routes::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintRequest {
    pub company_id: String,
    pub department_id: String,
    pub description: String,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub is_anonymous: bool,
}

/// What a guest learns from a case id
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStatusResponse {
    pub case_id: String,
    pub status: ComplaintStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// POST /api/complaints
pub async fn submit_complaint(
    db: DbConn,
    session: SessionState,
    Json(req): Json<SubmitComplaintRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<complaint::Model>>)> {
    let user = require_role(&session, &[Role::User, Role::ImpactPlayer])?;

    let description = req.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation("description is required".to_string()));
    }

    let dept = department::Entity::find_by_id(req.department_id.as_str())
        .one(&*db)
        .await?
        .filter(|d| d.company_id == req.company_id)
        .ok_or_else(|| AppError::BadRequest("unknown department for this company".to_string()))?;

    let now = chrono::Utc::now();
    let case_id = complaint::new_case_id();
    let submitted_by = (!req.is_anonymous).then(|| user.id.clone());

    let txn = db.begin().await?;

    let created = complaint::ActiveModel {
        case_id: Set(case_id.clone()),
        company_id: Set(req.company_id.clone()),
        department_id: Set(dept.id.clone()),
        description: Set(description.to_string()),
        evidence: Set(EvidenceList(req.evidence)),
        is_anonymous: Set(req.is_anonymous),
        submitted_by_user_id: Set(submitted_by),
        status: Set(ComplaintStatus::Open),
        created_at: Set(now),
        updated_at: Set(now),
        feedback: Set(FeedbackList::default()),
        resolution_feedback: Set(None),
        satisfaction: Set(None),
        impact_players: Set(None),
        impact_player_feedback: Set(None),
    }
    .insert(&txn)
    .await?;

    notification::ActiveModel {
        id: Set(new_id()),
        recipient_id: Set(dept.id.clone()),
        message: Set(format!("New complaint {} assigned to {}", case_id, dept.name)),
        case_id: Set(Some(case_id.clone())),
        is_read: Set(false),
        timestamp: Set(now),
        is_anonymous_complaint: Set(Some(req.is_anonymous)),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!("Complaint {} submitted to department {}", case_id, dept.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// GET /api/complaints/:case_id
pub async fn get_complaint(
    db: DbConn,
    session: SessionState,
    Path(case_id): Path<String>,
) -> AppResult<Json<ApiResponse<complaint::Model>>> {
    let user = session.require_user()?;

    let found = complaint::Entity::find_by_id(case_id.as_str())
        .one(&*db)
        .await?
        .ok_or_not_found(format!("complaint {}", case_id))?;

    if !found.is_visible_to(user) {
        tracing::debug!("{} ({}) may not view {}", user.id, user.role, case_id);
        return Err(AppError::Forbidden);
    }

    Ok(Json(ApiResponse::success(found)))
}

/// GET /api/complaints/:case_id/status
pub async fn complaint_status(
    db: DbConn,
    Path(case_id): Path<String>,
) -> AppResult<Json<ApiResponse<ComplaintStatusResponse>>> {
    let found = complaint::Entity::find_by_id(case_id.as_str())
        .one(&*db)
        .await?
        .ok_or_not_found(format!("complaint {}", case_id))?;

    Ok(Json(ApiResponse::success(ComplaintStatusResponse {
        case_id: found.case_id,
        status: found.status,
        updated_at: found.updated_at,
    })))
}

#[cfg(test)]
mod tests {
    use crate::entity::Role;
    use crate::testing::{self, body_json, get, login, post_json};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    struct Fixture {
        app: axum::Router,
        company_id: String,
        department_id: String,
    }

    async fn fixture() -> Fixture {
        let (app, state) = testing::ready_app().await;
        let db = state.get_db().await.unwrap();
        let org = testing::seed_org(&db, "ops@acme.test", "orgpass").await;
        let dept = testing::seed_department(&db, &org.id, "Finance", "deptpass").await;
        testing::seed_user(&db, "alice", "secret", Role::User, None).await;
        testing::seed_user(&db, "carol", "secret", Role::User, None).await;
        Fixture {
            app,
            company_id: org.id,
            department_id: dept.id,
        }
    }

    async fn submit(f: &Fixture, cookie: &str, anonymous: bool) -> Value {
        let res = post_json(
            &f.app,
            "/api/complaints",
            json!({
                "companyId": f.company_id,
                "departmentId": f.department_id,
                "description": "Overtime is never paid",
                "evidence": [{"fileName": "slip.pdf", "fileType": "application/pdf", "dataUrl": "data:,"}],
                "isAnonymous": anonymous
            }),
            Some(cookie),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        body_json(res).await["data"].clone()
    }

    #[tokio::test]
    async fn test_submit_and_view() {
        let f = fixture().await;
        let alice = login(&f.app, "general", "alice", "secret").await;
        let created = submit(&f, &alice, false).await;

        assert_eq!(created["status"], "Open");
        assert_eq!(created["evidence"][0]["fileName"], "slip.pdf");
        let case_id = created["caseId"].as_str().unwrap().to_string();
        assert!(case_id.starts_with("CASE-"));

        let uri = format!("/api/complaints/{}", case_id);
        let own = get(&f.app, &uri, Some(alice.as_str())).await;
        assert_eq!(own.status(), StatusCode::OK);

        let carol = login(&f.app, "general", "carol", "secret").await;
        assert_eq!(get(&f.app, &uri, Some(carol.as_str())).await.status(), StatusCode::FORBIDDEN);
        assert_eq!(get(&f.app, &uri, None).await.status(), StatusCode::UNAUTHORIZED);

        let dept = login(&f.app, "department", &f.department_id, "deptpass").await;
        assert_eq!(get(&f.app, &uri, Some(dept.as_str())).await.status(), StatusCode::OK);

        let admin = login(&f.app, "general", "ops@acme.test", "orgpass").await;
        assert_eq!(get(&f.app, &uri, Some(admin.as_str())).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_anonymous_complaint_has_no_submitter() {
        let f = fixture().await;
        let alice = login(&f.app, "general", "alice", "secret").await;
        let created = submit(&f, &alice, true).await;

        assert!(created.get("submittedByUserId").is_none());
        let uri = format!("/api/complaints/{}", created["caseId"].as_str().unwrap());
        assert_eq!(get(&f.app, &uri, Some(alice.as_str())).await.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_guest_status_lookup() {
        let f = fixture().await;
        let alice = login(&f.app, "general", "alice", "secret").await;
        let created = submit(&f, &alice, true).await;

        let uri = format!("/api/complaints/{}/status", created["caseId"].as_str().unwrap());
        let status = body_json(get(&f.app, &uri, None).await).await;
        assert_eq!(status["data"]["status"], "Open");
        assert!(status["data"].get("description").is_none());

        let missing = get(&f.app, "/api/complaints/CASE-NOPE/status", None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submission_rules() {
        let f = fixture().await;
        let dept = login(&f.app, "department", &f.department_id, "deptpass").await;
        let res = post_json(
            &f.app,
            "/api/complaints",
            json!({"companyId": f.company_id, "departmentId": f.department_id, "description": "x"}),
            Some(dept.as_str()),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let alice = login(&f.app, "general", "alice", "secret").await;
        let res = post_json(
            &f.app,
            "/api/complaints",
            json!({"companyId": "other", "departmentId": f.department_id, "description": "x"}),
            Some(alice.as_str()),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = post_json(
            &f.app,
            "/api/complaints",
            json!({"companyId": f.company_id, "departmentId": f.department_id, "description": "   "}),
            Some(alice.as_str()),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
