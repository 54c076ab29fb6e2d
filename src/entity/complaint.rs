//! Complaint entity
//!
//! Table: cd_complaint. The status lifecycle (Open -> In Progress ->
//! Resolved/Reopened -> Closed) is informal; any status may be stored.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use super::{LoggedInUser, Role, StringList};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sea_orm(string_value = "Resolved")]
    Resolved,
    #[sea_orm(string_value = "Reopened")]
    Reopened,
    #[sea_orm(string_value = "Closed")]
    Closed,
}

/// Attached file, inline as a data URL or as a link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub file_name: String,
    pub file_type: String,
    pub data_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct EvidenceList(pub Vec<Evidence>);

/// A message on the case thread
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// User id, or "Department" / "HRM"
    pub by: String,
    pub message: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct FeedbackList(pub Vec<Feedback>);

/// Submitter's verdict on the resolution
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Satisfaction {
    pub satisfied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactPlayerFeedback {
    pub user_id: String,
    pub resolved: bool,
    pub comment: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct ImpactPlayerFeedbackList(pub Vec<ImpactPlayerFeedback>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cd_complaint")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(Some(16))")]
    pub case_id: String,

    #[sea_orm(column_type = "String(Some(36))")]
    pub company_id: String,

    #[sea_orm(column_type = "String(Some(36))")]
    pub department_id: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub evidence: EvidenceList,

    pub is_anonymous: bool,

    /// Only set when the complaint is not anonymous
    #[sea_orm(column_type = "String(Some(36))", nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by_user_id: Option<String>,

    pub status: ComplaintStatus,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,

    #[sea_orm(column_type = "JsonBinary")]
    pub feedback: FeedbackList,

    #[sea_orm(column_type = "Text", nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_feedback: Option<String>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<Satisfaction>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_players: Option<StringList>,

    #[sea_orm(column_type = "JsonBinary", nullable)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_player_feedback: Option<ImpactPlayerFeedbackList>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether `user` may read the full case
    ///
    /// Admin and HRM see their company's cases, a department sees the cases
    /// routed to it, users see what they submitted and impact players what
    /// they are listed on. Guests go through the status lookup instead.
    pub fn is_visible_to(&self, user: &LoggedInUser) -> bool {
        let same_company = user.company_id.as_deref() == Some(self.company_id.as_str());
        match user.role {
            Role::Admin | Role::Hrm => same_company,
            Role::Department => {
                same_company && user.department_id.as_deref() == Some(self.department_id.as_str())
            }
            Role::User => self.is_submitted_by(&user.id),
            Role::ImpactPlayer => {
                self.is_submitted_by(&user.id)
                    || self
                        .impact_players
                        .as_ref()
                        .is_some_and(|players| players.contains(&user.id))
            }
            Role::Guest => false,
        }
    }

    fn is_submitted_by(&self, user_id: &str) -> bool {
        self.submitted_by_user_id.as_deref() == Some(user_id)
    }
}

/// New case id: "CASE-" followed by 10 uppercase hex digits
pub fn new_case_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("CASE-{}", &raw[..10])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complaint() -> Model {
        let now = chrono::Utc::now();
        Model {
            case_id: "CASE-0000000001".to_string(),
            company_id: "acme".to_string(),
            department_id: "finance".to_string(),
            description: "Expense claims ignored".to_string(),
            evidence: EvidenceList::default(),
            is_anonymous: false,
            submitted_by_user_id: Some("alice".to_string()),
            status: ComplaintStatus::Open,
            created_at: now,
            updated_at: now,
            feedback: FeedbackList::default(),
            resolution_feedback: None,
            satisfaction: None,
            impact_players: Some(StringList(vec!["bob".to_string()])),
            impact_player_feedback: None,
        }
    }

    fn viewer(id: &str, role: Role, company: Option<&str>, dept: Option<&str>) -> LoggedInUser {
        LoggedInUser {
            id: id.to_string(),
            username: None,
            role,
            company_id: company.map(str::to_string),
            department_id: dept.map(str::to_string),
        }
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ComplaintStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(ComplaintStatus::InProgress.to_value(), "In Progress");
        let parsed: ComplaintStatus = serde_json::from_str("\"Reopened\"").unwrap();
        assert_eq!(parsed, ComplaintStatus::Reopened);
    }

    #[test]
    fn test_visibility() {
        let c = complaint();
        assert!(c.is_visible_to(&viewer("acme", Role::Admin, Some("acme"), None)));
        assert!(!c.is_visible_to(&viewer("globex", Role::Admin, Some("globex"), None)));
        assert!(c.is_visible_to(&viewer("h1", Role::Hrm, Some("acme"), None)));
        assert!(c.is_visible_to(&viewer("finance", Role::Department, Some("acme"), Some("finance"))));
        assert!(!c.is_visible_to(&viewer("legal", Role::Department, Some("acme"), Some("legal"))));
        assert!(c.is_visible_to(&viewer("alice", Role::User, None, None)));
        assert!(!c.is_visible_to(&viewer("carol", Role::User, None, None)));
        assert!(c.is_visible_to(&viewer("bob", Role::ImpactPlayer, None, None)));
        assert!(!c.is_visible_to(&viewer("dave", Role::ImpactPlayer, None, None)));
        assert!(!c.is_visible_to(&viewer("guest", Role::Guest, Some("acme"), None)));
    }

    #[test]
    fn test_anonymous_hides_submitter() {
        let mut c = complaint();
        c.is_anonymous = true;
        c.submitted_by_user_id = None;
        assert!(!c.is_visible_to(&viewer("alice", Role::User, None, None)));
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("submittedByUserId").is_none());
        assert_eq!(json["isAnonymous"], true);
    }

    #[test]
    fn test_case_id_shape() {
        let id = new_case_id();
        assert_eq!(id.len(), 15);
        assert!(id.starts_with("CASE-"));
        assert!(id[5..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}
