//! Protected-route gate
//!
//! Wraps role-restricted page routes. Unauthorized access never produces an
//! error page, only a redirect.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::session::SessionState;
use crate::entity::Role;
use crate::layout;
use crate::routes::paths;

/// Outcome of the gate for one request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Session is still resolving
    Loading,
    /// No session; come back to `from` after signing in
    RedirectToLogin { from: String },
    /// Signed in with a role outside the allowed set
    RedirectToLanding,
    Render,
}

/// Decide what a request for `requested` gets
pub fn decide(session: &SessionState, allowed: &[Role], requested: &str) -> GateDecision {
    if session.loading {
        return GateDecision::Loading;
    }

    let Some(user) = &session.current_user else {
        return GateDecision::RedirectToLogin {
            from: requested.to_string(),
        };
    };

    if !allowed.contains(&user.role) {
        return GateDecision::RedirectToLanding;
    }

    GateDecision::Render
}

/// Login URL that returns to `from` afterwards
pub fn login_redirect_target(from: &str) -> String {
    format!("{}?from={}", paths::LOGIN, from)
}

/// Gate middleware, installed as a route layer with the allowed roles as state
pub async fn require_roles(
    State(allowed): State<&'static [Role]>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let session = request
        .extensions()
        .get::<SessionState>()
        .cloned()
        .unwrap_or_else(SessionState::loading);
    let path = request.uri().path().to_string();

    match decide(&session, allowed, &path) {
        GateDecision::Loading => layout::render_loading(&session).into_response(),
        GateDecision::RedirectToLogin { from } => {
            tracing::debug!("No session for {}, redirecting to login", from);
            Redirect::to(&login_redirect_target(&from)).into_response()
        }
        GateDecision::RedirectToLanding => {
            tracing::debug!("Role not allowed on {}, redirecting to landing", path);
            Redirect::to(paths::LANDING).into_response()
        }
        GateDecision::Render => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::LoggedInUser;
    use sea_orm::Iterable;

    fn session_for(role: Role) -> SessionState {
        SessionState::signed_in(LoggedInUser {
            id: "id".to_string(),
            username: None,
            role,
            company_id: None,
            department_id: None,
        })
    }

    #[test]
    fn test_renders_iff_role_allowed() {
        let allowed = [Role::User, Role::ImpactPlayer];
        for role in Role::iter() {
            let decision = decide(&session_for(role), &allowed, "/user/dashboard");
            if allowed.contains(&role) {
                assert_eq!(decision, GateDecision::Render, "{role}");
            } else {
                assert_eq!(decision, GateDecision::RedirectToLanding, "{role}");
            }
        }
    }

    #[test]
    fn test_loading_wins_over_role() {
        let mut session = session_for(Role::Admin);
        session.loading = true;
        assert_eq!(decide(&session, &[Role::Admin], "/admin/dashboard"), GateDecision::Loading);
        assert_eq!(
            decide(&SessionState::loading(), &[Role::Admin], "/admin/dashboard"),
            GateDecision::Loading
        );
    }

    #[test]
    fn test_no_session_goes_to_login() {
        assert_eq!(
            decide(&SessionState::anonymous(), &[Role::Hrm], "/hrm/dashboard"),
            GateDecision::RedirectToLogin {
                from: "/hrm/dashboard".to_string()
            }
        );
        assert_eq!(login_redirect_target("/hrm/dashboard"), "/login?from=/hrm/dashboard");
    }

    #[test]
    fn test_empty_allow_list_admits_nobody() {
        for role in Role::iter() {
            assert_eq!(decide(&session_for(role), &[], "/x"), GateDecision::RedirectToLanding);
        }
    }
}
