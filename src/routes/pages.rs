//! Page route table
//!
//! Every page the client application mounts, with the roles allowed to see
//! it. The router is built from this table so the gate and the navbar agree
//! on who sees what.

use axum::{
    extract::State,
    middleware,
    response::Redirect,
    routing::{get, MethodRouter},
    Router,
};

use super::paths;
use crate::entity::Role;
use crate::handlers::auth::LoginPortal;
use crate::layout;
use crate::middleware::{require_roles, SessionState};
use crate::state::AppState;

/// Pages mounted by the client application
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Landing,
    Login(LoginPortal),
    UserRegistration,
    OrganizationRegistration,
    GuestCheckStatus,
    /// Public route; the complaint API decides what the viewer may read
    ComplaintDetails,
    AdminDashboard,
    AdminManageDepartments,
    HrmDashboard,
    DepartmentDashboard,
    UserDashboard,
    SubmitComplaint,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Landing => "Welcome",
            Page::Login(LoginPortal::General) => "Sign in",
            Page::Login(LoginPortal::Hrm) => "HR sign in",
            Page::Login(LoginPortal::Department) => "Department sign in",
            Page::UserRegistration => "Create an account",
            Page::OrganizationRegistration => "Register your organization",
            Page::GuestCheckStatus => "Check complaint status",
            Page::ComplaintDetails => "Complaint details",
            Page::AdminDashboard => "Admin dashboard",
            Page::AdminManageDepartments => "Manage departments",
            Page::HrmDashboard => "HR dashboard",
            Page::DepartmentDashboard => "Department dashboard",
            Page::UserDashboard => "My complaints",
            Page::SubmitComplaint => "Submit a complaint",
        }
    }

    /// Name the client bundle mounts its component under
    pub fn mount_name(self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Login(_) => "login",
            Page::UserRegistration => "user-registration",
            Page::OrganizationRegistration => "organization-registration",
            Page::GuestCheckStatus => "guest-check-status",
            Page::ComplaintDetails => "complaint-details",
            Page::AdminDashboard => "admin-dashboard",
            Page::AdminManageDepartments => "admin-manage-departments",
            Page::HrmDashboard => "hrm-dashboard",
            Page::DepartmentDashboard => "department-dashboard",
            Page::UserDashboard => "user-dashboard",
            Page::SubmitComplaint => "submit-complaint",
        }
    }
}

/// Who may open a page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Roles(&'static [Role]),
}

#[derive(Clone, Copy, Debug)]
pub struct PageRoute {
    pub path: &'static str,
    pub page: Page,
    pub access: Access,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const HRM_ONLY: &[Role] = &[Role::Hrm];
const DEPARTMENT_ONLY: &[Role] = &[Role::Department];
const COMPLAINANTS: &[Role] = &[Role::User, Role::ImpactPlayer];

pub const PAGE_ROUTES: &[PageRoute] = &[
    PageRoute { path: paths::LANDING, page: Page::Landing, access: Access::Public },
    PageRoute { path: paths::LOGIN, page: Page::Login(LoginPortal::General), access: Access::Public },
    PageRoute { path: paths::HRM_LOGIN, page: Page::Login(LoginPortal::Hrm), access: Access::Public },
    PageRoute {
        path: paths::DEPARTMENT_LOGIN,
        page: Page::Login(LoginPortal::Department),
        access: Access::Public,
    },
    PageRoute { path: paths::REGISTER_USER, page: Page::UserRegistration, access: Access::Public },
    PageRoute {
        path: paths::REGISTER_ORGANIZATION,
        page: Page::OrganizationRegistration,
        access: Access::Public,
    },
    PageRoute { path: paths::GUEST_CHECK_STATUS, page: Page::GuestCheckStatus, access: Access::Public },
    PageRoute { path: paths::COMPLAINT_DETAILS, page: Page::ComplaintDetails, access: Access::Public },
    PageRoute { path: paths::ADMIN_DASHBOARD, page: Page::AdminDashboard, access: Access::Roles(ADMIN_ONLY) },
    PageRoute {
        path: paths::ADMIN_MANAGE_DEPARTMENTS,
        page: Page::AdminManageDepartments,
        access: Access::Roles(ADMIN_ONLY),
    },
    PageRoute { path: paths::HRM_DASHBOARD, page: Page::HrmDashboard, access: Access::Roles(HRM_ONLY) },
    PageRoute {
        path: paths::DEPARTMENT_DASHBOARD,
        page: Page::DepartmentDashboard,
        access: Access::Roles(DEPARTMENT_ONLY),
    },
    PageRoute { path: paths::USER_DASHBOARD, page: Page::UserDashboard, access: Access::Roles(COMPLAINANTS) },
    PageRoute {
        path: paths::USER_SUBMIT_COMPLAINT,
        page: Page::SubmitComplaint,
        access: Access::Roles(COMPLAINANTS),
    },
];

fn page_handler(page: Page) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, session: SessionState| async move {
        layout::render_page(page, &session, state.config.assistant.enabled)
    })
}

/// Router serving every page in [`PAGE_ROUTES`]; unknown paths go to the landing page
pub fn page_router() -> Router<AppState> {
    let mut router = Router::new();

    for route in PAGE_ROUTES {
        let mut handler = page_handler(route.page);
        if let Access::Roles(allowed) = route.access {
            handler = handler.route_layer(middleware::from_fn_with_state(allowed, require_roles));
        }
        router = router.route(route.path, handler);
    }

    router.fallback(redirect_to_landing)
}

async fn redirect_to_landing() -> Redirect {
    Redirect::to(paths::LANDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_unique() {
        let mut seen = HashSet::new();
        for route in PAGE_ROUTES {
            assert!(seen.insert(route.path), "duplicate path {}", route.path);
        }
    }

    #[test]
    fn test_gated_routes_are_static() {
        for route in PAGE_ROUTES {
            if let Access::Roles(allowed) = route.access {
                assert!(!allowed.is_empty(), "{} admits nobody", route.path);
                assert!(!route.path.contains(':'), "{} has parameters", route.path);
            }
        }
    }

    #[test]
    fn test_guest_role_has_no_gated_pages() {
        for route in PAGE_ROUTES {
            if let Access::Roles(allowed) = route.access {
                assert!(!allowed.contains(&Role::Guest));
            }
        }
    }

    #[test]
    fn test_login_portals_share_the_login_page() {
        let mounts: HashSet<_> = PAGE_ROUTES
            .iter()
            .filter(|r| matches!(r.page, Page::Login(_)))
            .map(|r| r.page.mount_name())
            .collect();
        assert_eq!(mounts.len(), 1);
    }
}
