//! Page route paths

pub const LANDING: &str = "/";
pub const LOGIN: &str = "/login";
pub const HRM_LOGIN: &str = "/hrm/login";
pub const DEPARTMENT_LOGIN: &str = "/department/login";
pub const REGISTER_USER: &str = "/register";
pub const REGISTER_ORGANIZATION: &str = "/register/organization";
pub const GUEST_CHECK_STATUS: &str = "/guest/check-status";
pub const COMPLAINT_DETAILS: &str = "/complaints/:case_id";

pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const ADMIN_MANAGE_DEPARTMENTS: &str = "/admin/departments";
pub const HRM_DASHBOARD: &str = "/hrm/dashboard";
pub const DEPARTMENT_DASHBOARD: &str = "/department/dashboard";
pub const USER_DASHBOARD: &str = "/user/dashboard";
pub const USER_SUBMIT_COMPLAINT: &str = "/user/submit-complaint";
