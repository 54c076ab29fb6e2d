//! Layout shell
//!
//! Every page is served inside the same chrome: navbar, main content,
//! footer, and the chat assistant for signed-in users. Page bodies are
//! mounted client-side into `#page`.

use axum::response::Html;
use std::fmt::Write;

use crate::middleware::gate::{decide, GateDecision};
use crate::middleware::SessionState;
use crate::routes::pages::{Access, Page, PAGE_ROUTES};
use crate::routes::paths;

const CLIENT_BUNDLE: &str = "/assets/app.js";

/// Render `page` inside the shell
pub fn render_page(page: Page, session: &SessionState, assistant_enabled: bool) -> Html<String> {
    let mut body = format!(r#"<div id="page" data-page="{}""#, page.mount_name());
    if let Page::Login(portal) = page {
        let _ = write!(body, r#" data-portal="{}""#, portal.as_str());
    }
    body.push_str("></div>");

    render_shell(session, assistant_enabled, page.title(), &body)
}

/// Spinner shown while the session is still resolving
pub fn render_loading(session: &SessionState) -> Html<String> {
    render_shell(
        session,
        false,
        "Loading",
        r#"<div class="spinner spinner-lg" role="status" aria-label="Loading"></div>"#,
    )
}

fn render_shell(session: &SessionState, assistant_enabled: bool, title: &str, body: &str) -> Html<String> {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{} | Complaintdesk</title>", title);
    html.push_str("</head>\n<body class=\"layout\">\n");

    html.push_str(&navbar(session));
    let _ = writeln!(html, "<main class=\"layout-main\">{}</main>", body);

    if assistant_enabled && session.current_user.is_some() {
        html.push_str("<aside id=\"chat-assistant\"></aside>\n");
    }

    html.push_str("<footer class=\"layout-footer\">Complaintdesk</footer>\n");
    let _ = writeln!(html, "<script type=\"module\" src=\"{}\"></script>", CLIENT_BUNDLE);
    html.push_str("</body>\n</html>\n");

    Html(html)
}

/// Paths the navbar links to for this session
///
/// Signed-in sessions get every gated page the gate would render for them.
pub fn nav_links(session: &SessionState) -> Vec<(&'static str, &'static str)> {
    if session.loading {
        return Vec::new();
    }

    if session.current_user.is_none() {
        return vec![
            (paths::LOGIN, "Sign in"),
            (paths::REGISTER_USER, "Register"),
            (paths::REGISTER_ORGANIZATION, "Register organization"),
            (paths::GUEST_CHECK_STATUS, "Check status"),
        ];
    }

    PAGE_ROUTES
        .iter()
        .filter_map(|route| match route.access {
            Access::Roles(allowed) => Some((route, allowed)),
            Access::Public => None,
        })
        .filter(|(route, allowed)| decide(session, allowed, route.path) == GateDecision::Render)
        .map(|(route, _)| (route.path, route.page.title()))
        .collect()
}

fn navbar(session: &SessionState) -> String {
    let mut nav = String::from("<nav class=\"layout-nav\">\n");
    let _ = writeln!(nav, "<a class=\"brand\" href=\"{}\">Complaintdesk</a>", paths::LANDING);

    for (path, label) in nav_links(session) {
        let _ = writeln!(nav, "<a href=\"{}\">{}</a>", path, label);
    }

    if let Some(user) = &session.current_user {
        let _ = writeln!(nav, "<span class=\"role\">{}</span>", user.role);
        nav.push_str("<button type=\"button\" data-action=\"logout\">Sign out</button>\n");
    }

    nav.push_str("</nav>\n");
    nav
}
