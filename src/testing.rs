//! Test helpers: an app over an in-memory SQLite database, seed records and
//! request shortcuts

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::{Config, DatabaseConfig};
use crate::entity::{department, new_id, organization, user, Role, StringList};
use crate::routes::create_router;
use crate::state::AppState;

/// Lowest cost bcrypt accepts
const TEST_BCRYPT_COST: u32 = 4;

fn test_config() -> Config {
    Config {
        database: Some(DatabaseConfig::sqlite_memory()),
        bcrypt_cost: TEST_BCRYPT_COST,
        ..Config::default()
    }
}

/// App with a migrated in-memory database
pub async fn ready_app() -> (Router, AppState) {
    let config = test_config();
    let db = crate::db::init_database(config.database.as_ref().unwrap())
        .await
        .unwrap();
    let state = AppState::new(Some(db), config);
    (create_router(state.clone()), state)
}

/// App whose database never connects
pub fn loading_app() -> Router {
    create_router(AppState::new(None, test_config()))
}

fn hash(password: &str) -> String {
    bcrypt::hash(password, TEST_BCRYPT_COST).unwrap()
}

pub async fn seed_org(db: &DatabaseConnection, email: &str, password: &str) -> organization::Model {
    organization::ActiveModel {
        id: Set(new_id()),
        name: Set("Acme".to_string()),
        email: Set(email.to_string()),
        contact: Set("555-0100".to_string()),
        admin_password_hash: Set(hash(password)),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_department(
    db: &DatabaseConnection,
    company_id: &str,
    name: &str,
    password: &str,
) -> department::Model {
    department::ActiveModel {
        id: Set(new_id()),
        company_id: Set(company_id.to_string()),
        name: Set(name.to_string()),
        password_hash: Set(hash(password)),
        members: Set(StringList::default()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: Role,
    company_id: Option<&str>,
) -> user::Model {
    user::ActiveModel {
        id: Set(new_id()),
        username: Set(Some(username.to_string())),
        password_hash: Set(hash(password)),
        role: Set(role),
        company_id: Set(company_id.map(str::to_string)),
        department_id: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

fn request(method: Method, uri: &str, cookie: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body).unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    app.clone()
        .oneshot(request(Method::GET, uri, cookie, Body::empty()))
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    app.clone()
        .oneshot(request(Method::POST, uri, cookie, Body::from(body.to_string())))
        .await
        .unwrap()
}

/// `name=value` pair of the session cookie set by a response
pub fn session_cookie(res: &Response) -> String {
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("response sets no cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// Sign in through the API and return the session cookie
pub async fn login(app: &Router, portal: &str, identifier: &str, password: &str) -> String {
    let res = post_json(
        app,
        "/api/login",
        serde_json::json!({"portal": portal, "identifier": identifier, "password": password}),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login {} on {}", identifier, portal);
    session_cookie(&res)
}

pub async fn body_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response) -> Value {
    serde_json::from_str(&body_text(res).await).unwrap()
}
