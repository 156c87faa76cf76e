//! Authentication routes: cookie based jwt sessions

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::db::UserTable;
use crate::error::{LoomiError, Result};
use crate::models::{PublicUser, User};
use crate::utils::auth::{
    create_jwt, hash_password, verify_jwt, verify_password, UserIdentity, ACCESS_MAX_AGE,
};

const ACCESS_COOKIE: &str = "access_token_cookie";
const MIN_PASSWORD_LEN: usize = 6;
const MAX_USERNAME_LEN: usize = 32;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub msg: String,
    pub accesstoken: String,
    pub maxage: u64,
    pub user: PublicUser,
}

/// create account and log in
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse> {
    let username = body.username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(LoomiError::InvalidInput(format!(
            "Username must be 1 to {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LoomiError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if UserTable::username_taken(&state.pool, username).await? {
        return Err(LoomiError::Conflict(format!("username {} is taken", username)));
    }

    let mut user = User::new(
        username.to_string(),
        hash_password(&body.password, &state.server_id),
    );
    user.id = UserTable::insert(&state.pool, &user).await?;
    info!("Registered user {}", user.username);

    session_response(&user, &state.server_id, "Account created")
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<Credentials>,
) -> Result<HttpResponse> {
    let user = UserTable::get_by_username(&state.pool, body.username.trim())
        .await?
        .filter(|u| verify_password(&body.password, &u.password, &state.server_id))
        .ok_or(LoomiError::Unauthorized)?;

    session_response(&user, &state.server_id, "Logged in")
}

#[post("/logout")]
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(ACCESS_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "msg": "Logged out" }))
}

/// current user
#[get("/user")]
pub async fn current_user(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(user.to_public()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout)
        .service(current_user);
}

fn session_response(user: &User, server_id: &str, msg: &str) -> Result<HttpResponse> {
    let identity = UserIdentity {
        id: user.id,
        username: user.username.clone(),
    };
    let token = create_jwt(identity, server_id, "access", ACCESS_MAX_AGE)?;

    Ok(HttpResponse::Ok()
        .cookie(build_access_cookie(&token))
        .json(TokenResponse {
            msg: msg.to_string(),
            accesstoken: token,
            maxage: ACCESS_MAX_AGE,
            user: user.to_public(),
        }))
}

fn build_access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(ACCESS_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(ACCESS_MAX_AGE as i64))
        .finish()
}

/// The authenticated user, or `Unauthorized`
pub async fn require_user(req: &HttpRequest, state: &AppState) -> Result<User> {
    let token = access_token(req).ok_or(LoomiError::Unauthorized)?;
    let identity = verify_jwt(&token, &state.server_id, Some("access"))
        .and_then(|claims| claims.identity())
        .map_err(|_| LoomiError::Unauthorized)?;

    UserTable::get_by_id(&state.pool, identity.id)
        .await?
        .ok_or(LoomiError::Unauthorized)
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?.trim();
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// cookie first, then the authorization header
fn access_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    bearer_token(req)
}
