//! Cookie consent routes

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::require_user;
use super::AppState;
use crate::db::UserTable;
use crate::error::Result;
use crate::models::ConsentState;

#[derive(Debug, Deserialize)]
pub struct ConsentRequest {
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct ConsentResponse {
    /// `None` until the user has decided
    pub consent: Option<ConsentState>,
}

#[get("")]
pub async fn get_consent(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(ConsentResponse {
        consent: user.consent,
    }))
}

/// record a decision; declining also drops any stored cart
#[post("")]
pub async fn set_consent(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ConsentRequest>,
) -> Result<HttpResponse> {
    let mut user = require_user(&req, &state).await?;
    let consent = if body.accepted {
        ConsentState::Accepted
    } else {
        ConsentState::Declined
    };

    UserTable::set_consent(&state.pool, user.id, consent).await?;
    user.consent = Some(consent);
    state.carts.apply_consent(&user)?;
    info!("User {} {} local storage", user.username, consent.as_str());

    Ok(HttpResponse::Ok().json(ConsentResponse {
        consent: user.consent,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_consent).service(set_consent);
}

#[cfg(test)]
mod tests {
    use crate::api::testing;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_consent_roundtrip() {
        let state = testing::state().await;
        let (_, auth) = testing::login_as(&state, "mira").await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::get()
            .uri("/consent")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["consent"].is_null());

        let req = test::TestRequest::post()
            .uri("/consent")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({ "accepted": false }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["consent"], "declined");

        let req = test::TestRequest::get()
            .uri("/consent")
            .insert_header(("Authorization", auth))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["consent"], "declined");
    }
}
