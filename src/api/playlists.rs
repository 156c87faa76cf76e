//! Saved playlist routes

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use super::auth::require_user;
use super::AppState;
use crate::core::PlaylistLib;
use crate::error::Result;
use crate::models::{GeneratedPlaylist, PlaylistSession, SavedPlaylist};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub playlists: Vec<GeneratedPlaylist>,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub playlists: Vec<SavedPlaylist>,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<PlaylistSession>,
}

/// saved playlists grouped by day
#[get("")]
pub async fn list_playlists(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    let saved = PlaylistLib::list(&state.pool, user.id).await?;

    Ok(HttpResponse::Ok().json(SessionsResponse {
        sessions: PlaylistLib::group_by_day(&saved),
    }))
}

#[post("")]
pub async fn save_playlists(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<SaveRequest>,
) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    let playlists = PlaylistLib::save_all(&state.pool, user.id, &body.playlists).await?;

    Ok(HttpResponse::Created().json(SavedResponse { playlists }))
}

#[delete("/{id}")]
pub async fn delete_playlist(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    PlaylistLib::delete(&state.pool, user.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": "Playlist deleted" })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_playlists)
        .service(save_playlists)
        .service(delete_playlist);
}

#[cfg(test)]
mod tests {
    use crate::api::testing;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_save_list_and_delete() {
        let state = testing::state().await;
        let (_, auth) = testing::login_as(&state, "mira").await;
        let (_, other) = testing::login_as(&state, "otto").await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/playlists")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({
                "playlists": [
                    { "category": "Mix", "songs": ["A - 1", "A - 2", "A - 3", "A - 4"] },
                    { "category": "Focus", "songs": ["B - 1"] }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let saved = body["playlists"].as_array().unwrap();
        assert_eq!(saved.len(), 2);
        let mix_id = saved[0]["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri("/playlists")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let sessions = body["sessions"].as_array().unwrap();
        assert_eq!(sessions.len(), 1);
        let cards = sessions[0]["playlists"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["preview"].as_array().unwrap().len(), 3);
        assert_eq!(cards[0]["more"], 1);

        // other users cannot see or delete it
        let req = test::TestRequest::delete()
            .uri(&format!("/playlists/{}", mix_id))
            .insert_header(("Authorization", other))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/playlists/{}", mix_id))
            .insert_header(("Authorization", auth))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_saving_requires_login_and_content() {
        let state = testing::state().await;
        let (_, auth) = testing::login_as(&state, "mira").await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/playlists")
            .set_json(json!({ "playlists": [{ "category": "Mix", "songs": ["A - 1"] }] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/playlists")
            .insert_header(("Authorization", auth))
            .set_json(json!({ "playlists": [] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
