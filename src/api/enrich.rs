//! Track enrichment route

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{LoomiError, Result};
use crate::models::EnrichedTrack;

/// Most song refs one request may enrich
const MAX_ENRICH_SONGS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    pub songs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub tracks: Vec<EnrichedTrack>,
}

#[post("")]
pub async fn enrich_tracks(
    state: web::Data<AppState>,
    body: web::Json<EnrichRequest>,
) -> Result<HttpResponse> {
    if body.songs.len() > MAX_ENRICH_SONGS {
        return Err(LoomiError::InvalidInput(format!(
            "At most {} songs can be enriched at once",
            MAX_ENRICH_SONGS
        )));
    }

    let tracks = state.enrichment.enrich_many(&body.songs).await;
    Ok(HttpResponse::Ok().json(EnrichResponse { tracks }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(enrich_tracks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_unconfigured_lookup_yields_placeholders() {
        let state = testing::state().await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/enrich")
            .set_json(serde_json::json!({ "songs": ["Tycho - Awake", "Hoppípolla"] }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let tracks = body["tracks"].as_array().unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0]["name"], "Awake");
        assert_eq!(tracks[0]["placeholder"], true);
        assert_eq!(tracks[0]["images"][0], "https://via.placeholder.com/300x300");
        assert_eq!(tracks[1]["artists"][0], "Unknown Artist");
    }

    #[actix_web::test]
    async fn test_oversized_request() {
        let state = testing::state().await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let songs: Vec<String> = (0..=MAX_ENRICH_SONGS).map(|i| format!("A - {}", i)).collect();
        let req = test::TestRequest::post()
            .uri("/enrich")
            .set_json(serde_json::json!({ "songs": songs }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
