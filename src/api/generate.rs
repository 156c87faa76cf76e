//! Playlist generation from a raw list of liked songs
//!
//! Every failure, including a malformed body, is answered with
//! `500 {"error": msg}` so browser clients see one error shape.

use actix_web::{post, web, HttpResponse};
use serde::Serialize;
use tracing::{error, info};

use super::AppState;
use crate::core::generator::EMPTY_SEEDS_MESSAGE;
use crate::error::{LoomiError, Result};
use crate::models::GeneratedPlaylist;

#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    pub playlists: Vec<GeneratedPlaylist>,
}

/// Pull `likedSongs` out of a request body. Non-string entries are ignored.
fn liked_songs(body: &[u8]) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| LoomiError::InvalidInput(format!("Invalid request body: {}", e)))?;

    let songs = value
        .get("likedSongs")
        .and_then(|v| v.as_array())
        .filter(|list| !list.is_empty())
        .ok_or_else(|| LoomiError::InvalidSeeds(EMPTY_SEEDS_MESSAGE.to_string()))?;

    Ok(songs
        .iter()
        .filter_map(|s| s.as_str())
        .map(str::to_string)
        .collect())
}

async fn generate(state: &AppState, body: &[u8]) -> Result<Vec<GeneratedPlaylist>> {
    let seeds = liked_songs(body)?;
    info!(
        "Generating playlists from {} liked songs ({})",
        seeds.len(),
        state.generator.backend_name()
    );
    state.generator.generate(&seeds).await
}

#[post("")]
pub async fn generate_playlists(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    match generate(&state, &body).await {
        Ok(playlists) => HttpResponse::Ok().json(PlaylistsResponse { playlists }),
        Err(e) => {
            error!("Playlist generation failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_playlists);
}
