//! Playlist cart routes
//!
//! A cart holds the songs a user has picked as seeds. All routes need a
//! logged in user.

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::info;

use super::auth::require_user;
use super::generate::PlaylistsResponse;
use super::AppState;
use crate::error::Result;
use crate::models::{CartSummary, Song};

#[derive(Debug, Serialize)]
pub struct CartChange {
    /// False when the request did not change the cart
    pub changed: bool,
    pub cart: CartSummary,
}

#[get("")]
pub async fn get_cart(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    Ok(HttpResponse::Ok().json(state.carts.get(&user).summary()))
}

/// add a search result to the cart
#[post("")]
pub async fn add_song(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<Song>,
) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    let changed = state.carts.add(&user, body.into_inner())?;

    Ok(HttpResponse::Ok().json(CartChange {
        changed,
        cart: state.carts.get(&user).summary(),
    }))
}

#[delete("")]
pub async fn clear_cart(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    state.carts.clear(&user)?;
    Ok(HttpResponse::Ok().json(state.carts.get(&user).summary()))
}

#[delete("/{track_id}")]
pub async fn remove_song(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    let changed = state.carts.remove(&user, path.into_inner())?;

    Ok(HttpResponse::Ok().json(CartChange {
        changed,
        cart: state.carts.get(&user).summary(),
    }))
}

/// generate playlists from the cart's songs
#[post("/generate")]
pub async fn generate_from_cart(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let user = require_user(&req, &state).await?;
    let seeds = state
        .carts
        .get(&user)
        .seeds_for_generation(state.min_cart_songs)?;

    info!("Generating playlists from {}'s cart ({} songs)", user.username, seeds.len());
    let playlists = state.generator.generate(&seeds).await?;

    Ok(HttpResponse::Ok().json(PlaylistsResponse { playlists }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_cart)
        .service(add_song)
        .service(clear_cart)
        .service(generate_from_cart)
        .service(remove_song);
}

#[cfg(test)]
mod tests {
    use crate::api::testing;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn song(id: i64, artist: &str, title: &str) -> Value {
        json!({
            "trackId": id,
            "trackName": title,
            "artistName": artist,
            "trackTimeMillis": 200000
        })
    }

    #[actix_web::test]
    async fn test_cart_requires_login() {
        let state = testing::state().await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::get().uri("/cart").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_add_remove_and_clear() {
        let state = testing::state().await;
        let (_, auth) = testing::login_as(&state, "mira").await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/cart")
            .insert_header(("Authorization", auth.clone()))
            .set_json(song(1, "Arctic Monkeys", "505"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["cart"]["count"], 1);
        assert_eq!(body["cart"]["songs"][0]["duration"], "3:20");

        let req = test::TestRequest::post()
            .uri("/cart")
            .insert_header(("Authorization", auth.clone()))
            .set_json(song(1, "Arctic Monkeys", "505"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], false);
        assert_eq!(body["cart"]["count"], 1);

        let req = test::TestRequest::delete()
            .uri("/cart/1")
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["changed"], true);
        assert_eq!(body["cart"]["count"], 0);

        let req = test::TestRequest::delete()
            .uri("/cart")
            .insert_header(("Authorization", auth))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 0);
    }

    #[actix_web::test]
    async fn test_full_cart_is_rejected() {
        let state = testing::state().await;
        let (_, auth) = testing::login_as(&state, "mira").await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        for id in 0..10 {
            let req = test::TestRequest::post()
                .uri("/cart")
                .insert_header(("Authorization", auth.clone()))
                .set_json(song(id, "Artist", &format!("Song {}", id)))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::post()
            .uri("/cart")
            .insert_header(("Authorization", auth))
            .set_json(song(99, "Artist", "One Too Many"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generate_needs_enough_songs() {
        let state = testing::state().await;
        let (_, auth) = testing::login_as(&state, "mira").await;
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let seeds = [
            ("Arctic Monkeys", "Do I Wanna Know?"),
            ("Tame Impala", "The Less I Know The Better"),
            ("The Weeknd", "Blinding Lights"),
            ("Dua Lipa", "Levitating"),
            ("Drake", "God's Plan"),
        ];

        for (id, (artist, title)) in seeds.iter().enumerate() {
            if id == 4 {
                let req = test::TestRequest::post()
                    .uri("/cart/generate")
                    .insert_header(("Authorization", auth.clone()))
                    .to_request();
                let resp = test::call_service(&app, req).await;
                assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            }
            let req = test::TestRequest::post()
                .uri("/cart")
                .insert_header(("Authorization", auth.clone()))
                .set_json(song(id as i64, artist, title))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::post()
            .uri("/cart/generate")
            .insert_header(("Authorization", auth))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["playlists"].as_array().unwrap().len(), 5);
    }
}
