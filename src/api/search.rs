//! Catalog search route

use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use super::AppState;
use crate::core::SearchResults;
use crate::error::Result;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[get("")]
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let songs = state.search.search(&query.q, query.limit).await?;
    Ok(HttpResponse::Ok().json(SearchResults::from(songs)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search);
}
