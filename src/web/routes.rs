use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use super::session::{self, parse_post_param};
use super::AppState;
use crate::components::{feed_regions, BaseLayout};

const PAGE_TITLE: &str = "Activities";

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/live", get(live))
        .route("/healthz", get(health))
}

/// Page shell. Content arrives over the live session.
async fn home() -> Html<String> {
    Html(BaseLayout::new(PAGE_TITLE).render(feed_regions()).into_string())
}

#[derive(Debug, Deserialize)]
pub struct LiveParams {
    post: Option<String>,
}

async fn live(
    State(state): State<AppState>,
    Query(params): Query<LiveParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let initial_post = params.post.as_deref().and_then(parse_post_param);
    ws.on_upgrade(move |socket| session::run(socket, state, initial_post))
        .into_response()
}

async fn health() -> &'static str {
    "ok"
}
