//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use ozlasteksan_core::Product;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 6;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<Product>,
}

/// Display the home page with a featured product strip.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = state
        .catalog()
        .all()
        .iter()
        .take(FEATURED_COUNT)
        .cloned()
        .collect();

    HomeTemplate { featured }
}
