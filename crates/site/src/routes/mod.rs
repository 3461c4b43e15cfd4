//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Home page
//! GET  /health             - Health check
//! GET  /about              - Company page
//! GET  /privacy            - Privacy policy
//! GET  /cookie-policy      - Cookie policy
//! GET  /offline.html       - Offline fallback page
//! GET  /manifest.json      - Web app manifest
//!
//! # Products
//! GET  /products           - Product listing (optional ?category= filter)
//! GET  /products/{id}      - Product detail
//!
//! # Forms
//! GET  /contact            - Contact form
//! POST /contact            - Contact form submission
//! GET  /quote              - Quote request form
//! POST /quote              - Quote request submission
//! ```

pub mod contact;
pub mod home;
pub mod manifest;
pub mod pages;
pub mod products;
pub mod quote;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/privacy", get(pages::privacy))
        .route("/cookie-policy", get(pages::cookie_policy))
        .route("/offline.html", get(pages::offline))
        .route("/manifest.json", get(manifest::manifest))
        .nest("/products", product_routes())
        .route("/contact", get(contact::form).post(contact::submit))
        .route("/quote", get(quote::form).post(quote::submit))
}
