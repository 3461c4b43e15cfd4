//! Static content page route handlers.
//!
//! Serves the company, policy, and offline fallback pages. Content lives
//! in the templates themselves; there is no CMS behind these.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;

/// Company page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate;

/// Privacy policy template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/privacy.html")]
pub struct PrivacyTemplate;

/// Cookie policy template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/cookie_policy.html")]
pub struct CookiePolicyTemplate;

/// Offline fallback page template.
///
/// Served at a stable URL so it can be pre-cached and shown when a
/// navigation fails without a network.
#[derive(Template, WebTemplate)]
#[template(path = "offline.html")]
pub struct OfflineTemplate;

/// Display the company page.
#[instrument]
pub async fn about() -> impl IntoResponse {
    AboutTemplate
}

/// Display the privacy policy.
#[instrument]
pub async fn privacy() -> impl IntoResponse {
    PrivacyTemplate
}

/// Display the cookie policy.
#[instrument]
pub async fn cookie_policy() -> impl IntoResponse {
    CookiePolicyTemplate
}

/// Display the offline fallback page.
#[instrument]
pub async fn offline() -> impl IntoResponse {
    OfflineTemplate
}
