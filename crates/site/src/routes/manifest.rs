//! Web app manifest route handler.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Serve the web app manifest.
pub async fn manifest() -> Response {
    let manifest = serde_json::json!({
        "name": "Özlasteksan Kauçuk",
        "short_name": "Özlasteksan",
        "description": "Endüstriyel kauçuk ve elastomer ürünleri",
        "start_url": "/",
        "display": "standalone",
        "lang": "tr",
        "theme_color": "#1a1a2e",
        "background_color": "#ffffff",
        "icons": [
            {
                "src": "/static/images/icon-192.png",
                "sizes": "192x192",
                "type": "image/png"
            },
            {
                "src": "/static/images/icon-512.png",
                "sizes": "512x512",
                "type": "image/png"
            }
        ]
    });

    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        manifest.to_string(),
    )
        .into_response()
}
