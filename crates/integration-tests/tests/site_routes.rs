//! Integration tests for site routes.
//!
//! Drives the full router in-process via `tower::ServiceExt::oneshot`,
//! including the static file service and security headers middleware.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use ozlasteksan_client::STATIC_CACHE_URLS;
use ozlasteksan_integration_tests::test_app;
use tower::ServiceExt;

async fn get(path: &str) -> axum::response::Response {
    test_app()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn test_health() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_every_precached_url_is_served() {
    // The offline shell pre-caches these paths at install time, so every
    // one of them must resolve on the live site.
    for path in STATIC_CACHE_URLS {
        let response = get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "failed for {path}");
    }

    // The hashed stylesheet is registered with the worker at construction
    // time and must be served too.
    let response = get(ozlasteksan_site::HASHED_CSS_PATH).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_shell_pages_reference_only_precached_assets() {
    // Every static asset a shell page links must be in the install list,
    // otherwise a fresh offline install serves the page without it.
    for path in ["/", "/offline.html"] {
        let response = get(path).await;
        let body = body_string(response).await;

        for asset in static_refs(&body) {
            let precached = STATIC_CACHE_URLS.contains(&asset.as_str())
                || asset == ozlasteksan_site::HASHED_CSS_PATH;
            assert!(precached, "{path} references un-precached asset {asset}");
        }
    }
}

/// Collect every quoted `/static/...` reference in an HTML document.
fn static_refs(html: &str) -> Vec<String> {
    let mut refs = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find("\"/static/") {
        let tail = rest.get(start + 1..).unwrap_or_default();
        let end = tail.find('"').unwrap_or(tail.len());
        refs.push(tail.get(..end).unwrap_or_default().to_string());
        rest = tail.get(end..).unwrap_or_default();
    }
    refs
}

#[tokio::test]
async fn test_home_page_renders() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Özlasteksan"));
    assert!(body.contains("Öne Çıkan Ürünler"));
}

#[tokio::test]
async fn test_product_listing_and_detail() {
    let response = get("/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("O-ring Conta"));
    assert!(body.contains("Özel Üretim Kauçuk"));

    let response = get("/products/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("O-ring Conta"));
    assert!(body.contains("data-favorite-toggle"));
}

#[tokio::test]
async fn test_product_listing_category_filter() {
    let response = get("/products?category=Levha").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Kauçuk Levhalar"));
    assert!(!body.contains("O-ring Conta"));
}

#[tokio::test]
async fn test_unknown_category_renders_empty_listing() {
    let response = get("/products?category=Yok").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Bu kategoride ürün bulunamadı"));
}

#[tokio::test]
async fn test_unknown_product_returns_404() {
    let response = get("/products/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_product_id_is_rejected() {
    let response = get("/products/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manifest_content_type() {
    let response = get("/manifest.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("application/manifest+json")
    );

    let body = body_string(response).await;
    let manifest: serde_json::Value = serde_json::from_str(&body).expect("valid json");
    assert_eq!(manifest["start_url"], "/");
    assert_eq!(manifest["display"], "standalone");
}

#[tokio::test]
async fn test_security_headers_applied() {
    let response = get("/").await;
    let headers = response.headers();

    assert_eq!(
        headers
            .get(header::X_FRAME_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert_eq!(
        headers
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    let csp = headers
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|v| v.to_str().ok())
        .expect("csp header");
    assert!(csp.contains("default-src 'none'"));
    assert!(csp.contains("manifest-src 'self'"));
}

#[tokio::test]
async fn test_offline_page_renders_without_network_assumptions() {
    let response = get("/offline.html").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("çevrimdışısınız"));
}
