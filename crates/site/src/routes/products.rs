//! Product listing and detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use ozlasteksan_core::{Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Restrict the listing to a single category.
    pub category: Option<String>,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub active_category: Option<String>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Product,
    pub related: Vec<Product>,
}

/// Display the product listing, optionally filtered by category.
///
/// An unknown category yields an empty listing rather than an error; the
/// filter bar still renders so the visitor can recover.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog();

    let products: Vec<Product> = match query.category.as_deref() {
        Some(category) => catalog.by_category(category).into_iter().cloned().collect(),
        None => catalog.all().to_vec(),
    };

    let categories = catalog
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();

    ProductsIndexTemplate {
        products,
        categories,
        active_category: query.category,
    }
}

/// Display a single product.
///
/// # Errors
///
/// Returns 404 if no product has the given id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog();
    let id = ProductId::from(id);

    let product = catalog
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let related = catalog
        .by_category(&product.category)
        .into_iter()
        .filter(|p| p.id != id)
        .take(3)
        .cloned()
        .collect();

    Ok(ProductShowTemplate { product, related })
}
