//! Quote request route handlers.
//!
//! Mirrors the contact form, with company and product required and two
//! length-limited free-text fields.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use chrono::Utc;
use ozlasteksan_core::{Email, Phone};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::services::leads::QuoteLead;
use crate::state::AppState;

/// Maximum length of the specifications field.
const SPECIFICATIONS_MAX_LEN: usize = 500;
/// Maximum length of the additional notes field.
const NOTES_MAX_LEN: usize = 1000;

/// Flash message shown after a successful submission.
pub const QUOTE_SUCCESS_MESSAGE: &str =
    "Teklif talebiniz alınmıştır. En kısa sürede size dönüş yapacağız.";

/// Raw quote form data as submitted.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub specifications: String,
    #[serde(default)]
    pub additional_notes: String,
}

/// Quote page template.
#[derive(Template, WebTemplate)]
#[template(path = "quote.html")]
pub struct QuoteTemplate {
    pub form: QuoteFormData,
    pub errors: Vec<String>,
    pub flash: Option<String>,
    pub product_names: Vec<String>,
}

/// Display the quote request form.
#[instrument(skip(state))]
pub async fn form(State(state): State<AppState>) -> impl IntoResponse {
    QuoteTemplate {
        form: QuoteFormData::default(),
        errors: Vec::new(),
        flash: None,
        product_names: product_names(&state),
    }
}

/// Handle a quote request submission.
#[instrument(skip(state, form), fields(email = %form.email, product = %form.product))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<QuoteFormData>,
) -> impl IntoResponse {
    match validate(&form) {
        Ok((email, phone)) => {
            let quantity = form.quantity.trim();
            let specifications = form.specifications.trim();
            let notes = form.additional_notes.trim();
            state.leads().record_quote(QuoteLead {
                name: form.name.trim().to_string(),
                email,
                phone,
                company: form.company.trim().to_string(),
                product: form.product.trim().to_string(),
                quantity: (!quantity.is_empty()).then(|| quantity.to_string()),
                specifications: (!specifications.is_empty()).then(|| specifications.to_string()),
                additional_notes: (!notes.is_empty()).then(|| notes.to_string()),
                received_at: Utc::now(),
            });

            QuoteTemplate {
                form: QuoteFormData::default(),
                errors: Vec::new(),
                flash: Some(QUOTE_SUCCESS_MESSAGE.to_string()),
                product_names: product_names(&state),
            }
        }
        Err(errors) => QuoteTemplate {
            form,
            errors,
            flash: None,
            product_names: product_names(&state),
        },
    }
}

/// Product names for the product select box.
fn product_names(state: &AppState) -> Vec<String> {
    state
        .catalog()
        .all()
        .iter()
        .map(|p| p.name.clone())
        .collect()
}

/// Validate the submitted form, returning the parsed email and phone on
/// success or the full list of errors on failure.
fn validate(form: &QuoteFormData) -> Result<(Email, Phone), Vec<String>> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push("Ad Soyad alanı zorunludur".to_string());
    }

    let email = if form.email.trim().is_empty() {
        errors.push("E-posta alanı zorunludur".to_string());
        None
    } else {
        match Email::parse(&form.email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push("Geçerli bir e-posta adresi giriniz".to_string());
                None
            }
        }
    };

    let phone = if form.phone.trim().is_empty() {
        errors.push("Telefon alanı zorunludur".to_string());
        None
    } else {
        match Phone::parse(&form.phone) {
            Ok(phone) => Some(phone),
            Err(_) => {
                errors.push("Geçerli bir telefon numarası giriniz".to_string());
                None
            }
        }
    };

    if form.company.trim().is_empty() {
        errors.push("Şirket alanı zorunludur".to_string());
    }

    if form.product.trim().is_empty() {
        errors.push("Ürün alanı zorunludur".to_string());
    }

    if form.specifications.chars().count() > SPECIFICATIONS_MAX_LEN {
        errors.push("Açıklama en fazla 500 karakter olabilir".to_string());
    }

    if form.additional_notes.chars().count() > NOTES_MAX_LEN {
        errors.push("Notlar en fazla 1000 karakter olabilir".to_string());
    }

    match (errors.is_empty(), email, phone) {
        (true, Some(email), Some(phone)) => Ok((email, phone)),
        _ => Err(errors),
    }
}
