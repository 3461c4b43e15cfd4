//! Contact form route handlers.
//!
//! Validation messages are in Turkish, matching the site language.
//! Every field arrives as a string and is validated server-side; the
//! typed `Email` and `Phone` newtypes do the format checks.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use chrono::Utc;
use ozlasteksan_core::{Email, Phone};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::services::leads::ContactLead;
use crate::state::AppState;

/// Maximum length of the message body.
const MESSAGE_MAX_LEN: usize = 1000;

/// Flash message shown after a successful submission.
pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Mesajınız başarıyla gönderildi. En kısa sürede size dönüş yapacağız.";

/// Raw contact form data as submitted.
#[derive(Debug, Default, Deserialize)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: ContactFormData,
    pub errors: Vec<String>,
    pub flash: Option<String>,
}

/// Display the contact form.
#[instrument]
pub async fn form() -> impl IntoResponse {
    ContactTemplate {
        form: ContactFormData::default(),
        errors: Vec::new(),
        flash: None,
    }
}

/// Handle a contact form submission.
///
/// Invalid submissions re-render the form with the submitted values and
/// the validation errors. Valid submissions are recorded and the form
/// re-renders empty with a confirmation message.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactFormData>,
) -> impl IntoResponse {
    match validate(&form) {
        Ok((email, phone)) => {
            let company = form.company.trim();
            state.leads().record_contact(ContactLead {
                name: form.name.trim().to_string(),
                email,
                phone,
                company: (!company.is_empty()).then(|| company.to_string()),
                subject: form.subject.trim().to_string(),
                message: form.message.trim().to_string(),
                received_at: Utc::now(),
            });

            ContactTemplate {
                form: ContactFormData::default(),
                errors: Vec::new(),
                flash: Some(CONTACT_SUCCESS_MESSAGE.to_string()),
            }
        }
        Err(errors) => ContactTemplate {
            form,
            errors,
            flash: None,
        },
    }
}

/// Validate the submitted form, returning the parsed email and phone on
/// success or the full list of errors on failure.
fn validate(form: &ContactFormData) -> Result<(Email, Phone), Vec<String>> {
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

    if form.subject.trim().is_empty() {
        errors.push("Konu alanı zorunludur".to_string());
    }

    if form.message.trim().is_empty() {
        errors.push("Mesaj alanı zorunludur".to_string());
    } else if form.message.chars().count() > MESSAGE_MAX_LEN {
        errors.push("Mesajınız en fazla 1000 karakter olabilir".to_string());
    }

    match (errors.is_empty(), email, phone) {
        (true, Some(email), Some(phone)) => Ok((email, phone)),
        _ => Err(errors),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ContactFormData {
        ContactFormData {
            name: "Ayşe Yılmaz".to_string(),
            email: "ayse@example.com".to_string(),
            phone: "0212 555 44 33".to_string(),
            company: String::new(),
            subject: "Fiyat bilgisi".to_string(),
            message: "Merhaba, O-ring conta fiyatlarını rica ederim.".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let (email, phone) = validate(&valid_form()).unwrap();
        assert_eq!(email.as_str(), "ayse@example.com");
        assert_eq!(phone.as_str(), "02125554433");
    }

    #[test]
    fn test_empty_form_collects_all_required_errors() {
        let errors = validate(&ContactFormData::default()).unwrap_err();

        assert!(errors.contains(&"Ad Soyad alanı zorunludur".to_string()));
        assert!(errors.contains(&"E-posta alanı zorunludur".to_string()));
        assert!(errors.contains(&"Telefon alanı zorunludur".to_string()));
        assert!(errors.contains(&"Konu alanı zorunludur".to_string()));
        assert!(errors.contains(&"Mesaj alanı zorunludur".to_string()));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_invalid_email_and_phone() {
        let form = ContactFormData {
            email: "not-an-email".to_string(),
            phone: "abc".to_string(),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();

        assert!(errors.contains(&"Geçerli bir e-posta adresi giriniz".to_string()));
        assert!(errors.contains(&"Geçerli bir telefon numarası giriniz".to_string()));
    }

    #[test]
    fn test_message_too_long() {
        let form = ContactFormData {
            message: "x".repeat(MESSAGE_MAX_LEN + 1),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();

        assert_eq!(
            errors,
            vec!["Mesajınız en fazla 1000 karakter olabilir".to_string()]
        );
    }

    #[test]
    fn test_company_is_optional() {
        assert!(validate(&valid_form()).is_ok());
    }
}
