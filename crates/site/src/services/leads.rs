//! Contact and quote lead intake.
//!
//! Submitted forms land here. There is no CRM integration; leads are
//! held in memory and surfaced through structured logs, which the
//! on-call inbox tails. Restarts drop the in-memory list, the log
//! stream is the durable record.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use ozlasteksan_core::{Email, Phone};

/// A submitted contact form.
#[derive(Debug, Clone)]
pub struct ContactLead {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

/// A submitted quote request.
#[derive(Debug, Clone)]
pub struct QuoteLead {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub company: String,
    pub product: String,
    pub quantity: Option<String>,
    pub specifications: Option<String>,
    pub additional_notes: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// Either kind of inbound lead.
#[derive(Debug, Clone)]
pub enum Lead {
    Contact(ContactLead),
    Quote(QuoteLead),
}

/// In-memory store of received leads.
#[derive(Debug, Default)]
pub struct LeadBook {
    leads: Mutex<Vec<Lead>>,
}

impl LeadBook {
    /// Create an empty lead book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contact lead.
    pub fn record_contact(&self, lead: ContactLead) {
        tracing::info!(
            name = %lead.name,
            email = %lead.email,
            subject = %lead.subject,
            "Contact form received"
        );
        self.lock().push(Lead::Contact(lead));
    }

    /// Record a quote lead.
    pub fn record_quote(&self, lead: QuoteLead) {
        tracing::info!(
            name = %lead.name,
            company = %lead.company,
            email = %lead.email,
            product = %lead.product,
            "Quote request received"
        );
        self.lock().push(Lead::Quote(lead));
    }

    /// Number of leads recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Copy of all recorded leads, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Lead> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Lead>> {
        self.leads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
