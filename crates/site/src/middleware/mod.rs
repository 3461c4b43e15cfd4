//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (CSP, isolation headers)

pub mod security_headers;

pub use security_headers::security_headers_middleware;
