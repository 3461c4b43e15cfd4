//! Site services.

pub mod leads;
