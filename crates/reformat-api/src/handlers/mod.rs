//! HTTP request handlers.

pub mod convert;
pub mod formats;
pub mod health;
