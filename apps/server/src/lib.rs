//! Sonovet server
//!
//! HTTP service for veterinary ultrasound records: patients, exams with
//! attached images, findings templates, reference ranges, clinic settings
//! and PDF report export.

#![allow(
    clippy::large_enum_variant, // Error variants carry their source errors unboxed
)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod request_context;
pub mod services;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
