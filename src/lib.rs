//! patient-folder-service: HTTP functions for a clinic's patient intake.
//!
//! Provisions a per-patient folder tree in Google Drive when a new
//! patient/lead record arrives, lists the contents of pre-provisioned
//! category folders, and relays single chat turns to the Gemini API.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
