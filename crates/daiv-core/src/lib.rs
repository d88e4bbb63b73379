//! Core library for the DAIV.PRO landing site.
//!
//! Contains the lead submission model, the webhook relay that forwards
//! submissions to the n8n automation endpoint, the contact modal state
//! machine, and scroll-section activation. This crate knows nothing about
//! HTTP frameworks; `daiv-server` wires it into axum.

pub mod error;
pub mod lead;
pub mod modal;
pub mod relay;
pub mod sections;
