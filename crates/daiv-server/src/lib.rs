//! DAIV.PRO HTTP server.
//!
//! Serves the landing page at `/` and relays contact-form submissions from
//! `POST /api/contact` to the n8n webhook configured in the environment.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod webhook;
