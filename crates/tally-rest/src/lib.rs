//! # Tally REST
//!
//! HTTP layer for Tally: routing, API key authentication, request
//! validation, response envelopes, and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
