//! REST API controllers.

pub mod health_controller;
pub mod transaction_controller;
