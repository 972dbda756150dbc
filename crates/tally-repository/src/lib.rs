//! # Tally Repository
//!
//! Data access layer for Tally:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn TransactionRepository>   (domain interface)
//! MySqlTransactionRepository            (MySQL / SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! Repositories receive a shared [`DatabasePool`] at construction rather
//! than opening connections per request.

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
