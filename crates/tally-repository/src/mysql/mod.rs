//! MySQL repository implementations.

mod transaction_repository;

pub use transaction_repository::MySqlTransactionRepository;
